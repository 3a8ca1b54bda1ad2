mod fields;

use std::{fmt, str::FromStr};

use anyhow::{Result, bail};

use crate::{
    FormData,
    discord::embed::{Color, Embed, Footer, Thumbnail},
};

pub use fields::{FieldInput, FieldList, MAX_FIELDS};

/// The live editor state: the raw text of every input.
///
/// Nothing here is validated. [`Form::build_embed`] derives the payload
/// fresh on every call and [`Form::set_form_data`] writes one back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub webhook_url: String,
    pub title: String,
    pub description: String,
    pub color: String,
    pub icon_image: String,
    pub thumbnail_image: String,
    pub fields: FieldList,
}

impl Default for Form {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            title: String::new(),
            description: String::new(),
            color: Color::WHITE.to_hex_input(),
            icon_image: String::new(),
            thumbnail_image: String::new(),
            fields: FieldList::default(),
        }
    }
}

/// The scalar inputs of a [`Form`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    WebhookUrl,
    Title,
    Description,
    Color,
    IconImage,
    ThumbnailImage,
}

impl FromStr for Input {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let input = match s.to_ascii_lowercase().as_str() {
            "webhook" | "webhook-url" | "url" => Self::WebhookUrl,
            "title" => Self::Title,
            "description" | "desc" => Self::Description,
            "color" | "colour" => Self::Color,
            "icon" | "footer-icon" => Self::IconImage,
            "thumbnail" | "thumb" => Self::ThumbnailImage,
            _ => bail!("Unknown input {s:?}"),
        };
        Ok(input)
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let string = match self {
            Self::WebhookUrl => "webhook",
            Self::Title => "title",
            Self::Description => "description",
            Self::Color => "color",
            Self::IconImage => "icon",
            Self::ThumbnailImage => "thumbnail",
        };
        f.write_str(string)
    }
}

impl Form {
    #[must_use]
    pub fn input(&self, input: Input) -> &str {
        match input {
            Input::WebhookUrl => &self.webhook_url,
            Input::Title => &self.title,
            Input::Description => &self.description,
            Input::Color => &self.color,
            Input::IconImage => &self.icon_image,
            Input::ThumbnailImage => &self.thumbnail_image,
        }
    }

    pub fn set_input(&mut self, input: Input, value: impl Into<String>) {
        let slot = match input {
            Input::WebhookUrl => &mut self.webhook_url,
            Input::Title => &mut self.title,
            Input::Description => &mut self.description,
            Input::Color => &mut self.color,
            Input::IconImage => &mut self.icon_image,
            Input::ThumbnailImage => &mut self.thumbnail_image,
        };
        *slot = value.into();
    }

    #[must_use]
    pub fn build_embed(&self) -> Embed {
        Embed {
            title: normalize_str(&self.title),
            description: normalize_str(&self.description),
            color: Color::parse_input(&self.color),
            footer: normalize_str(&self.icon_image).map(Footer::with_icon),
            thumbnail: normalize_str(&self.thumbnail_image).map(|url| Thumbnail { url }),
            fields: self.fields.to_fields(),
        }
    }

    #[must_use]
    pub fn collect_form_data(&self) -> FormData {
        FormData {
            webhook_url: self.webhook_url.trim().to_string(),
            embed: self.build_embed(),
        }
    }

    /// Writes a previously collected record back into the inputs.
    ///
    /// An empty webhook URL leaves the current one in place. At most
    /// [`MAX_FIELDS`] pairs are restored.
    pub fn set_form_data(&mut self, data: &FormData) {
        if !data.webhook_url.is_empty() {
            self.webhook_url.clone_from(&data.webhook_url);
        }

        let embed = &data.embed;
        self.title = embed.title.clone().unwrap_or_default();
        self.description = embed.description.clone().unwrap_or_default();
        self.color = embed.color.to_hex_input();
        self.icon_image = embed
            .footer
            .as_ref()
            .map(|x| x.icon_url.clone())
            .unwrap_or_default();
        self.thumbnail_image = embed
            .thumbnail
            .as_ref()
            .map(|x| x.url.clone())
            .unwrap_or_default();

        self.fields.clear();
        for field in embed.fields.iter().take(MAX_FIELDS) {
            let input = FieldInput::new(&field.name, &field.value);
            if self.fields.add(input).is_err() {
                break;
            }
        }
    }
}

fn normalize_str(string: &str) -> Option<String> {
    let s = string.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discord::embed::Field;

    fn filled_form() -> Form {
        let mut form = Form {
            webhook_url: " https://discord.com/api/webhooks/1/abc ".into(),
            title: "  Release  ".into(),
            description: "Notes".into(),
            color: "#1a2b3c".into(),
            icon_image: "https://i/icon.png".into(),
            thumbnail_image: "https://i/thumb.png".into(),
            fields: FieldList::default(),
        };
        form.fields.add(FieldInput::new("Version", "1.2")).unwrap();
        form.fields.add(FieldInput::new("Channel", "stable")).unwrap();
        form
    }

    #[test]
    fn blank_inputs_are_omitted() {
        let form = Form {
            title: "   ".into(),
            color: String::new(),
            ..Form::default()
        };
        let embed = form.build_embed();
        assert_eq!(embed, Embed::default());
        assert_eq!(embed.color, Color::WHITE);
    }

    #[test]
    fn builds_trimmed_embed() {
        let embed = filled_form().build_embed();
        assert_eq!(embed.title.as_deref(), Some("Release"));
        assert_eq!(embed.color.to_discord(), 0x1a_2b3c);
        assert_eq!(embed.footer, Some(Footer::with_icon("https://i/icon.png")));
        assert_eq!(embed.fields[1], Field::new("Channel", "stable"));
    }

    #[test]
    fn collect_trims_webhook_url() {
        let data = filled_form().collect_form_data();
        assert_eq!(data.webhook_url, "https://discord.com/api/webhooks/1/abc");
    }

    #[test]
    fn restore_reproduces_visible_values() {
        let original = filled_form();
        let data = original.collect_form_data();

        let mut restored = Form::default();
        restored.set_form_data(&data);

        assert_eq!(restored.collect_form_data(), data);
        assert_eq!(restored.title, "Release");
        assert_eq!(restored.color, "#1a2b3c");
        assert_eq!(restored.fields, original.fields);
    }

    #[test]
    fn restore_from_stored_record() {
        let json = r#"{"webhookUrl":"https://x","embed":{"title":"T","color":255}}"#;
        let data: FormData = serde_json::from_str(json).unwrap();

        let mut form = filled_form();
        form.set_form_data(&data);

        assert_eq!(form.webhook_url, "https://x");
        assert_eq!(form.title, "T");
        assert_eq!(form.color, "#0000ff");
        assert_eq!(form.description, "");
        assert_eq!(form.icon_image, "");
        assert!(form.fields.is_empty());
    }

    #[test]
    fn restore_keeps_webhook_when_record_has_none() {
        let data = FormData::default();
        let mut form = filled_form();
        form.set_form_data(&data);
        assert_eq!(form.webhook_url, " https://discord.com/api/webhooks/1/abc ");
        assert_eq!(form.color, "#ffffff");
    }

    #[test]
    fn restore_caps_fields() {
        let mut data = FormData::default();
        data.embed.fields = (0..8).map(|i| Field::new(format!("n{i}"), "v")).collect();

        let mut form = Form::default();
        form.set_form_data(&data);

        assert_eq!(form.fields.len(), MAX_FIELDS);
        assert_eq!(form.fields.get(4).unwrap().name, "n4");
    }

    #[test]
    fn parses_input_names() {
        assert_eq!("Title".parse::<Input>().unwrap(), Input::Title);
        assert_eq!("webhook".parse::<Input>().unwrap(), Input::WebhookUrl);
        assert!("footer".parse::<Input>().is_err());
    }
}

use anyhow::{Context, Result};

use crate::discord::embed::Embed;

/// Formats the embed as indented JSON for display.
pub fn render(embed: &Embed) -> Result<String> {
    serde_json::to_string_pretty(embed).context("Could not serialize embed for preview")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldInput, Form};

    #[test]
    fn renders_indented_json() {
        let mut form = Form {
            title: "Hello".into(),
            color: "#0000ff".into(),
            ..Form::default()
        };
        form.fields.add(FieldInput::new("k", "v")).unwrap();

        let text = render(&form.build_embed()).unwrap();
        let expected = r#"{
  "title": "Hello",
  "color": 255,
  "fields": [
    {
      "name": "k",
      "value": "v"
    }
  ]
}"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn default_form_shows_only_color() {
        let text = render(&Form::default().build_embed()).unwrap();
        assert_eq!(text, "{\n  \"color\": 16777215\n}");
    }
}

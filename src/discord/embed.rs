mod color;
mod field;

use serde::{Deserialize, Serialize};

use crate::json_util::{parse_string, parse_vec};

pub use color::Color;
pub use field::Field;

/// The message payload sent to a webhook.
///
/// Optional parts are left out of the JSON entirely instead of being sent empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub color: Color,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Thumbnail>,

    #[serde(
        default,
        deserialize_with = "parse_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    #[serde(default, deserialize_with = "parse_string")]
    pub icon_url: String,

    /// Always written, the editor has no input for it.
    #[serde(default, deserialize_with = "parse_string")]
    pub text: String,
}

impl Footer {
    #[must_use]
    pub fn with_icon(icon_url: impl Into<String>) -> Self {
        Self {
            icon_url: icon_url.into(),
            text: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default, deserialize_with = "parse_string")]
    pub url: String,
}

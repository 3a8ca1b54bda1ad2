use serde::{Deserialize, Serialize};

use crate::json_util::parse_string;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, deserialize_with = "parse_string")]
    pub name: String,

    #[serde(default, deserialize_with = "parse_string")]
    pub value: String,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

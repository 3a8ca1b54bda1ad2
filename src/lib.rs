#![deny(unexpected_cfgs)]
//
#![warn(clippy::cargo)]
#![warn(clippy::nursery)]
//
// https://github.com/rust-lang/rust-clippy/issues/16440
#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};

use crate::discord::embed::Embed;

mod json_util;

pub mod discord;
pub mod form;
pub mod preview;
pub mod session;
pub mod share;
pub mod storage;

pub use form::{Form, Input, MAX_FIELDS};
pub use session::Session;

/// A webhook destination together with its embed.
///
/// This is what gets saved, shared and loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    #[serde(default, deserialize_with = "json_util::parse_string")]
    pub webhook_url: String,

    #[serde(default, deserialize_with = "json_util::parse_or_default")]
    pub embed: Embed,
}

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::Url;

use crate::{FormData, json_util::improve_json_error};

pub const DATA_PARAM: &str = "data";

/// JSON, then percent-encoding, then base64.
pub fn encode_data(data: &FormData) -> Result<String> {
    let json = serde_json::to_string(data).context("Could not serialize form data")?;
    let escaped = urlencoding::encode(&json);
    Ok(STANDARD.encode(escaped.as_bytes()))
}

/// Reverses [`encode_data`].
///
/// Spaces are read as `+`, which is what a raw base64 value turns into
/// when it was pasted into a query string without escaping.
pub fn decode_data(encoded: &str) -> Result<FormData> {
    let encoded = encoded.trim().replace(' ', "+");
    let bytes = STANDARD
        .decode(encoded.as_bytes())
        .context("Share data is not valid base64")?;
    let escaped = String::from_utf8(bytes).context("Share data is not valid UTF-8")?;
    let json = urlencoding::decode(&escaped).context("Share data is not properly escaped")?;
    let data: FormData = serde_json::from_str(&json)
        .map_err(|e| improve_json_error(&e, &json))
        .context("Share data is not valid form data")?;
    Ok(data)
}

/// Builds `<page>?data=<encoded>`, dropping any query or fragment of the page URL.
pub fn share_url(page_url: &Url, data: &FormData) -> Result<Url> {
    let encoded = encode_data(data)?;
    let mut url = page_url.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut().append_pair(DATA_PARAM, &encoded);
    Ok(url)
}

#[must_use]
pub fn data_param(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == DATA_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Reads form data from a share link.
///
/// `Ok(None)` means the link carries no data at all.
pub fn data_from_url(url: &Url) -> Result<Option<FormData>> {
    let Some(encoded) = data_param(url) else {
        return Ok(None);
    };
    decode_data(&encoded).map(Some)
}

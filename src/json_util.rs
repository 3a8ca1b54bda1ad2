use anyhow::anyhow;
use serde::{Deserialize, Deserializer};

/// Deserializes a Vec, using an empty Vec if the field is null
pub fn parse_vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

/// Deserializes a value, using its default if the field is null
pub fn parse_or_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Deserializes a String, using an empty String if the field is null
pub fn parse_string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// Attaches the text surrounding the failing column to a JSON error.
pub fn improve_json_error(err: &serde_json::Error, json_string: &str) -> anyhow::Error {
    if err.line() != 1 {
        // Pretty-printed input; the column alone is not much help here
        return anyhow!("{err}");
    }

    let col = err.column();
    let start = floor_char_boundary(json_string, col.saturating_sub(50));
    let end = floor_char_boundary(json_string, col + 50);
    let start_ell = if start == 0 { "" } else { "..." };
    let end_ell = if end == json_string.len() { "" } else { "..." };

    let snippet = &json_string[start..end];
    anyhow!("{err} | {start_ell}{snippet}{end_ell}")
}

fn floor_char_boundary(string: &str, index: usize) -> usize {
    let mut index = index.min(string.len());
    while !string.is_char_boundary(index) {
        index -= 1;
    }
    index
}

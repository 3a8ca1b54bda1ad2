use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{FormData, json_util::improve_json_error};

pub const STORAGE_KEY: &str = "embedEditorData";

const APP_DIR_NAME: &str = "embed-editor";

/// A key/value text store backed by one file per key.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Uses the platform's local data directory.
    ///
    /// # Errors
    /// No local data directory is known for this platform.
    pub fn default_location() -> Result<Self> {
        let base = dirs::data_local_dir().context("Could not determine local data directory")?;
        Ok(Self::new(base.join(APP_DIR_NAME)))
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Could not read {}", path.display())),
        }
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Could not create directory {}", self.dir.display()))?;
        let path = self.path_for(key);
        log::debug!("Writing {}", path.display());
        fs::write(&path, value).with_context(|| format!("Could not write {}", path.display()))
    }

    /// Stores a snapshot of the form data under [`STORAGE_KEY`].
    pub fn save(&self, data: &FormData) -> Result<()> {
        let text = serde_json::to_string(data).context("Could not serialize form data")?;
        self.set_item(STORAGE_KEY, &text)
    }

    /// Reads the stored snapshot back. `Ok(None)` means nothing was saved yet.
    ///
    /// # Errors
    /// The stored text could not be read or is not valid form data.
    pub fn load(&self) -> Result<Option<FormData>> {
        let Some(text) = self.get_item(STORAGE_KEY)? else {
            return Ok(None);
        };
        let data: FormData = serde_json::from_str(&text)
            .map_err(|e| improve_json_error(&e, &text))
            .context("Stored form data is malformed")?;
        Ok(Some(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discord::embed::{Color, Embed, Field};

    fn sample() -> FormData {
        let mut data = FormData {
            webhook_url: "https://discord.com/api/webhooks/1/abc".into(),
            ..FormData::default()
        };
        data.embed.title = Some("Saved".into());
        data.embed.color = Color::new(1, 2, 3);
        data.embed.fields = vec![Field::new("a", "b")];
        data
    }

    #[test]
    fn load_without_save_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("nested"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("nested"));
        store.save(&sample()).unwrap();
        assert!(dir.path().join("nested/embedEditorData.json").is_file());
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        store.save(&sample()).unwrap();
        store.save(&FormData::default()).unwrap();
        assert_eq!(store.load().unwrap(), Some(FormData::default()));
    }

    #[test]
    fn malformed_text_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        store.set_item(STORAGE_KEY, "{not json").unwrap();
        let err = store.load().unwrap_err();
        assert!(format!("{err:#}").contains("malformed"));
    }

    #[test]
    fn reads_record_written_by_hand() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        store
            .set_item(
                STORAGE_KEY,
                r#"{"webhookUrl":"https://x","embed":{"title":"T","color":255}}"#,
            )
            .unwrap();
        let data = store.load().unwrap().unwrap();
        assert_eq!(data.webhook_url, "https://x");
        assert_eq!(data.embed.color.to_hex_input(), "#0000ff");
    }

    #[test]
    fn null_embed_parts_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        store
            .set_item(
                STORAGE_KEY,
                r#"{"webhookUrl":"https://x","embed":{"title":"T","color":255,"fields":null}}"#,
            )
            .unwrap();
        let data = store.load().unwrap().unwrap();
        assert_eq!(data.embed.title.as_deref(), Some("T"));
        assert!(data.embed.fields.is_empty());

        store
            .set_item(STORAGE_KEY, r#"{"webhookUrl":"https://x","embed":null}"#)
            .unwrap();
        let data = store.load().unwrap().unwrap();
        assert_eq!(data.webhook_url, "https://x");
        assert_eq!(data.embed, Embed::default());

        store
            .set_item(STORAGE_KEY, r#"{"webhookUrl":null,"embed":{"fields":null}}"#)
            .unwrap();
        assert_eq!(store.load().unwrap(), Some(FormData::default()));
    }
}

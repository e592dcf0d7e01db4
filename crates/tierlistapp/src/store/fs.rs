use super::backend::StateBackend;
use crate::error::{Result, TierError};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Filesystem backend: one `<key>.json` file per key inside `root`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(TierError::Io)?;
        }
        Ok(())
    }
}

impl StateBackend for FsBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(TierError::Io)?;
        Ok(Some(content))
    }

    fn save(&self, key: &str, text: &str) -> Result<()> {
        self.ensure_dir()?;

        let tmp_file = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_file, text).map_err(TierError::Io)?;
        fs::rename(&tmp_file, self.key_path(key)).map_err(TierError::Io)?;
        Ok(())
    }

    fn location(&self, key: &str) -> PathBuf {
        self.key_path(key)
    }
}

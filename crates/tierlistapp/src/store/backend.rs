use crate::error::Result;
use std::path::PathBuf;

/// Abstract key/value storage for persisted state.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`super::persisted`] handles the "what" (record shapes, tolerance of
/// corrupt content).
pub trait StateBackend {
    /// Read the raw text stored under `key`.
    /// Returns Ok(None) when nothing has been stored yet.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `text` under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save(&self, key: &str, text: &str) -> Result<()>;

    /// Location of the stored value, real or virtual.
    fn location(&self, key: &str) -> PathBuf;
}

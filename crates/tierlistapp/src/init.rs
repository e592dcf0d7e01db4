//! # Startup
//!
//! Resolves where state lives and wires the library together for a client.
//!
//! ## Data Directory
//!
//! 1. An explicit override (the CLI's `--data`) is used as is.
//! 2. Otherwise `TIERLIST_DATA`, if set. Tests use this to isolate state.
//! 3. Otherwise the OS data directory from [`directories::ProjectDirs`].
//!
//! The data directory holds `tierlist.toml` plus one JSON file per stored key
//! (`tierlist_state_v1.json`, `hero_filter_v1.json`).
//!
//! ## Catalog
//!
//! The catalog file comes from the explicit override, else the config's
//! `catalog_path`, else `catalog.json` inside the data directory.

use crate::api::{ApiOptions, TierlistApi};
use crate::catalog::{CatalogIndex, CatalogSource};
use crate::codec::GzipCompressor;
use crate::config::TierlistConfig;
use crate::error::{Result, TierError};
use crate::reorder::DragOptions;
use crate::store::fs::FsBackend;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DATA_ENV: &str = "TIERLIST_DATA";
pub const DEFAULT_CATALOG_FILENAME: &str = "catalog.json";

pub struct TierlistContext {
    pub api: TierlistApi<FsBackend, GzipCompressor>,
    pub config: TierlistConfig,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "tierlist", "tierlist")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| TierError::Config("could not determine a data directory".to_string()))
}

pub fn resolve_catalog_path(
    catalog_override: Option<PathBuf>,
    config: &TierlistConfig,
    data_dir: &Path,
) -> PathBuf {
    catalog_override
        .or_else(|| config.catalog_path.clone())
        .unwrap_or_else(|| data_dir.join(DEFAULT_CATALOG_FILENAME))
}

/// Loads config and catalog, then opens the API on the data directory.
pub fn initialize(
    data_override: Option<PathBuf>,
    catalog_override: Option<PathBuf>,
) -> Result<TierlistContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = TierlistConfig::load(&data_dir)?;
    let catalog_path = resolve_catalog_path(catalog_override, &config, &data_dir);
    debug!(data = %data_dir.display(), catalog = %catalog_path.display(), "initializing");

    let source = CatalogSource::load(&catalog_path)?;
    let catalog = CatalogIndex::build(source, &config.ordering_rules());
    let options = ApiOptions {
        share_base_url: config.share_base_url.clone(),
        drag: DragOptions {
            coalesce: true,
            scroll: config.scroll_params(),
        },
    };
    let api = TierlistApi::open(catalog, FsBackend::new(data_dir.clone()), GzipCompressor, options);

    Ok(TierlistContext {
        api,
        config,
        data_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_data_dir_wins() {
        let dir = PathBuf::from("/tmp/somewhere");
        assert_eq!(resolve_data_dir(Some(dir.clone())).unwrap(), dir);
    }

    #[test]
    fn test_catalog_path_precedence() {
        let data = Path::new("/data");
        let mut config = TierlistConfig::default();
        assert_eq!(
            resolve_catalog_path(None, &config, data),
            PathBuf::from("/data/catalog.json")
        );

        config.catalog_path = Some(PathBuf::from("/cfg/cat.json"));
        assert_eq!(
            resolve_catalog_path(None, &config, data),
            PathBuf::from("/cfg/cat.json")
        );
        assert_eq!(
            resolve_catalog_path(Some(PathBuf::from("/flag.json")), &config, data),
            PathBuf::from("/flag.json")
        );
    }

    #[test]
    fn test_initialize_without_catalog_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = initialize(Some(dir.path().to_path_buf()), None).err().unwrap();
        assert!(matches!(err, TierError::NotFound(_)));
    }
}

//! # Configuration
//!
//! Tierlist settings are loaded with [`confique`] from, in priority order:
//!
//! 1. **Environment variables**: `TIERLIST_SHARE_BASE_URL`, `TIERLIST_SHORTEN_LINKS`, ...
//! 2. **Config file**: `<data dir>/tierlist.toml`
//! 3. **Compiled defaults**: `#[config(default = ...)]` below
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `catalog_path` | unset | Catalog JSON (`{items, powers, roles, abilities}`) |
//! | `share_base_url` | `https://tierlist.local/` | Base URL for share links |
//! | `shorten_links` | `false` | Shorten share links through `shortener_endpoint` |
//! | `shortener_endpoint` | `https://is.gd/create.php` | is.gd compatible endpoint |
//! | `shortener_timeout_secs` | `5` | Bound on the shortening request |
//! | `ultimate_less_hero` | `Pharah` | Hero whose ability-less powers sort last |
//! | `scroll_margin` | `128` | Auto-scroll edge band |
//! | `scroll_max_speed` | `8` | Auto-scroll units per frame at the edge |
//! | `scroll_accel` | `1.0` | Auto-scroll speed multiplier |

use crate::catalog::{OrderingRules, DEFAULT_ULTIMATE_LESS_HERO};
use crate::error::{Result, TierError};
use crate::reorder::ScrollParams;
use crate::share::{IsGdShortener, DEFAULT_SHORTENER_ENDPOINT};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "tierlist.toml";
pub const DEFAULT_SHARE_BASE_URL: &str = "https://tierlist.local/";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TierlistConfig {
    /// Catalog JSON file. The CLI's `--catalog` flag overrides it.
    #[config(env = "TIERLIST_CATALOG")]
    pub catalog_path: Option<PathBuf>,

    #[config(default = "https://tierlist.local/", env = "TIERLIST_SHARE_BASE_URL")]
    pub share_base_url: String,

    #[config(default = false, env = "TIERLIST_SHORTEN_LINKS")]
    pub shorten_links: bool,

    #[config(default = "https://is.gd/create.php", env = "TIERLIST_SHORTENER_ENDPOINT")]
    pub shortener_endpoint: String,

    #[config(default = 5, env = "TIERLIST_SHORTENER_TIMEOUT_SECS")]
    pub shortener_timeout_secs: u64,

    /// Empty disables the special case.
    #[config(default = "Pharah", env = "TIERLIST_ULTIMATE_LESS_HERO")]
    pub ultimate_less_hero: String,

    #[config(default = 128.0, env = "TIERLIST_SCROLL_MARGIN")]
    pub scroll_margin: f64,

    #[config(default = 8.0, env = "TIERLIST_SCROLL_MAX_SPEED")]
    pub scroll_max_speed: f64,

    #[config(default = 1.0, env = "TIERLIST_SCROLL_ACCEL")]
    pub scroll_accel: f64,
}

impl Default for TierlistConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            shorten_links: false,
            shortener_endpoint: DEFAULT_SHORTENER_ENDPOINT.to_string(),
            shortener_timeout_secs: 5,
            ultimate_less_hero: DEFAULT_ULTIMATE_LESS_HERO.to_string(),
            scroll_margin: 128.0,
            scroll_max_speed: 8.0,
            scroll_accel: 1.0,
        }
    }
}

impl TierlistConfig {
    /// Loads env vars layered over `<data_dir>/tierlist.toml` (if present).
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(data_dir.join(CONFIG_FILENAME))
            .load()
            .map_err(|e| TierError::Config(e.to_string()))
    }

    /// Like [`TierlistConfig::load`], without environment variables.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::builder()
            .file(path)
            .load()
            .map_err(|e| TierError::Config(e.to_string()))
    }

    pub fn ordering_rules(&self) -> OrderingRules {
        let hero = self.ultimate_less_hero.trim();
        OrderingRules {
            ultimate_less_hero: (!hero.is_empty()).then(|| hero.to_string()),
        }
    }

    pub fn scroll_params(&self) -> ScrollParams {
        ScrollParams {
            margin: self.scroll_margin,
            max_speed: self.scroll_max_speed,
            accel: self.scroll_accel,
        }
    }

    pub fn shortener(&self) -> IsGdShortener {
        IsGdShortener::new(
            self.shortener_endpoint.clone(),
            Duration::from_secs(self.shortener_timeout_secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = TierlistConfig::default();
        assert_eq!(config.share_base_url, "https://tierlist.local/");
        assert!(!config.shorten_links);
        assert_eq!(config.scroll_params(), ScrollParams::default());
        assert_eq!(config.ordering_rules(), OrderingRules::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TierlistConfig::from_file(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, TierlistConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            "share_base_url = \"https://tiers.example/app\"\nshorten_links = true\nscroll_accel = 2.5\n",
        )
        .unwrap();

        let config = TierlistConfig::from_file(&path).unwrap();
        assert_eq!(config.share_base_url, "https://tiers.example/app");
        assert!(config.shorten_links);
        assert_eq!(config.scroll_params().accel, 2.5);
        assert_eq!(config.scroll_margin, 128.0);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "shorten_links = \"maybe\"").unwrap();
        let err = TierlistConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, TierError::Config(_)));
    }

    #[test]
    fn test_blank_ultimate_less_hero_disables_rule() {
        let config = TierlistConfig {
            ultimate_less_hero: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.ordering_rules().ultimate_less_hero, None);
    }
}

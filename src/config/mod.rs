//! User settings and persisted calculator state.
//!
//! Settings come from `<config_dir>/zcalc/config.toml`; the snapshot of
//! memory, history and modes lives in [`persistence`].

pub mod persistence;

pub use persistence::{LoadError, Snapshot, load_snapshot, restore_session, save_snapshot};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculator::{AngleMode, DEFAULT_MAX_HISTORY_ITEMS};

/// Highest supported number of fractional digits.
pub const MAX_PRECISION: u32 = 15;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// Engine settings.
///
/// ```toml
/// precision = 10
/// thousands_separator = false
/// max_history_items = 100
/// angle_mode = "RAD"
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fractional digits kept in results.
    pub precision: u32,
    /// Group the integer part of displayed numbers by thousands.
    pub thousands_separator: bool,
    /// History entries kept, newest first.
    pub max_history_items: usize,
    /// Angle mode used when no saved state says otherwise.
    pub angle_mode: AngleMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            precision: MAX_PRECISION,
            thousands_separator: true,
            max_history_items: DEFAULT_MAX_HISTORY_ITEMS,
            angle_mode: AngleMode::Deg,
        }
    }
}

impl Settings {
    /// Load settings from the default location.
    ///
    /// Returns `Ok(None)` when there is no config file (or no resolvable
    /// config directory), so saved settings can stay in effect.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path).map(Some),
            _ => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(settings.validated())
    }

    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
    }

    /// Clamp out-of-range values, logging each adjustment.
    pub fn validated(mut self) -> Self {
        if self.precision > MAX_PRECISION {
            warn!(
                precision = self.precision,
                "precision above {}, clamping", MAX_PRECISION
            );
            self.precision = MAX_PRECISION;
        }
        if self.max_history_items == 0 {
            warn!("max_history_items must be at least 1, using 1");
            self.max_history_items = 1;
        }
        self
    }
}

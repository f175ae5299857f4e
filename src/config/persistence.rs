//! Saved calculator state.
//!
//! A [`Snapshot`] holds what survives between sessions: memory, modes,
//! theme, history and settings. Loading is tolerant: any field that cannot
//! be decoded is dropped with a warning and replaced by its default, so one
//! bad value never costs the user their whole history.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::Settings;
use crate::calculator::{AngleMode, Calculator, HistoryEntry};

/// Why a snapshot could not be loaded at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no saved state at {path:?}")]
    Missing { path: PathBuf },

    #[error("failed to read saved state at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("saved state at {path:?} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("saved state at {path:?} is a JSON {found}, expected an object")]
    SchemaMismatch { path: PathBuf, found: &'static str },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub memory: f64,
    pub angle_mode: AngleMode,
    pub scientific_mode: bool,
    /// Opaque to the engine; kept for whichever front end draws it.
    pub theme: String,
    /// Newest first.
    pub history: Vec<HistoryEntry>,
    pub settings: Settings,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            memory: 0.0,
            angle_mode: AngleMode::default(),
            scientific_mode: false,
            theme: "light".to_string(),
            history: Vec::new(),
            settings: Settings::default(),
        }
    }
}

impl Snapshot {
    /// Capture the persistent parts of a calculator.
    pub fn capture(calculator: &Calculator, theme: impl Into<String>) -> Self {
        let settings = calculator.settings().clone();
        let mut history = calculator.history().to_vec();
        history.truncate(settings.max_history_items);

        Self {
            memory: calculator.memory(),
            angle_mode: calculator.angle_mode(),
            scientific_mode: calculator.scientific_mode(),
            theme: theme.into(),
            history,
            settings,
        }
    }

    /// Decode a snapshot field by field.
    fn from_object(mut fields: Map<String, Value>) -> Self {
        let mut snapshot = Self::default();

        if let Some(memory) = take_field::<f64>(&mut fields, "memory") {
            snapshot.memory = memory;
        }
        if let Some(angle_mode) = take_field::<AngleMode>(&mut fields, "angle_mode") {
            snapshot.angle_mode = angle_mode;
        }
        if let Some(scientific_mode) = take_field::<bool>(&mut fields, "scientific_mode") {
            snapshot.scientific_mode = scientific_mode;
        }
        if let Some(theme) = take_field::<String>(&mut fields, "theme") {
            snapshot.theme = theme;
        }
        if let Some(settings) = take_field::<Settings>(&mut fields, "settings") {
            snapshot.settings = settings.validated();
        }
        if let Some(entries) = take_field::<Vec<Value>>(&mut fields, "history") {
            snapshot.history = entries
                .into_iter()
                .filter_map(|entry| match serde_json::from_value(entry) {
                    Ok(entry) => Some(entry),
                    Err(err) => {
                        warn!(%err, "discarding unreadable history entry");
                        None
                    }
                })
                .take(snapshot.settings.max_history_items)
                .collect();
        }

        for key in fields.keys() {
            debug!(field = %key, "ignoring unknown snapshot field");
        }

        snapshot
    }
}

fn take_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    let raw = fields.remove(key)?;
    match serde_json::from_value(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(field = key, %err, "discarding unreadable snapshot field");
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Default location of the saved state file.
pub fn default_snapshot_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("zcalc").join("state.json"))
}

/// Load a snapshot, salvaging every readable field.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, LoadError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::Missing {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let value: Value = serde_json::from_str(&content).map_err(|source| LoadError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(fields) => Ok(Snapshot::from_object(fields)),
        other => Err(LoadError::SchemaMismatch {
            path: path.to_path_buf(),
            found: json_kind(&other),
        }),
    }
}

/// Rebuild a calculator from the state file at `path`.
///
/// Settings read from a config file take priority over the ones saved with
/// the state; with `None` the saved settings are kept. A missing or
/// unreadable state file starts a fresh calculator. Returns the calculator
/// and the saved theme.
pub fn restore_session(path: &Path, settings: Option<Settings>) -> (Calculator, String) {
    let snapshot = match load_snapshot(path) {
        Ok(snapshot) => snapshot,
        Err(LoadError::Missing { .. }) => Snapshot::default(),
        Err(err) => {
            warn!("{}; starting fresh", err);
            Snapshot::default()
        }
    };

    let theme = snapshot.theme.clone();
    let mut calculator = Calculator::restore(snapshot);
    if let Some(settings) = settings {
        calculator.update_settings(settings);
    }
    (calculator, theme)
}

/// Write a snapshot as JSON, creating the parent directory if needed.
pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut snapshot = snapshot.clone();
    snapshot
        .history
        .truncate(snapshot.settings.max_history_items);

    let serialized = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, serialized)?;

    debug!(path = ?path, entries = snapshot.history.len(), "saved calculator state");
    Ok(())
}

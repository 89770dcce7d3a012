//! Small JSON key/value store for settings that outlive a session.
//!
//! The file is a single JSON object. Keys are opaque here; callers decide
//! what they mean.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, ViewerError};

pub const DEFAULT_FILE_NAME: &str = "starting_variables.json";

#[derive(Debug, Clone)]
pub struct Preferences {
    path: PathBuf,
    values: Map<String, Value>,
    /// Set when `path` holds a file we could not parse; saves are skipped so
    /// the user's file is left as it is.
    read_only: bool,
}

impl Preferences {
    /// An empty store that will save to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            values: Map::new(),
            read_only: false,
        }
    }

    /// An empty in-memory store standing in for an unreadable `path`.
    /// Settings still apply for the session but are never written back.
    pub fn fallback(path: impl Into<PathBuf>) -> Self {
        Self {
            read_only: true,
            ..Self::empty(path)
        }
    }

    /// Read `path`. A missing file is an empty store, not an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No preferences at {:?}, starting empty", path);
                return Ok(Self::empty(path));
            }
            Err(source) => return Err(ViewerError::Io { path, source }),
        };
        let values = serde_json::from_str(&text)
            .map_err(|source| ViewerError::Preferences { path: path.clone(), source })?;
        Ok(Self {
            path,
            values,
            read_only: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Typed lookup. A value of the wrong shape is logged and treated as absent.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_value::<T>(value.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("Ignoring preference {:?} = {}: {}", key, value, e);
                None
            }
        }
    }

    pub fn set<V: Serialize>(&mut self, key: &str, value: V) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|source| ViewerError::Preferences {
            path: self.path.clone(),
            source,
        })?;
        self.values.insert(key.to_owned(), value);
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if self.read_only {
            log::warn!("Not saving preferences over unreadable {:?}", self.path);
            return Ok(());
        }
        let text = serde_json::to_string_pretty(&self.values).map_err(|source| {
            ViewerError::Preferences {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, text).map_err(|source| ViewerError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Update `key` and persist immediately.
    pub fn set_and_save<V: Serialize>(&mut self, key: &str, value: V) -> Result<()> {
        self.set(key, value)?;
        self.save()
    }
}

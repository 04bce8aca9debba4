//! Raw key/value environment with optional `.env` overlay.
//!
//! Values already present (normally exported by the shell) always win over
//! values read from the overlay file, so an overlay never clobbers an
//! exported variable.

use super::error::ConfigError;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Conventional overlay file in the working directory
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Template operators copy to create the overlay file
pub const ENV_TEMPLATE_FILE: &str = ".env.example";

/// Outcome of applying an overlay file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayStatus {
    /// File was read; `added` keys were not previously set
    Loaded { added: usize },
    Missing,
}

/// Flat string environment the resolver reads from
#[derive(Clone, Default)]
pub struct RawEnvironment {
    vars: HashMap<String, String>,
}

impl RawEnvironment {
    /// Snapshot of the live process environment
    pub fn from_process() -> Self {
        Self::from_os_pairs(std::env::vars_os())
    }

    /// Pairs that are not valid UTF-8 are skipped; no setting can use them
    pub fn from_os_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let vars = pairs
            .into_iter()
            .filter_map(|(k, v)| match (k.into_string(), v.into_string()) {
                (Ok(k), Ok(v)) => Some((k, v)),
                (Ok(k), Err(_)) => {
                    debug!("Skipping {}: value is not valid UTF-8", k);
                    None
                }
                (Err(k), _) => {
                    debug!("Skipping non UTF-8 variable {:?}", k);
                    None
                }
            })
            .collect();
        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Insert a value unless the key is already set
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.vars.contains_key(&key) {
            return false;
        }
        self.vars.insert(key, value.into());
        true
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Merge `KEY=VALUE` pairs from `path` without overriding existing keys.
    ///
    /// A missing file is not an error; the caller decides whether that matters.
    pub fn apply_overlay(&mut self, path: &Path) -> Result<OverlayStatus, ConfigError> {
        if !path.exists() {
            info!("No environment file at {}, using process environment only", path.display());
            return Ok(OverlayStatus::Missing);
        }

        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(e) if e.not_found() => return Ok(OverlayStatus::Missing),
            Err(source) => {
                return Err(ConfigError::Overlay {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let mut added = 0;
        for item in iter {
            let (key, value) = item.map_err(|source| ConfigError::Overlay {
                path: path.to_path_buf(),
                source,
            })?;
            if self.set_default(key, value) {
                added += 1;
            }
        }

        debug!("Loaded {} new key(s) from {}", added, path.display());
        Ok(OverlayStatus::Loaded { added })
    }
}

// Values may hold credentials, so only key names are shown
impl fmt::Debug for RawEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.vars.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("RawEnvironment").field("keys", &keys).finish()
    }
}

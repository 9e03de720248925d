//! Read/write permission gate for external config access.
//!
//! Two user-controlled flags decide whether external callers may read config
//! files and whether they may write them. Both default to off: config files
//! can carry credentials, so nothing is exposed until the user opts in.
//!
//! The provider only ever reads the flags. Changing them is the job of a
//! settings surface outside the provider (here, the `prefs` CLI command).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// File name of the persisted preferences store under the storage root.
pub const PREFERENCES_FILE: &str = "data.json";

/// Capability deciding whether external reads and writes are allowed.
///
/// Every data-exposing operation consults the gate before touching the
/// filesystem.
pub trait PermissionGate: Send + Sync {
    /// Whether external callers may list and read config files.
    fn can_read(&self) -> bool;

    /// Whether external callers may create or modify config files.
    fn can_write(&self) -> bool;
}

impl<G: PermissionGate + ?Sized> PermissionGate for std::sync::Arc<G> {
    fn can_read(&self) -> bool {
        (**self).can_read()
    }

    fn can_write(&self) -> bool {
        (**self).can_write()
    }
}

/// One of the two persisted permission flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionKey {
    /// External read access.
    Read,
    /// External write access.
    Write,
}

impl PermissionKey {
    /// Key under which the flag is persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionKey::Read => "allow_config_read",
            PermissionKey::Write => "allow_config_write",
        }
    }
}

/// Persisted key-value preference store holding the permission flags.
///
/// Every check reads the file afresh so a change made by another process is
/// seen on the next call. Anything short of an explicit `true` reads as
/// denied: a missing file, a missing key, a non-boolean value, or a file
/// that does not parse.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Create a store backed by the given file.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a flag, defaulting to `false`.
    pub fn get(&self, key: PermissionKey) -> bool {
        match self.read_map() {
            Ok(map) => map
                .get(key.as_str())
                .and_then(Value::as_bool)
                .unwrap_or(false),
            Err(e) => {
                tracing::warn!(
                    "Unreadable preferences at {:?}, treating {} as false: {:#}",
                    self.path,
                    key.as_str(),
                    e
                );
                false
            }
        }
    }

    /// Persist a flag.
    ///
    /// Other keys in the file are preserved. The write goes through a temp
    /// file and a rename so readers never see a partial file.
    pub fn set(&self, key: PermissionKey, value: bool) -> Result<()> {
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.as_str().to_string(), Value::Bool(value));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!(
                    "Failed to create preferences directory: {}",
                    parent.display()
                )
            })?;
        }

        let contents = serde_json::to_string_pretty(&Value::Object(map))
            .context("Failed to serialize preferences")?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &contents).with_context(|| {
            format!(
                "Failed to write temp preferences file: {}",
                temp_path.display()
            )
        })?;

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename temp preferences file {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        tracing::info!("Set {} = {} in {:?}", key.as_str(), value, self.path);
        Ok(())
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read preferences file: {}", self.path.display())
                })
            }
        };

        let value: Value = serde_json::from_str(&contents).with_context(|| {
            format!("Failed to parse preferences file: {}", self.path.display())
        })?;

        match value {
            Value::Object(map) => Ok(map),
            _ => anyhow::bail!("Preferences file is not a JSON object: {}", self.path.display()),
        }
    }
}

impl PermissionGate for PreferenceStore {
    fn can_read(&self) -> bool {
        self.get(PermissionKey::Read)
    }

    fn can_write(&self) -> bool {
        self.get(PermissionKey::Write)
    }
}

/// In-memory permission flags.
#[derive(Debug, Default)]
pub struct StaticPermissions {
    read: AtomicBool,
    write: AtomicBool,
}

impl StaticPermissions {
    /// Create flags with the given initial values.
    pub fn new(read: bool, write: bool) -> Self {
        Self {
            read: AtomicBool::new(read),
            write: AtomicBool::new(write),
        }
    }

    /// Both flags off.
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// Both flags on.
    pub fn allow_all() -> Self {
        Self::new(true, true)
    }

    /// Change the read flag.
    pub fn set_read(&self, allowed: bool) {
        self.read.store(allowed, Ordering::Relaxed);
    }

    /// Change the write flag.
    pub fn set_write(&self, allowed: bool) {
        self.write.store(allowed, Ordering::Relaxed);
    }
}

impl PermissionGate for StaticPermissions {
    fn can_read(&self) -> bool {
        self.read.load(Ordering::Relaxed)
    }

    fn can_write(&self) -> bool {
        self.write.load(Ordering::Relaxed)
    }
}

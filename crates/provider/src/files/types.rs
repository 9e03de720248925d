//! Config types and their directories.
//!
//! The set of config types is closed: frp client configs and frp server
//! configs. Each type owns exactly one directory under the storage root,
//! named after its token.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A category of config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
    /// frp client configuration.
    Frpc,
    /// frp server configuration.
    Frps,
}

impl ConfigType {
    /// Every type, in declaration order. Listings follow this order.
    pub const ALL: [ConfigType; 2] = [ConfigType::Frpc, ConfigType::Frps];

    /// The token used in URIs and as the directory name.
    pub fn token(&self) -> &'static str {
        match self {
            ConfigType::Frpc => "frpc",
            ConfigType::Frps => "frps",
        }
    }

    /// Resolve a token to a type.
    ///
    /// Matching is exact and case-sensitive. There is no fallback: an unknown
    /// token resolves to nothing.
    pub fn resolve(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.token() == token)
    }
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Maps config types to directories under a storage root.
///
/// Resolution is a pure path computation; it never checks for or creates the
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeResolver {
    root: PathBuf,
}

impl TypeResolver {
    /// Create a resolver for the given storage root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a token to a type. See [`ConfigType::resolve`].
    pub fn resolve(&self, token: &str) -> Option<ConfigType> {
        ConfigType::resolve(token)
    }

    /// Directory holding every entry of `ty`.
    pub fn directory_for(&self, ty: ConfigType) -> PathBuf {
        self.root.join(ty.token())
    }

    /// Path of the entry `name` of type `ty`.
    ///
    /// Returns `None` if `name` is not a valid entry name.
    pub fn entry_path(&self, ty: ConfigType, name: &str) -> Option<PathBuf> {
        is_valid_name(name).then(|| self.directory_for(ty).join(name))
    }
}

/// Whether `name` can address a file directly inside a type directory.
///
/// Names must be non-blank, must not be `.` or `..`, and must not contain a
/// path separator of the host platform or NUL. On Unix a backslash is an
/// ordinary file name character.
pub fn is_valid_name(name: &str) -> bool {
    if name.trim().is_empty() || name == "." || name == ".." {
        return false;
    }
    !name.chars().any(|c| std::path::is_separator(c) || c == '\0')
}

//! File open modes.
//!
//! Callers pass one of the canonical mode strings `r`, `w`, `wt`, `wa`, `rw`,
//! `rwt`. Each maps onto a fixed combination of access, create, truncate and
//! append flags.

use std::fmt;
use std::fs::OpenOptions;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// A parsed open mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpenMode {
    /// `r`: read only; the file must already exist.
    #[serde(rename = "r")]
    Read,
    /// `w`: write only, create, truncate.
    #[serde(rename = "w")]
    Write,
    /// `wt`: write only, create, truncate.
    #[serde(rename = "wt")]
    WriteTruncate,
    /// `wa`: write only, create, append.
    #[serde(rename = "wa")]
    WriteAppend,
    /// `rw`: read and write, create.
    #[serde(rename = "rw")]
    ReadWrite,
    /// `rwt`: read and write, create, truncate.
    #[serde(rename = "rwt")]
    ReadWriteTruncate,
}

impl OpenMode {
    /// Every mode, in canonical order.
    pub const ALL: [OpenMode; 6] = [
        OpenMode::Read,
        OpenMode::Write,
        OpenMode::WriteTruncate,
        OpenMode::WriteAppend,
        OpenMode::ReadWrite,
        OpenMode::ReadWriteTruncate,
    ];

    /// The canonical mode string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenMode::Read => "r",
            OpenMode::Write => "w",
            OpenMode::WriteTruncate => "wt",
            OpenMode::WriteAppend => "wa",
            OpenMode::ReadWrite => "rw",
            OpenMode::ReadWriteTruncate => "rwt",
        }
    }

    /// Whether opening in this mode may modify the filesystem.
    ///
    /// Anything that writes, appends or truncates is write-class; only `r`
    /// is read-class.
    pub fn is_write(&self) -> bool {
        let mode = self.as_str();
        mode.contains('w') || mode.contains('a') || mode.contains('t')
    }

    /// Host open options for this mode.
    pub fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            OpenMode::Read => {
                options.read(true);
            }
            OpenMode::Write | OpenMode::WriteTruncate => {
                options.write(true).create(true).truncate(true);
            }
            OpenMode::WriteAppend => {
                options.append(true).create(true);
            }
            OpenMode::ReadWrite => {
                options.read(true).write(true).create(true);
            }
            OpenMode::ReadWriteTruncate => {
                options.read(true).write(true).create(true).truncate(true);
            }
        }
        options
    }
}

impl FromStr for OpenMode {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpenMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ProviderError::InvalidMode(s.to_string()))
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! File handle issuance for single config entries.
//!
//! Opening follows a fixed order: validate the address, classify the mode,
//! consult the permission gate, and only then touch the filesystem. A denied
//! caller therefore learns nothing about whether the target exists.
//!
//! A successful open hands the [`File`] to the caller. The issuer keeps no
//! reference to it and does no bookkeeping across calls.

use std::fs::{self, File};
use std::io::{self, ErrorKind};

use protocol::{OpenMode, ProviderError, Result, Route};

use super::permissions::PermissionGate;
use super::types::{is_valid_name, TypeResolver};

/// Opens config files on behalf of external callers.
#[derive(Debug, Clone)]
pub struct HandleIssuer {
    resolver: TypeResolver,
}

impl HandleIssuer {
    /// Create an issuer over the given resolver.
    pub fn new(resolver: TypeResolver) -> Self {
        Self { resolver }
    }

    /// Open the entry addressed by `route` in `mode`.
    ///
    /// Write-class modes create the type directory if needed and may create
    /// the file. Read-class opens require the file to exist already.
    pub fn open<G>(&self, gate: &G, route: &Route, mode: &str) -> Result<File>
    where
        G: PermissionGate + ?Sized,
    {
        let Route::SingleItem { type_token, name } = route else {
            return Err(ProviderError::FileNotFound(format!(
                "Unsupported route: {}",
                route.kind()
            )));
        };

        let ty = self
            .resolver
            .resolve(type_token)
            .ok_or_else(|| ProviderError::FileNotFound(format!("Invalid type: {type_token}")))?;

        if !is_valid_name(name) {
            return Err(ProviderError::FileNotFound("Invalid name".to_string()));
        }

        let mode: OpenMode = mode.parse()?;
        let is_write = mode.is_write();

        if is_write && !gate.can_write() {
            tracing::warn!("Denied {} open of {}/{}: writes disabled", mode, ty, name);
            return Err(ProviderError::PermissionDenied(
                "Config write not allowed".to_string(),
            ));
        }
        if !is_write && !gate.can_read() {
            tracing::warn!("Denied {} open of {}/{}: reads disabled", mode, ty, name);
            return Err(ProviderError::PermissionDenied(
                "Config read not allowed".to_string(),
            ));
        }

        let dir = self.resolver.directory_for(ty);
        if is_write {
            // create_dir_all treats a directory created concurrently as success.
            fs::create_dir_all(&dir)?;
        }

        let path = dir.join(name);
        if !is_write {
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => {
                    return Err(ProviderError::FileNotFound(format!(
                        "Not a regular file: {ty}/{name}"
                    )))
                }
                Err(e) if is_absent(&e) => {
                    return Err(ProviderError::FileNotFound(format!(
                        "File not found: {ty}/{name}"
                    )))
                }
                Err(e) => return Err(e.into()),
            }
        }

        let file = mode.open_options().open(&path).map_err(|e| {
            if is_absent(&e) {
                ProviderError::FileNotFound(format!("File not found: {ty}/{name}"))
            } else {
                ProviderError::Io(e)
            }
        })?;

        tracing::debug!("Opened {:?} in mode {}", path, mode);
        Ok(file)
    }
}

/// Errors meaning nothing openable exists at the path.
fn is_absent(error: &io::Error) -> bool {
    matches!(error.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}

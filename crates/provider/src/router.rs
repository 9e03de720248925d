//! Provider facade dispatching URI requests to the file access layer.
//!
//! This module provides the `ConfigProvider` struct that receives query, type
//! and open requests, classifies their URIs, applies the permission gate and
//! hands them to the listing engine or the handle issuer. Insert, update and
//! delete are rejected outright: the provider exposes files, not a mutable
//! record store.

use std::fs::File;

use protocol::{ProviderError, Result, Route, RowSet, UriRouter};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::files::{HandleIssuer, ListingEngine, PermissionGate, PreferenceStore, TypeResolver};

/// Permission-gated access to config files, addressed by URI.
///
/// Every call is independent. The provider holds no per-call state and no
/// cache, so one instance can be shared freely across threads.
pub struct ConfigProvider<G: PermissionGate> {
    /// URI classification for this provider's authority.
    router: UriRouter,
    /// Enumerates and probes entries.
    listing: ListingEngine,
    /// Opens single entries.
    issuer: HandleIssuer,
    /// Read/write permission flags.
    gate: G,
}

impl ConfigProvider<PreferenceStore> {
    /// Build a provider from configuration, gated by the persisted
    /// preferences file under the storage root.
    pub fn from_config(config: &Config) -> Self {
        let gate = PreferenceStore::new(config.preferences_path());
        Self::new(TypeResolver::new(&config.storage.root), &config.provider.authority, gate)
    }
}

impl<G: PermissionGate> ConfigProvider<G> {
    /// Create a provider.
    pub fn new(resolver: TypeResolver, authority: &str, gate: G) -> Self {
        Self {
            router: UriRouter::new(authority),
            listing: ListingEngine::new(resolver.clone()),
            issuer: HandleIssuer::new(resolver),
            gate,
        }
    }

    /// The URI router, for building URIs that address this provider.
    pub fn router(&self) -> &UriRouter {
        &self.router
    }

    /// The permission gate.
    pub fn gate(&self) -> &G {
        &self.gate
    }

    /// Query rows for a URI.
    ///
    /// The root URI lists every entry; an item URI yields zero or one row.
    /// Read permission is checked before the route is dispatched, so a denied
    /// caller always gets [`ProviderError::PermissionDenied`].
    pub fn query(&self, uri: &str) -> Result<RowSet> {
        let route = self.router.route(uri)?;
        debug!("query {} ({})", uri, route.kind());

        if !self.gate.can_read() {
            warn!("Denied query of {}: reads disabled", uri);
            return Err(ProviderError::PermissionDenied(
                "Config read not allowed".to_string(),
            ));
        }

        match route {
            Route::ListAll => self.listing.list_all(),
            Route::SingleItem { type_token, name } => {
                self.listing.describe_one(&type_token, &name)
            }
            Route::Unrecognized => Err(ProviderError::NotFound(uri.to_string())),
        }
    }

    /// Media type for a URI, or `None` if the URI is not recognized.
    pub fn get_type(&self, uri: &str) -> Option<String> {
        match self.router.route(uri) {
            Ok(route) => self.router.media_type(&route),
            Err(e) => {
                debug!("get_type on unparseable uri: {}", e);
                None
            }
        }
    }

    /// Open the file addressed by an item URI.
    ///
    /// `mode` is one of `r`, `w`, `wt`, `wa`, `rw`, `rwt`. The returned file
    /// belongs to the caller.
    pub fn open_file(&self, uri: &str, mode: &str) -> Result<File> {
        let route = self.router.route(uri)?;
        debug!("open {} mode {} ({})", uri, mode, route.kind());
        self.issuer.open(&self.gate, &route, mode)
    }

    /// Always fails: rows cannot be inserted.
    pub fn insert(&self, uri: &str, _values: &Map<String, Value>) -> Result<String> {
        debug!("insert rejected for {}", uri);
        Err(ProviderError::OperationNotSupported("Insert not supported"))
    }

    /// Always fails: rows cannot be updated.
    pub fn update(
        &self,
        uri: &str,
        _values: &Map<String, Value>,
        _selection: Option<&str>,
    ) -> Result<usize> {
        debug!("update rejected for {}", uri);
        Err(ProviderError::OperationNotSupported("Update not supported"))
    }

    /// Always fails: rows cannot be deleted.
    pub fn delete(&self, uri: &str, _selection: Option<&str>) -> Result<usize> {
        debug!("delete rejected for {}", uri);
        Err(ProviderError::OperationNotSupported("Delete not supported"))
    }
}

//! Config file access for the provider.
//!
//! This module provides the pieces the provider is built from:
//! - Config types and their directories
//! - The read/write permission gate
//! - Listing and probing of config entries
//! - File handle issuance for single entries
//!
//! # Security
//!
//! Both permission flags default to off. Every operation that exposes data
//! checks the relevant flag before it touches the filesystem, and entry names
//! that could step outside a type directory are rejected.

pub mod handles;
pub mod listing;
pub mod permissions;
pub mod types;

pub use handles::HandleIssuer;
pub use listing::ListingEngine;
pub use permissions::{PermissionGate, PermissionKey, PreferenceStore, StaticPermissions};
pub use types::{is_valid_name, ConfigType, TypeResolver};

//! # FRP Config Provider Library
//!
//! This crate exposes the frp client's configuration files to external
//! callers, gated by two user-controlled permission flags.
//!
//! ## Overview
//!
//! The provider mediates every access to the config directories:
//!
//! - **URI Routing**: root URIs list everything, `<type>/<name>` URIs address
//!   one file, anything else is rejected
//! - **Permission Gate**: read and write flags, both off until the user opts in
//! - **Type Resolution**: a fixed mapping from `frpc`/`frps` to directories
//! - **Listing**: `(_id, type, name)` rows for every entry or for one probe
//! - **File Handles**: owned [`std::fs::File`] handles in the requested mode
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ConfigProvider                         │
//! │        query / get_type / open_file / insert·update·delete  │
//! ├─────────────────────────────────────────────────────────────┤
//! │   UriRouter   →   PermissionGate   →  ListingEngine         │
//! │                                    →  HandleIssuer          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                TypeResolver  (root/frpc, root/frps)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use provider::{Config, ConfigProvider};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default()?;
//!     let provider = ConfigProvider::from_config(&config);
//!
//!     let root = provider.router().root_uri();
//!     for row in provider.query(&root)? {
//!         println!("{} {} {}", row.id, row.config_type, row.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and defaults
//! - [`files`]: Types, permissions, listing and file handles
//! - [`router`]: The URI-addressed provider facade

pub mod config;
pub mod files;
pub mod router;

// Re-export protocol for convenience
pub use protocol;

// Re-export config types for convenience
pub use config::Config;

// Re-export files types for convenience
pub use files::{
    ConfigType, HandleIssuer, ListingEngine, PermissionGate, PermissionKey, PreferenceStore,
    StaticPermissions, TypeResolver,
};

// Re-export router types for convenience
pub use router::ConfigProvider;

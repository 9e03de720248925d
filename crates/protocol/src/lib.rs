//! # FRP Config Provider Protocol
//!
//! This crate defines the caller-facing surface of the FRP config provider:
//! the URIs callers address config files with, the open modes they may
//! request, the rows a query returns, and the errors every operation reports.
//!
//! ## Overview
//!
//! - **URI routing**: `content://<authority>[/<type>/<name>]` classified into
//!   list-all, single-item or unrecognized routes
//! - **Open modes**: the canonical `r`, `w`, `wt`, `wa`, `rw`, `rwt` strings
//! - **Result rows**: `(_id, type, name)` rows produced per query
//! - **Errors**: one taxonomy shared by every provider operation
//!
//! ## Example Usage
//!
//! ```rust
//! use protocol::{OpenMode, Route, UriRouter};
//!
//! let router = UriRouter::default();
//! let uri = router.item_uri("frpc", "client.toml");
//!
//! match router.route(&uri).unwrap() {
//!     Route::SingleItem { type_token, name } => {
//!         assert_eq!(type_token, "frpc");
//!         assert_eq!(name, "client.toml");
//!     }
//!     other => panic!("unexpected route {other:?}"),
//! }
//!
//! let mode: OpenMode = "wa".parse().unwrap();
//! assert!(mode.is_write());
//! ```
//!
//! ## Modules
//!
//! - [`uri`]: URI parsing, route classification, media types
//! - [`mode`]: open mode parsing and host open options
//! - [`rows`]: query result rows
//! - [`error`]: error types

pub mod error;
pub mod mode;
pub mod rows;
pub mod uri;

pub use error::{ProviderError, Result};
pub use mode::OpenMode;
pub use rows::{RowSet, VirtualRow, COLUMNS};
pub use uri::{
    Route, UriRouter, DEFAULT_AUTHORITY, DIR_MEDIA_TYPE_PREFIX, ITEM_MEDIA_TYPE, SCHEME,
};

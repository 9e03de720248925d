//! Provider URI parsing and route classification.
//!
//! Provider URIs have the shape `content://<authority>[/<type>/<name>]`. The
//! router reduces a URI to one of three routes by counting its path segments:
//! zero segments list everything, exactly two address a single entry, and
//! anything else is unrecognized. There is no pattern engine behind this; the
//! classification is total over segment counts.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

use crate::error::{ProviderError, Result};

/// Canonical scheme for provider URIs.
pub const SCHEME: &str = "content";

/// Default provider authority.
pub const DEFAULT_AUTHORITY: &str = "io.github.acedroidx.frp.config";

/// Media type reported for single entries.
pub const ITEM_MEDIA_TYPE: &str = "text/plain";

/// Prefix of the collection media type; the authority is appended.
pub const DIR_MEDIA_TYPE_PREFIX: &str = "vnd.android.cursor.dir/vnd.";

/// Characters escaped when a name is placed into a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Result of classifying a request URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Zero path segments: enumerate every entry of every type.
    ListAll,
    /// Exactly two path segments: one `(type, name)` pair.
    ///
    /// Neither part has been validated yet; the type token may not resolve
    /// and the name may be blank.
    SingleItem {
        /// Raw type token from the first segment.
        type_token: String,
        /// Decoded file name from the second segment.
        name: String,
    },
    /// Any other shape, or a foreign authority.
    Unrecognized,
}

impl Route {
    /// Classify already-split, already-decoded path segments.
    ///
    /// Empty segments must be removed by the caller.
    pub fn classify<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segments = segments.into_iter();
        match (segments.next(), segments.next(), segments.next()) {
            (None, _, _) => Route::ListAll,
            (Some(type_token), Some(name), None) => Route::SingleItem {
                type_token: type_token.into(),
                name: name.into(),
            },
            _ => Route::Unrecognized,
        }
    }

    /// Short label used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Route::ListAll => "list-all",
            Route::SingleItem { .. } => "single-item",
            Route::Unrecognized => "unrecognized",
        }
    }
}

/// Classifies request URIs for one provider authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriRouter {
    authority: String,
}

impl UriRouter {
    /// Create a router for the given authority.
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
        }
    }

    /// The authority this router answers for.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Classify a URI string.
    ///
    /// Fails only when the string is not a URI at all. A well-formed URI for a
    /// different authority is [`Route::Unrecognized`]. The scheme is not
    /// inspected.
    pub fn route(&self, uri: &str) -> Result<Route> {
        let url = Url::parse(uri).map_err(|e| ProviderError::InvalidUri(format!("{uri}: {e}")))?;

        if url.host_str() != Some(self.authority.as_str()) {
            return Ok(Route::Unrecognized);
        }

        let segments: Vec<String> = url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Route::classify(segments))
    }

    /// Media type for a route, or `None` for unrecognized routes.
    pub fn media_type(&self, route: &Route) -> Option<String> {
        match route {
            Route::ListAll => Some(format!("{DIR_MEDIA_TYPE_PREFIX}{}", self.authority)),
            Route::SingleItem { .. } => Some(ITEM_MEDIA_TYPE.to_string()),
            Route::Unrecognized => None,
        }
    }

    /// URI addressing the whole collection.
    pub fn root_uri(&self) -> String {
        format!("{SCHEME}://{}", self.authority)
    }

    /// URI addressing one entry.
    pub fn item_uri(&self, type_token: &str, name: &str) -> String {
        format!(
            "{SCHEME}://{}/{}/{}",
            self.authority,
            utf8_percent_encode(type_token, SEGMENT),
            utf8_percent_encode(name, SEGMENT)
        )
    }
}

impl Default for UriRouter {
    fn default() -> Self {
        Self::new(DEFAULT_AUTHORITY)
    }
}

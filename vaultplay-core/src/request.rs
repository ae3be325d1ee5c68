//! The streaming request contract.
//!
//! The controller never talks to the backend itself. It only computes the
//! request target that the playback surface dereferences:
//!
//! ```text
//! GET <base_url>/video/stream?uid=<pct uid>&tid=<pct tid>
//! ```
//!
//! No headers, tokens or cookies are attached. Whatever the backend needs to
//! authenticate the request has to be carried by `uid` and `tid`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::error::ConfigError;

/// Default backend location used when no config or flag overrides it.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Path segments appended to the base URL, in order.
const STREAM_PATH: [&str; 2] = ["video", "stream"];

/// URL-component encoding: everything but `A-Z a-z 0-9 - _ . ! ~ * ( )`.
///
/// `'` is escaped as well; the `url` crate escapes it in http(s) queries.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes one query component (`"a b"` becomes `"a%20b"`).
pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

/// A validated streaming backend base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEndpoint {
    base: Url,
}

impl StreamEndpoint {
    /// Parses and validates `raw` as an http(s) base URL.
    ///
    /// Any query string or fragment on the base is discarded when request
    /// URLs are built; a trailing `/` makes no difference.
    ///
    /// # Errors
    ///
    /// [`ConfigError::BaseUrl`] when `raw` does not parse, and
    /// [`ConfigError::Scheme`] for anything other than `http`/`https`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        let base = Url::parse(trimmed).map_err(|source| ConfigError::BaseUrl {
            url: trimmed.to_owned(),
            source,
        })?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(ConfigError::Scheme(trimmed.to_owned()));
        }
        Ok(Self { base })
    }

    /// The base URL as configured.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Builds the request target for one `(uid, tid)` pair.
    ///
    /// The values are encoded exactly as given; trimming is the caller's
    /// business and only ever applies to the emptiness check.
    pub fn request_url(&self, uid: &str, tid: &str) -> Url {
        let mut url = self.base.clone();
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(STREAM_PATH);
        }
        let query = format!("uid={}&tid={}", encode_component(uid), encode_component(tid));
        url.set_query(Some(&query));
        url
    }
}

impl Default for StreamEndpoint {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid url"),
        }
    }
}

//! URL construction for the settings resource.

use url::Url;
use wick_core::keys;

use crate::error::{HttpError, HttpResult};

/// Path segments of the settings collection below the base URL.
const COLLECTION_PATH: [&str; 2] = ["api", "settings"];

/// Resolved endpoints of the settings resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    collection: Url,
}

impl Endpoints {
    /// Resolve endpoints below `base`, keeping any path prefix it has.
    pub fn new(base: &str) -> HttpResult<Self> {
        let mut collection = Url::parse(base)?;
        if !matches!(collection.scheme(), "http" | "https") {
            return Err(HttpError::UnsupportedBaseUrl {
                url: base.to_string(),
            });
        }
        collection.set_query(None);
        collection.set_fragment(None);
        collection
            .path_segments_mut()
            .map_err(|()| HttpError::UnsupportedBaseUrl {
                url: base.to_string(),
            })?
            .pop_if_empty()
            .extend(COLLECTION_PATH);
        Ok(Self { collection })
    }

    /// `GET`/`POST` target.
    pub const fn collection(&self) -> &Url {
        &self.collection
    }

    /// `GET`/`PUT`/`DELETE` target for one key. The key is always encoded as
    /// a single path segment.
    ///
    /// Keys made only of dots are refused: path normalization would resolve
    /// them to the collection or its parent.
    pub fn entry(&self, key: &str) -> HttpResult<Url> {
        if !keys::is_addressable(key) {
            return Err(HttpError::UnaddressableKey {
                key: key.to_string(),
            });
        }
        let mut url = self.collection.clone();
        // The collection URL is an http(s) URL, which always has segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(key);
        }
        Ok(url)
    }
}

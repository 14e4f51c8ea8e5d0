//! Cache key definitions.

use std::fmt;

/// First segment of every settings query key.
pub const SETTINGS_SCOPE: &str = "settings";

/// Structured identifier of a cached read.
///
/// Keys compare segment by segment; `["settings"]` and
/// `["settings", "storeName"]` are distinct entries and invalidating one
/// leaves the other alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// `["settings"]` - the collection read by `list_all`.
    pub fn settings() -> Self {
        Self::new([SETTINGS_SCOPE])
    }

    /// `["settings", key]` - a single-entry read.
    pub fn setting(key: &str) -> Self {
        Self::new([SETTINGS_SCOPE, key])
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{segment:?}")?;
        }
        f.write_str("]")
    }
}

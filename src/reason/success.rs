use std::fmt;

use super::{Metadata, MetadataValue, Reason, SuccessReason};

/// The default success reason.
///
/// # Examples
///
/// ```
/// use causeway::{Reason, Success};
///
/// let success = Success::new("user created").with_metadata("id", 7);
/// assert_eq!(success.message(), "user created");
/// assert_eq!(success.to_string(), "Success with Message='user created', Metadata='[id, 7]'");
/// ```
#[derive(Debug, Clone)]
pub struct Success {
    message: String,
    metadata: Metadata,
}

impl Default for Success {
    fn default() -> Self {
        Success::new("Missing Success Message.")
    }
}

impl Success {
    /// Create a success with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Success {
            message: message.into(),
            metadata: Metadata::new(),
        }
    }

    /// Upsert a metadata entry. A later value for the same key wins.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Upsert several metadata entries.
    pub fn with_metadata_map<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<MetadataValue>,
    {
        self.metadata
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

impl Reason for Success {
    fn message(&self) -> &str {
        &self.message
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

impl SuccessReason for Success {}

impl fmt::Display for Success {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

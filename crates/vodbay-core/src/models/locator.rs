use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Where a piece of media lives and how a client may reach it.
///
/// Records persist locators as plain strings, so every variant has a
/// canonical string form and every string parses into exactly one
/// variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaLocator {
    /// URL a client can fetch without further work.
    Direct(String),
    /// Object placed in storage, recorded as `bucket,key`.
    StoredRef { bucket: String, key: String },
    /// Time-limited URL minted from a stored reference.
    Signed {
        url: String,
        expires_at: DateTime<Utc>,
    },
}

impl MediaLocator {
    pub fn stored(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        MediaLocator::StoredRef {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Parses the persisted string form.
    ///
    /// URLs always come back as `Direct`: a signed URL loses its expiry
    /// when written down, and treating it as direct keeps reads from
    /// re-signing content that already resolves. The `bucket,key` form
    /// is only recognized outside URLs since query strings may carry
    /// literal commas.
    pub fn parse(raw: &str) -> MediaLocator {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return MediaLocator::Direct(raw.to_string());
        }
        match raw.split_once(',') {
            Some((bucket, key)) => MediaLocator::StoredRef {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            None => MediaLocator::Direct(raw.to_string()),
        }
    }

    /// The canonical string persisted into records and responses.
    pub fn as_record_string(&self) -> String {
        match self {
            MediaLocator::Direct(url) => url.clone(),
            MediaLocator::StoredRef { bucket, key } => format!("{},{}", bucket, key),
            MediaLocator::Signed { url, .. } => url.clone(),
        }
    }

    /// A URL the client can use right now, if this locator has one.
    pub fn url(&self) -> Option<&str> {
        match self {
            MediaLocator::Direct(url) => Some(url),
            MediaLocator::Signed { url, .. } => Some(url),
            MediaLocator::StoredRef { .. } => None,
        }
    }

    pub fn is_stored_ref(&self) -> bool {
        matches!(self, MediaLocator::StoredRef { .. })
    }
}

impl std::fmt::Display for MediaLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_record_string())
    }
}

impl Serialize for MediaLocator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.as_record_string())
    }
}

impl<'de> Deserialize<'de> for MediaLocator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(MediaLocator::parse(&raw))
    }
}

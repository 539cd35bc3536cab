//! Object key generation.
//!
//! Key format: `{aspect}/{token}.{ext}` for aspect-bucketed media, or
//! `{token}.{ext}` otherwise. The token is 32 random bytes encoded as
//! URL-safe base64 without padding (43 characters), so keys never collide
//! in practice and never need escaping in URLs.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;

use vodbay_core::AspectBucket;

/// Generate a fresh object key.
///
/// The extension is the subtype of `content_type` (`video/mp4` gives `.mp4`),
/// which callers have already validated against the configured allowlist.
pub fn object_key(aspect: Option<AspectBucket>, content_type: &str) -> String {
    let mut rng = rand::rng();
    let raw: [u8; 32] = rng.random();
    let token = URL_SAFE_NO_PAD.encode(raw);

    let ext = content_type
        .split_once('/')
        .map(|(_, subtype)| subtype)
        .unwrap_or(content_type);

    match aspect {
        Some(aspect) => format!("{}/{}.{}", aspect.as_str(), token, ext),
        None => format!("{}.{}", token, ext),
    }
}

//! Aspect-ratio bucketing for uploaded videos.
//!
//! Buckets become storage-key prefixes, so playback tooling can address all
//! landscape or portrait content with one prefix listing.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Classification label derived from pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectBucket {
    Landscape,
    Portrait,
    Other,
}

impl AspectBucket {
    /// Classify a width/height pair.
    ///
    /// A video is `Landscape` when `width == 16 * height / 9` under integer
    /// division, `Portrait` when the symmetric test holds, and `Other`
    /// otherwise. Only dimensions that divide exactly qualify; nominal 16:9
    /// sizes such as 1366x768 fall through to `Other`. Storage keys depend
    /// on this exact integer rule, so no tolerance window is applied.
    pub fn from_dimensions(width: u32, height: u32) -> AspectBucket {
        let w = width as u64;
        let h = height as u64;
        if w == 16 * h / 9 {
            AspectBucket::Landscape
        } else if h == 16 * w / 9 {
            AspectBucket::Portrait
        } else {
            AspectBucket::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectBucket::Landscape => "landscape",
            AspectBucket::Portrait => "portrait",
            AspectBucket::Other => "other",
        }
    }
}

impl Display for AspectBucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

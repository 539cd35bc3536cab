//! Domain models

mod locator;
mod video;

pub use locator::MediaLocator;
pub use video::{NewVideo, Video, VideoResponse};

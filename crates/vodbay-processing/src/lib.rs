//! Media processing for the upload pipeline.
//!
//! Three concerns live here: staging upload streams into request-scoped
//! temp files, probing staged media with an external inspector, and
//! remuxing video containers for progressive playback. The inspector and
//! remuxer are traits so the pipeline can be tested with canned doubles.

pub mod probe;
pub mod remux;
pub mod staging;

pub use probe::{FfprobeInspector, MediaInfo, MediaInspector};
pub use remux::{FastStartRemuxer, Remuxer};
pub use staging::StagedArtifact;

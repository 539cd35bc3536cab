//! Object storage for uploaded media.
//!
//! The [`ObjectStorage`] trait abstracts the backend so the upload pipeline
//! and tests do not couple to S3. Keys are generated in the `keys` module so
//! every caller produces the same shape: an optional aspect prefix, 43
//! URL-safe base64 characters, and an extension taken from the content type.

pub mod keys;
pub mod s3;
pub mod traits;

pub use keys::object_key;
pub use s3::S3Storage;
pub use traits::{ObjectStorage, StorageError, StorageResult};

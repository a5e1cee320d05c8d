//! File storage backends for uploaded media.
//!
//! This crate decides where uploaded bytes land and what public URL they
//! get back:
//!
//! - [`StorageProvider`] -- async abstraction over a storage backend.
//! - [`LocalStorage`] -- writes under a directory the API serves itself.
//! - [`S3Storage`] -- pushes objects to a bucket fronted by a public URL.
//! - [`naming`] -- collision-free object name generation.

pub mod local;
pub mod naming;
pub mod provider;
pub mod s3;

pub use local::LocalStorage;
pub use provider::{StorageError, StorageProvider};
pub use s3::S3Storage;

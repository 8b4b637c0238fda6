#![deny(unused)]
//! Object store backends for dagsweep.
//!
//! Implementations of the `ObjectStore` port: an S3-compatible backend for
//! production (AWS S3 or MinIO) and an in-memory backend for tests.

pub mod memory;
pub mod s3;

pub use memory::InMemoryStore;
pub use s3::S3LogStore;

//! The file-operations engine.
//!
//! This module implements the filesystem primitives behind the file API:
//! - Directory listing with directories-first ordering
//! - Streaming reads without whole-file buffering
//! - Writes, deletes (single and recursive), mkdir, rename
//! - Batch uploads with overwrite-by-replace semantics
//! - Zip archive extraction
//!
//! # Security
//!
//! Every operation resolves its path through [`PathResolver`] before any
//! filesystem access. Resolution is lexical and rejects anything that would
//! land outside the configured root, so the root boundary is enforced in
//! one place rather than per operation.

mod archive;
pub mod engine;
pub mod error;
pub mod resolver;

pub use engine::{FileEngine, FileStream, UploadItem};
pub use error::EngineError;
pub use resolver::PathResolver;

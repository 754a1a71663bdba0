//! # Filedock Protocol Library
//!
//! Wire types shared between the Filedock daemon and its clients.
//!
//! ## Overview
//!
//! The protocol crate defines the JSON surface of the file API:
//!
//! - **Listing entries**: [`Entry`] and [`EntryKind`], serialized as
//!   `{"name": ..., "type": "file" | "directory"}`
//! - **Request payloads**: write, delete, mkdir, rename, and path queries
//! - **Error codes**: [`ErrorCode`] and [`ErrorBody`] for failed responses
//!
//! All paths carried on the wire are relative to the daemon's configured
//! root directory. The daemon resolves and validates them; clients never see
//! absolute filesystem paths.
//!
//! ## Modules
//!
//! - [`messages`]: request and response payload definitions
//! - [`error`]: error codes and error bodies

pub mod error;
pub mod messages;

pub use error::{ErrorBody, ErrorCode};
pub use messages::{
    DeleteRequest, Entry, EntryKind, MkdirRequest, PathQuery, RenameRequest, WriteRequest,
};

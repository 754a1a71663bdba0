//! # Filedock Daemon Library
//!
//! This crate provides the daemon (server) functionality for Filedock,
//! a remote file-management service scoped to a single root directory.
//!
//! ## Overview
//!
//! The daemon serves a small HTTP API over a file-operations engine:
//!
//! - **Listing**: non-recursive directory listings, directories first
//! - **Streaming**: chunked file downloads with content-type detection
//! - **Mutation**: write, delete (recursive), mkdir, rename
//! - **Upload**: multi-file batches with overwrite-by-replace semantics
//! - **Extraction**: zip archives unpacked in place
//!
//! Every operation is confined to the configured root; paths that would
//! escape it are rejected before any filesystem access.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 HTTP Adapter                 │
//! │   (routing, JSON, status mapping — no fs)    │
//! ├──────────────────────────────────────────────┤
//! │                 File Engine                  │
//! │  list · stream · write · delete · mkdir ·    │
//! │  rename · upload · extract                   │
//! ├──────────────────────────────────────────────┤
//! │                Path Resolver                 │
//! │        (root boundary, enforced once)        │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use daemon::config::Config;
//! use daemon::files::FileEngine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default()?;
//!     config.validate()?;
//!
//!     let engine = FileEngine::new(config.files.root.clone());
//!     let addr = config.server.listen_addr.parse()?;
//!     daemon::server::serve(engine, addr).await
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and defaults
//! - [`files`]: Path resolution and the file-operations engine
//! - [`server`]: HTTP adapter

pub mod config;
pub mod files;
pub mod server;

// Re-export protocol for convenience
pub use protocol;

// Re-export config types for convenience
pub use config::Config;

// Re-export files types for convenience
pub use files::{EngineError, FileEngine, FileStream, PathResolver, UploadItem};

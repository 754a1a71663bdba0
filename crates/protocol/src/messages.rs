//! Wire payloads for the file API.
//!
//! Everything here is plain serde JSON. Paths in request payloads are always
//! relative to the daemon's configured root; the daemon resolves them before
//! touching the filesystem.

use serde::{Deserialize, Serialize};

// ============================================================================
// Listing
// ============================================================================

/// A single file or directory entry in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry name (not full path).
    pub name: String,
    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// Kind of listing entry. Anything that is not a directory (including
/// symlinks and special files) is reported as a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

// ============================================================================
// Mutating requests
// ============================================================================

/// Request to write (create or fully replace) a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRequest {
    /// Path of the file to write.
    pub path: String,
    /// Content to write, verbatim.
    pub content: String,
}

/// Request to recursively delete one or more paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// Paths to delete. Missing paths are treated as already deleted.
    pub paths: Vec<String>,
}

/// Request to create a single directory level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MkdirRequest {
    /// Parent directory path.
    pub path: String,
    /// Name of the directory to create.
    pub name: String,
}

/// Request to rename an entry in place. Rename is sibling-scoped: only the
/// leaf name changes, the entry never moves to a different parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRequest {
    /// Path of the entry to rename.
    pub path: String,
    /// New leaf name.
    pub name: String,
}

/// Query parameters carrying a single path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathQuery {
    /// Target path. Defaults to the root when omitted.
    #[serde(default)]
    pub path: String,
}

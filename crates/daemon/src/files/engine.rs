//! File operations scoped to a root directory.
//!
//! [`FileEngine`] implements the full file-management surface: listing,
//! streaming reads, writes, existence checks, deletes (single and
//! recursive), directory creation, renames, batch uploads, and zip
//! extraction. Every operation takes a root-relative path and resolves it
//! through the shared [`PathResolver`] before touching the filesystem, so
//! the root boundary is enforced in exactly one place.
//!
//! The engine is stateless between calls: it holds only the resolver, takes
//! no locks, and never serializes concurrent operations against each other.
//! Overlapping calls on the same paths interleave at the mercy of the
//! filesystem.

use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use mime_guess::Mime;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use protocol::messages::{Entry, EntryKind};

use super::archive;
use super::error::{classify_io, EngineError};
use super::resolver::PathResolver;

/// An in-flight upload payload with a name and byte content.
///
/// Consumed exactly once by [`FileEngine::upload`].
#[derive(Debug, Clone)]
pub struct UploadItem {
    /// Target file name inside the destination directory.
    pub name: String,
    /// Payload bytes.
    pub content: Bytes,
}

/// An opened file ready for streaming, with its response metadata.
#[derive(Debug)]
pub struct FileStream {
    content_type: Mime,
    len: u64,
    file: fs::File,
}

impl FileStream {
    /// Best-effort content type guessed from the file extension.
    pub fn content_type(&self) -> &Mime {
        &self.content_type
    }

    /// File size at open time. A concurrent truncation makes the actual
    /// stream shorter; that surfaces to the consumer as a short body.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the file was empty at open time.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Unwrap into the underlying file, e.g. to hand to a body stream.
    pub fn into_inner(self) -> fs::File {
        self.file
    }

    /// Copy the file's bytes into the sink in bounded chunks.
    ///
    /// Returns the number of bytes copied. Never buffers the whole file.
    pub async fn copy_to<W: AsyncWrite + Unpin>(mut self, sink: &mut W) -> io::Result<u64> {
        let copied = tokio::io::copy(&mut self.file, sink).await?;
        sink.flush().await?;
        Ok(copied)
    }
}

/// The file-operations engine.
///
/// Cheap to clone; all clones share the same root.
#[derive(Debug, Clone)]
pub struct FileEngine {
    resolver: PathResolver,
}

impl FileEngine {
    /// Create an engine scoped to the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            resolver: PathResolver::new(root),
        }
    }

    /// The root directory all operations are confined to.
    pub fn root(&self) -> &Path {
        self.resolver.root()
    }

    /// List the direct children of a directory.
    ///
    /// Entries come back directories-first, each group sorted
    /// case-insensitively by name. Symlinks are classified by what the
    /// directory entry itself reports and are never traversed. Children
    /// whose type cannot be determined are skipped.
    pub async fn list(&self, path: &str) -> Result<Vec<Entry>, EngineError> {
        let abs = self.resolver.resolve(path)?;

        let mut reader = fs::read_dir(&abs).await.map_err(|e| classify_io(&abs, e))?;
        let mut entries = Vec::new();

        while let Some(child) = reader.next_entry().await.map_err(|e| classify_io(&abs, e))? {
            let Ok(file_type) = child.file_type().await else {
                continue;
            };
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(Entry {
                name: child.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }

        entries.sort_by(|a, b| {
            let a_is_dir = a.kind == EntryKind::Directory;
            let b_is_dir = b.kind == EntryKind::Directory;
            match (a_is_dir, b_is_dir) {
                (true, false) => std::cmp::Ordering::Less,
                (false, true) => std::cmp::Ordering::Greater,
                _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            }
        });

        Ok(entries)
    }

    /// Open a file for streaming and report its content type and length.
    ///
    /// The caller drives the actual transfer via [`FileStream::copy_to`] or
    /// [`FileStream::into_inner`]. If the file is deleted or truncated while
    /// streaming, the transfer ends early or errors at the stream level; the
    /// engine stays usable.
    pub async fn open_stream(&self, path: &str) -> Result<FileStream, EngineError> {
        let abs = self.resolver.resolve(path)?;

        let file = fs::File::open(&abs).await.map_err(|e| classify_io(&abs, e))?;
        let metadata = file.metadata().await.map_err(|e| classify_io(&abs, e))?;
        if metadata.is_dir() {
            return Err(EngineError::Io(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("cannot stream a directory: {}", abs.display()),
            )));
        }

        Ok(FileStream {
            content_type: mime_guess::from_path(&abs).first_or_octet_stream(),
            len: metadata.len(),
            file,
        })
    }

    /// Write a file, creating it or fully replacing its previous content.
    ///
    /// The parent directory must already exist. Bytes are written verbatim;
    /// there is no write-to-temp-then-rename, so a failure mid-write leaves
    /// a partial file.
    pub async fn write(&self, path: &str, content: &[u8]) -> Result<(), EngineError> {
        let abs = self.resolver.resolve(path)?;

        let parent = abs
            .parent()
            .ok_or_else(|| EngineError::InvalidPath(path.to_string()))?;
        fs::metadata(parent).await.map_err(|e| classify_io(parent, e))?;

        fs::write(&abs, content).await.map_err(|e| classify_io(&abs, e))
    }

    /// Whether a path exists under the root.
    ///
    /// Never fails: resolution errors and access errors both collapse to
    /// `false`. This is the pre-check used by upload's overwrite logic.
    pub async fn exists(&self, path: &str) -> bool {
        match self.resolver.resolve(path) {
            Ok(abs) => fs::metadata(&abs).await.is_ok(),
            Err(_) => false,
        }
    }

    /// Delete a single file.
    pub async fn delete(&self, path: &str) -> Result<(), EngineError> {
        let abs = self.resolver.resolve(path)?;

        fs::symlink_metadata(&abs)
            .await
            .map_err(|e| classify_io(&abs, e))?;
        fs::remove_file(&abs).await.map_err(|e| classify_io(&abs, e))
    }

    /// Recursively delete a file or directory tree.
    ///
    /// A missing path is treated as already deleted. Children are removed
    /// depth-first before their parent; the first failing child aborts the
    /// whole operation, with no partial-success reporting.
    pub async fn delete_tree(&self, path: &str) -> Result<(), EngineError> {
        let abs = self.resolver.resolve(path)?;
        debug!(path = %abs.display(), "recursive delete");

        tokio::task::spawn_blocking(move || remove_tree(&abs))
            .await
            .map_err(|e| EngineError::Io(io::Error::other(e)))?
    }

    /// Create a single new directory level under an existing parent.
    pub async fn mkdir(&self, parent: &str, name: &str) -> Result<(), EngineError> {
        let parent_abs = self.resolver.resolve(parent)?;
        self.resolver.validate_leaf(name)?;

        fs::metadata(&parent_abs)
            .await
            .map_err(|e| classify_io(&parent_abs, e))?;

        let dir = parent_abs.join(name);
        fs::create_dir(&dir).await.map_err(|e| classify_io(&dir, e))
    }

    /// Rename an entry in place, changing only its leaf name.
    ///
    /// The new path is constructed as "same parent, new name", so a rename
    /// can never move an entry to a different directory.
    pub async fn rename(&self, path: &str, new_name: &str) -> Result<(), EngineError> {
        let abs = self.resolver.resolve(path)?;
        if abs == self.resolver.root() {
            return Err(EngineError::InvalidPath(path.to_string()));
        }
        self.resolver.validate_leaf(new_name)?;

        fs::symlink_metadata(&abs)
            .await
            .map_err(|e| classify_io(&abs, e))?;

        let new_abs = abs
            .parent()
            .ok_or_else(|| EngineError::InvalidPath(path.to_string()))?
            .join(new_name);
        fs::rename(&abs, &new_abs)
            .await
            .map_err(|e| classify_io(&abs, e))
    }

    /// Upload a batch of files into a destination directory.
    ///
    /// Per item: a colliding file is deleted first, then the payload is
    /// staged to a temporary file in the destination and renamed into
    /// place. Items are processed in order; the first failure aborts the
    /// batch and already-placed items are not rolled back.
    pub async fn upload(
        &self,
        dest_dir: &str,
        items: Vec<UploadItem>,
    ) -> Result<(), EngineError> {
        let dest = self.resolver.resolve(dest_dir)?;
        fs::metadata(&dest).await.map_err(|e| classify_io(&dest, e))?;
        debug!(dest = %dest.display(), count = items.len(), "upload batch");

        for item in items {
            self.resolver.validate_leaf(&item.name)?;
            let target = dest.join(&item.name);

            if fs::symlink_metadata(&target).await.is_ok() {
                fs::remove_file(&target)
                    .await
                    .map_err(|e| classify_io(&target, e))?;
            }

            let staging_dir = dest.clone();
            let content = item.content;
            tokio::task::spawn_blocking(move || place_payload(&staging_dir, &target, &content))
                .await
                .map_err(|e| EngineError::Io(io::Error::other(e)))??;
        }

        Ok(())
    }

    /// Extract a zip archive next to itself.
    ///
    /// The destination directory is the archive's filename with its final
    /// extension stripped (`bundle.zip` extracts under `bundle/`); a
    /// filename without an extension keeps its full name. Waits for
    /// extraction to finish before reporting success.
    pub async fn extract(&self, path: &str) -> Result<(), EngineError> {
        let abs = self.resolver.resolve(path)?;

        fs::symlink_metadata(&abs)
            .await
            .map_err(|e| classify_io(&abs, e))?;

        let stem = abs
            .file_stem()
            .ok_or_else(|| EngineError::InvalidPath(path.to_string()))?;
        let dest = abs
            .parent()
            .ok_or_else(|| EngineError::InvalidPath(path.to_string()))?
            .join(stem);
        debug!(archive = %abs.display(), dest = %dest.display(), "extracting");

        tokio::task::spawn_blocking(move || archive::extract_zip(&abs, &dest))
            .await
            .map_err(|e| EngineError::Io(io::Error::other(e)))?
    }
}

/// Depth-first tree removal: children before parent, abort on first error.
///
/// Symlinks are unlinked, never followed into.
fn remove_tree(path: &Path) -> Result<(), EngineError> {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(m) => m,
        // Already gone: deleting a missing tree is a no-op.
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(classify_io(path, e)),
    };

    if metadata.is_dir() {
        let reader = std::fs::read_dir(path).map_err(|e| classify_io(path, e))?;
        for child in reader {
            let child = child.map_err(|e| classify_io(path, e))?;
            remove_tree(&child.path())?;
        }
        std::fs::remove_dir(path).map_err(|e| classify_io(path, e))
    } else {
        std::fs::remove_file(path).map_err(|e| classify_io(path, e))
    }
}

/// Stage an upload payload in the destination directory and rename it into
/// place, so a torn upload never leaves a half-written file at the target
/// name.
fn place_payload(staging_dir: &Path, target: &Path, content: &[u8]) -> Result<(), EngineError> {
    use std::io::Write;

    let mut staged =
        tempfile::NamedTempFile::new_in(staging_dir).map_err(|e| classify_io(staging_dir, e))?;
    staged
        .write_all(content)
        .map_err(|e| classify_io(staged.path(), e))?;
    staged
        .persist(target)
        .map_err(|e| classify_io(target, e.error))?;
    Ok(())
}

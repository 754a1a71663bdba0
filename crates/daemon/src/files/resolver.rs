//! Path resolution against the configured root.
//!
//! Every engine operation goes through [`PathResolver`] before touching the
//! filesystem. Resolution is purely lexical: the caller-supplied path is
//! normalized component by component against the root, and anything that
//! would land outside the root is rejected. No filesystem access happens
//! here, so paths that do not exist yet resolve the same way as paths that
//! do.

use std::path::{Component, Path, PathBuf};

use super::error::EngineError;

/// Resolves caller-supplied relative paths to absolute paths under the root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Root directory all resolved paths stay inside.
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver for the given root directory.
    ///
    /// The root is expected to be absolute; the daemon canonicalizes it at
    /// startup.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory this resolver is scoped to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a caller-supplied path to an absolute path under the root.
    ///
    /// Fails with [`EngineError::InvalidPath`] if the input is absolute or
    /// if traversal segments would escape the root after normalization.
    /// An empty path resolves to the root itself.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf, EngineError> {
        let mut resolved = PathBuf::new();

        for component in Path::new(raw).components() {
            match component {
                Component::Normal(segment) => resolved.push(segment),
                Component::CurDir => {}
                Component::ParentDir => {
                    // Popping past the root means the input escapes it.
                    if !resolved.pop() {
                        return Err(EngineError::InvalidPath(raw.to_string()));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(EngineError::InvalidPath(raw.to_string()));
                }
            }
        }

        Ok(self.root.join(resolved))
    }

    /// Validate a bare leaf name (for mkdir, rename, and upload items).
    ///
    /// Rejects names that are empty, contain a path separator, or are the
    /// `.`/`..` traversal segments.
    pub fn validate_leaf(&self, name: &str) -> Result<(), EngineError> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(EngineError::InvalidPath(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> PathResolver {
        PathResolver::new("/srv/files")
    }

    #[test]
    fn test_resolve_simple_path() {
        let resolved = resolver().resolve("docs/readme.txt").unwrap();
        assert_eq!(resolved, Path::new("/srv/files/docs/readme.txt"));
    }

    #[test]
    fn test_resolve_empty_is_root() {
        let resolved = resolver().resolve("").unwrap();
        assert_eq!(resolved, Path::new("/srv/files"));
    }

    #[test]
    fn test_resolve_normalizes_current_dir() {
        let resolved = resolver().resolve("./docs/./a.txt").unwrap();
        assert_eq!(resolved, Path::new("/srv/files/docs/a.txt"));
    }

    #[test]
    fn test_resolve_contained_parent_dir() {
        // ".." that stays inside the root is allowed.
        let resolved = resolver().resolve("docs/../images/logo.png").unwrap();
        assert_eq!(resolved, Path::new("/srv/files/images/logo.png"));
    }

    #[test]
    fn test_resolve_rejects_escape() {
        let result = resolver().resolve("../etc/passwd");
        assert!(matches!(result, Err(EngineError::InvalidPath(_))));
    }

    #[test]
    fn test_resolve_rejects_nested_escape() {
        let result = resolver().resolve("docs/../../etc/passwd");
        assert!(matches!(result, Err(EngineError::InvalidPath(_))));
    }

    #[test]
    fn test_resolve_rejects_absolute() {
        let result = resolver().resolve("/etc/passwd");
        assert!(matches!(result, Err(EngineError::InvalidPath(_))));
    }

    #[test]
    fn test_resolve_never_escapes_root() {
        // Any accepted input must resolve under the root.
        let inputs = [
            "a",
            "a/b/c",
            "a/../b",
            "./x",
            "deep/../../deep/again",
            "..foo/bar",
            "trailing/",
        ];
        let resolver = resolver();
        for input in inputs {
            if let Ok(resolved) = resolver.resolve(input) {
                assert!(
                    resolved.starts_with(resolver.root()),
                    "{input} resolved outside root: {}",
                    resolved.display()
                );
            }
        }
    }

    #[test]
    fn test_dotdot_in_name_is_not_traversal() {
        // A name merely containing dots is a normal component.
        let resolved = resolver().resolve("archive..old").unwrap();
        assert_eq!(resolved, Path::new("/srv/files/archive..old"));
    }

    #[test]
    fn test_validate_leaf_accepts_plain_names() {
        let resolver = resolver();
        assert!(resolver.validate_leaf("notes.txt").is_ok());
        assert!(resolver.validate_leaf(".hidden").is_ok());
        assert!(resolver.validate_leaf("archive..old").is_ok());
    }

    #[test]
    fn test_validate_leaf_rejects_separators_and_traversal() {
        let resolver = resolver();
        assert!(matches!(
            resolver.validate_leaf("a/b"),
            Err(EngineError::InvalidPath(_))
        ));
        assert!(matches!(
            resolver.validate_leaf("a\\b"),
            Err(EngineError::InvalidPath(_))
        ));
        assert!(matches!(
            resolver.validate_leaf(".."),
            Err(EngineError::InvalidPath(_))
        ));
        assert!(matches!(
            resolver.validate_leaf("."),
            Err(EngineError::InvalidPath(_))
        ));
        assert!(matches!(
            resolver.validate_leaf(""),
            Err(EngineError::InvalidPath(_))
        ));
    }
}

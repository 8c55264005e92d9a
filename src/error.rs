//! Error types for tree building and output

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a walk. Only the root can produce these; problems
/// below the root are absorbed into the tree as unknown sizes.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("cannot access '{}': No such file or directory", path.display())]
    NotFound { path: PathBuf },

    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("cannot read directory '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    /// True when the root was missing or unreadable because of permissions.
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            BuildError::Unreadable { source, .. } if source.kind() == io::ErrorKind::PermissionDenied
        )
    }
}

/// Failures while writing the JSON document.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize tree: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_kind() {
        let err = BuildError::Unreadable {
            path: PathBuf::from("/locked"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(err.is_permission_denied());
        assert!(err.to_string().starts_with("cannot read directory '/locked'"));

        let err = BuildError::NotFound {
            path: PathBuf::from("/missing"),
        };
        assert!(!err.is_permission_denied());
        assert_eq!(
            err.to_string(),
            "cannot access '/missing': No such file or directory"
        );
    }
}

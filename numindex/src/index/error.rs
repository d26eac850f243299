//! Errors returned by the index reader.

use crate::index::key::KeyError;
use crate::index::query::QueryKind;
use crate::storage::StorageError;

/// Errors that can occur while reading the index.
#[derive(Debug)]
pub enum IndexError {
    /// The reader answers exactly one predicate per query.
    UnsupportedOperation { predicates: usize },
    /// The predicate cannot be answered by a number index.
    UnsupportedPredicate { kind: QueryKind, reason: String },
    /// The property values cannot form a key.
    Key(KeyError),
    /// Storage failed during a seek or advance.
    Storage(StorageError),
    /// One or more cursors failed to close. Every cursor was still attempted.
    CloseFailed(Vec<StorageError>),
}

impl std::fmt::Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedOperation { predicates } => write!(
                f,
                "unsupported operation: expected exactly one predicate, got {predicates}"
            ),
            Self::UnsupportedPredicate { kind, reason } => {
                write!(f, "unsupported {kind} predicate: {reason}")
            }
            Self::Key(e) => write!(f, "key error: {e}"),
            Self::Storage(e) => write!(f, "storage error: {e}"),
            Self::CloseFailed(errors) => {
                write!(f, "failed to close {} cursor(s)", errors.len())?;
                for e in errors {
                    write!(f, "; {e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Key(e) => Some(e),
            Self::Storage(e) => Some(e),
            Self::CloseFailed(errors) => errors
                .first()
                .map(|e| e as &(dyn std::error::Error + 'static)),
            Self::UnsupportedOperation { .. } | Self::UnsupportedPredicate { .. } => None,
        }
    }
}

impl From<StorageError> for IndexError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<KeyError> for IndexError {
    fn from(e: KeyError) -> Self {
        Self::Key(e)
    }
}

//! Error taxonomy for the book store. Business-rule rejections (unknown id,
//! duplicate id, borrowing a borrowed book) are ordinary outcomes the menu
//! reports and moves on from; malformed records and I/O failures are the only
//! variants that mean something is actually wrong with the data file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything a [`crate::store::Library`] operation can reject or fail with.
///
/// The `Display` text of the recoverable variants is shown to the user as-is,
/// so it follows the wording of the menu messages.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// No book carries the requested id.
    #[error("Book not found.")]
    NotFound { id: String },

    /// An add was attempted with an id that is already in the catalog.
    #[error("Book ID already exists. Try again.")]
    Conflict { id: String },

    /// Borrow on a book that is already out.
    #[error("Book '{title}' is already borrowed by {borrower}.")]
    AlreadyBorrowed { title: String, borrower: String },

    /// Return on a book that is already on the shelf.
    #[error("Book '{title}' is already available.")]
    AlreadyAvailable { title: String },

    /// Input the file format cannot hold (empty id, embedded separators).
    #[error("{0}")]
    InvalidInput(String),

    /// A stored line could not be turned into a book.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Reading or writing the books file failed.
    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LibraryError {
    /// Whether the error is a business-rule outcome the menu can report and
    /// continue from, as opposed to a data or I/O failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LibraryError::NotFound { .. }
                | LibraryError::Conflict { .. }
                | LibraryError::AlreadyBorrowed { .. }
                | LibraryError::AlreadyAvailable { .. }
                | LibraryError::InvalidInput(_)
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LibraryError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_rejections_are_recoverable() {
        assert!(LibraryError::NotFound { id: "B1".into() }.is_recoverable());
        assert!(LibraryError::Conflict { id: "B1".into() }.is_recoverable());
        assert!(LibraryError::AlreadyAvailable {
            title: "Dune".into()
        }
        .is_recoverable());
        assert!(!LibraryError::MalformedRecord {
            line: 3,
            reason: "expected 6 fields, found 2".into()
        }
        .is_recoverable());
    }

    #[test]
    fn messages_match_menu_wording() {
        let err = LibraryError::AlreadyBorrowed {
            title: "Dune".into(),
            borrower: "Sam".into(),
        };
        assert_eq!(err.to_string(), "Book 'Dune' is already borrowed by Sam.");
        assert_eq!(
            LibraryError::NotFound { id: "X".into() }.to_string(),
            "Book not found."
        );
    }
}

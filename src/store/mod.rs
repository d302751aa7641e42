//! The record store: an ordered catalog of books mirrored to a flat file.
//! Every successful mutation rewrites the file before returning, so the file
//! always reflects what the menu last reported.

mod books;
mod file;

use std::path::{Path, PathBuf};

use log::error;

use crate::error::LibraryError;
use crate::models::Book;

use file::Loaded;

pub use books::{NO_BOOKS, NO_MATCH};

/// Notice surfaced when the catalog starts without a books file.
pub const FRESH_START_NOTICE: &str = "No existing books file. Starting fresh.";

/// In-memory catalog plus the path of the file that mirrors it.
#[derive(Debug)]
pub struct Library {
    path: PathBuf,
    books: Vec<Book>,
    notice: Option<&'static str>,
}

impl Library {
    /// Load the catalog stored at `path`. A missing file yields an empty
    /// catalog with [`FRESH_START_NOTICE`] attached; a malformed line fails
    /// the whole open.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let path = path.into();
        let (books, notice) = match file::load_books(&path)? {
            Loaded::Books(books) => (books, None),
            Loaded::Missing => (Vec::new(), Some(FRESH_START_NOTICE)),
        };
        Ok(Self {
            path,
            books,
            notice,
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Informational message produced while opening, if any.
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    /// All books in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// First book whose id equals `id` exactly.
    pub fn find(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    /// Write the catalog out. When the write fails, `rollback` undoes the
    /// mutation that was just applied so memory keeps matching the file.
    fn persist_or_rollback(
        &mut self,
        rollback: impl FnOnce(&mut Vec<Book>),
    ) -> Result<(), LibraryError> {
        if let Err(err) = file::save_books(&self.path, &self.books) {
            error!(
                "event=library_save module=store status=error path={} error={}",
                self.path.display(),
                err
            );
            rollback(&mut self.books);
            return Err(err);
        }
        Ok(())
    }
}

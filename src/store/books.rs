use std::mem;

use log::{info, warn};

use crate::error::LibraryError;
use crate::models::{table_heading, Book, BookStatus};

use super::file::SEPARATOR;
use super::Library;

/// Listing line shown when the catalog is empty.
pub const NO_BOOKS: &str = "No books available.";
/// Listing line shown when a search matches nothing.
pub const NO_MATCH: &str = "Book not found.";

impl Library {
    /// Catalog a new book at the end of the list. Inputs are trimmed first,
    /// so the duplicate check compares the trimmed id exactly (case-sensitive):
    /// `" B1"` conflicts with an existing `B1`. The id must be non-empty.
    pub fn add_book(
        &mut self,
        id: &str,
        title: &str,
        author: &str,
        year: &str,
    ) -> Result<&Book, LibraryError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(LibraryError::InvalidInput("Book ID is required.".into()));
        }
        if self.find(id).is_some() {
            warn!("event=book_add module=store status=rejected reason=duplicate_id id={id}");
            return Err(LibraryError::Conflict { id: id.to_string() });
        }

        let (title, author, year) = (title.trim(), author.trim(), year.trim());
        for (name, value) in [("Book ID", id), ("Title", title), ("Author", author), ("Year", year)]
        {
            ensure_storable(name, value)?;
        }

        self.books.push(Book::new(id, title, author, year));
        self.persist_or_rollback(|books| {
            books.pop();
        })?;

        info!("event=book_add module=store status=ok id={id}");
        Ok(&self.books[self.books.len() - 1])
    }

    /// Rendered catalog: header, rule and one row per book, or
    /// [`NO_BOOKS`] alone when there is nothing to show.
    pub fn view(&self) -> Vec<String> {
        if self.books.is_empty() {
            return vec![NO_BOOKS.to_string()];
        }
        table_heading()
            .into_iter()
            .chain(self.books.iter().map(Book::to_string))
            .collect()
    }

    /// Books whose id or title contains `query`, ignoring case, in catalog
    /// order.
    pub fn search(&self, query: &str) -> Vec<&Book> {
        let needle = query.to_lowercase();
        self.books
            .iter()
            .filter(|book| book.matches_lowercase(&needle))
            .collect()
    }

    /// Rendered search results. The header is always printed; [`NO_MATCH`]
    /// follows it when nothing matched.
    pub fn search_listing(&self, query: &str) -> Vec<String> {
        let matches = self.search(query);
        let mut lines: Vec<String> = table_heading().into_iter().collect();
        if matches.is_empty() {
            lines.push(NO_MATCH.to_string());
        } else {
            lines.extend(matches.into_iter().map(Book::to_string));
        }
        lines
    }

    /// The book `id` if it exists and is on the shelf. The menu checks this
    /// before asking for a borrower name.
    pub fn available_for_loan(&self, id: &str) -> Result<&Book, LibraryError> {
        self.lendable_index(id).map(|index| &self.books[index])
    }

    /// Lend the book `id` to `borrower`. Only the first book carrying the id
    /// is considered.
    pub fn borrow_book(&mut self, id: &str, borrower: &str) -> Result<&Book, LibraryError> {
        let index = self.lendable_index(id)?;

        let borrower = borrower.trim();
        if borrower.is_empty() {
            return Err(LibraryError::InvalidInput(
                "Borrower name is required.".into(),
            ));
        }
        ensure_storable("Borrower name", borrower)?;

        let previous = mem::replace(
            &mut self.books[index].status,
            BookStatus::Borrowed {
                borrower: borrower.to_string(),
            },
        );
        self.persist_or_rollback(|books| books[index].status = previous)?;

        info!("event=book_borrow module=store status=ok id={id}");
        Ok(&self.books[index])
    }

    /// Put the book `id` back on the shelf.
    pub fn return_book(&mut self, id: &str) -> Result<&Book, LibraryError> {
        let index = self
            .position(id)
            .ok_or_else(|| LibraryError::NotFound { id: id.to_string() })?;

        let book = &self.books[index];
        if book.status.is_available() {
            warn!("event=book_return module=store status=rejected reason=already_available id={id}");
            return Err(LibraryError::AlreadyAvailable {
                title: book.title.clone(),
            });
        }

        let previous = mem::take(&mut self.books[index].status);
        self.persist_or_rollback(|books| books[index].status = previous)?;

        info!("event=book_return module=store status=ok id={id}");
        Ok(&self.books[index])
    }

    /// Remove the first book carrying `id` and hand it back.
    pub fn delete_book(&mut self, id: &str) -> Result<Book, LibraryError> {
        let index = self
            .position(id)
            .ok_or_else(|| LibraryError::NotFound { id: id.to_string() })?;

        let removed = self.books.remove(index);
        let restore = removed.clone();
        self.persist_or_rollback(|books| books.insert(index, restore))?;

        info!("event=book_delete module=store status=ok id={id}");
        Ok(removed)
    }

    fn lendable_index(&self, id: &str) -> Result<usize, LibraryError> {
        let index = self
            .position(id)
            .ok_or_else(|| LibraryError::NotFound { id: id.to_string() })?;

        let book = &self.books[index];
        if let BookStatus::Borrowed { borrower } = &book.status {
            warn!("event=book_borrow module=store status=rejected reason=already_borrowed id={id}");
            return Err(LibraryError::AlreadyBorrowed {
                title: book.title.clone(),
                borrower: borrower.clone(),
            });
        }
        Ok(index)
    }
}

/// Reject values the line format cannot round-trip.
fn ensure_storable(name: &str, value: &str) -> Result<(), LibraryError> {
    if value.contains(SEPARATOR) || value.contains(['\n', '\r']) {
        return Err(LibraryError::InvalidInput(format!(
            "{name} may not contain commas or line breaks."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> (tempfile::TempDir, Library) {
        let dir = tempfile::tempdir().unwrap();
        let library = Library::open(dir.path().join("books.txt")).unwrap();
        (dir, library)
    }

    #[test]
    fn add_trims_and_rejects_separators() {
        let (_dir, mut library) = library();
        let book = library.add_book(" B1 ", " Dune ", "Herbert", "1965").unwrap();
        assert_eq!(book.id, "B1");
        assert_eq!(book.title, "Dune");

        let err = library
            .add_book("B2", "Dune, Messiah", "Herbert", "1969")
            .unwrap_err();
        assert!(matches!(err, LibraryError::InvalidInput(_)));
        assert!(matches!(
            library.add_book("  ", "Untitled", "", ""),
            Err(LibraryError::InvalidInput(_))
        ));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn borrow_requires_a_name() {
        let (_dir, mut library) = library();
        library.add_book("B1", "Dune", "Herbert", "1965").unwrap();
        assert!(matches!(
            library.borrow_book("B1", "   "),
            Err(LibraryError::InvalidInput(_))
        ));
        assert!(library.find("B1").unwrap().status.is_available());
    }

    #[test]
    fn rejection_takes_priority_over_name_validation() {
        let (_dir, mut library) = library();
        library.add_book("B1", "Dune", "Herbert", "1965").unwrap();
        library.borrow_book("B1", "Sam").unwrap();
        assert!(matches!(
            library.borrow_book("B1", ""),
            Err(LibraryError::AlreadyBorrowed { .. })
        ));
        assert!(matches!(
            library.borrow_book("missing", "Sam"),
            Err(LibraryError::NotFound { .. })
        ));
    }

    #[test]
    fn view_of_empty_catalog_is_a_single_notice() {
        let (_dir, library) = library();
        assert_eq!(library.view(), vec![NO_BOOKS.to_string()]);
    }

    #[test]
    fn search_listing_keeps_header_when_empty() {
        let (_dir, mut library) = library();
        library.add_book("B1", "Dune", "Herbert", "1965").unwrap();
        let lines = library.search_listing("emma");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], NO_MATCH);

        let lines = library.search_listing("DUNE");
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("B1"));
    }
}

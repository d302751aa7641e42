//! The flat-file format behind the store: one book per line, six
//! comma-joined fields `id,title,author,year,status,borrower`. There is no
//! escaping, so the store refuses field values containing the separator
//! before they ever reach this module.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::error::LibraryError;
use crate::models::{Book, BookStatus, LendingState};

/// Field separator of the books file.
pub(crate) const SEPARATOR: &str = ",";
/// Number of fields every stored line must split into.
pub(crate) const FIELD_COUNT: usize = 6;

/// Outcome of reading the books file.
#[derive(Debug)]
pub(crate) enum Loaded {
    /// The file existed and every line parsed.
    Books(Vec<Book>),
    /// No file yet; the catalog starts empty.
    Missing,
}

/// Read every book from `path`, in file order.
///
/// A missing file is not an error. The first malformed line aborts the whole
/// load so a half-read catalog is never handed back (and later saved over
/// the intact tail of the file).
pub(crate) fn load_books(path: &Path) -> Result<Loaded, LibraryError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(
                "event=library_load module=store status=missing path={}",
                path.display()
            );
            return Ok(Loaded::Missing);
        }
        Err(err) => return Err(LibraryError::io(path, err)),
    };

    let mut books = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|err| LibraryError::io(path, err))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        books.push(parse_line(line, index + 1)?);
    }

    info!(
        "event=library_load module=store status=ok count={} path={}",
        books.len(),
        path.display()
    );
    Ok(Loaded::Books(books))
}

/// Overwrite `path` with the full catalog. Not atomic: a crash mid-write can
/// leave a truncated file behind.
pub(crate) fn save_books(path: &Path, books: &[Book]) -> Result<(), LibraryError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| LibraryError::io(parent, err))?;
    }

    let file = File::create(path).map_err(|err| LibraryError::io(path, err))?;
    let mut writer = BufWriter::new(file);
    for book in books {
        writeln!(writer, "{}", encode_line(book)).map_err(|err| LibraryError::io(path, err))?;
    }
    let file = writer
        .into_inner()
        .map_err(|err| LibraryError::io(path, err.into_error()))?;
    file.sync_all().map_err(|err| LibraryError::io(path, err))?;

    debug!(
        "event=library_save module=store status=ok count={} path={}",
        books.len(),
        path.display()
    );
    Ok(())
}

/// Decode one trimmed line. `line_number` is 1-based and only used for
/// diagnostics.
///
/// Only the field count is checked. The borrower field decides the status:
/// a status word that disagrees with it (or is not a known word) is logged
/// and replaced, never rejected.
pub(crate) fn parse_line(line: &str, line_number: usize) -> Result<Book, LibraryError> {
    let fields: Vec<&str> = line.split(SEPARATOR).collect();
    let &[id, title, author, year, status_word, borrower] = fields.as_slice() else {
        return Err(LibraryError::MalformedRecord {
            line: line_number,
            reason: format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
        });
    };

    let status = if borrower.is_empty() {
        BookStatus::Available
    } else {
        BookStatus::Borrowed {
            borrower: borrower.to_string(),
        }
    };
    let stored = status_word.parse::<LendingState>();
    if stored != Ok(lending_state(&status)) {
        warn!(
            "event=library_load module=store status=normalized line={line_number} id={id} stored_status={status_word} loaded_status={}",
            status.label()
        );
    }

    Ok(Book {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        year: year.to_string(),
        status,
    })
}

fn lending_state(status: &BookStatus) -> LendingState {
    match status {
        BookStatus::Available => LendingState::Available,
        BookStatus::Borrowed { .. } => LendingState::Borrowed,
    }
}

/// Encode one book as a stored line, without the terminator.
pub(crate) fn encode_line(book: &Book) -> String {
    [
        book.id.as_str(),
        book.title.as_str(),
        book.author.as_str(),
        book.year.as_str(),
        book.status.label(),
        book.borrower(),
    ]
    .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_available_and_borrowed_lines() {
        let book = parse_line("B1,Dune,Herbert,1965,Available,", 1).unwrap();
        assert_eq!(book, Book::new("B1", "Dune", "Herbert", "1965"));

        let book = parse_line("B2,Emma,Austen,1815,Borrowed,Sam", 2).unwrap();
        assert_eq!(book.borrower(), "Sam");
        assert_eq!(book.status.label(), "Borrowed");
    }

    #[test]
    fn wrong_field_count_reports_line_number() {
        let err = parse_line("B1,Dune,Herbert", 4).unwrap_err();
        match err {
            LibraryError::MalformedRecord { line, reason } => {
                assert_eq!(line, 4);
                assert!(reason.contains("found 3"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(parse_line("B1,A, title,Herbert,1965,Available,", 1).is_err());
    }

    #[test]
    fn borrower_field_decides_the_status() {
        let book = parse_line("B1,Dune,Herbert,1965,Borrowed,", 1).unwrap();
        assert_eq!(book.status, BookStatus::Available);
        assert_eq!(book.borrower(), "");

        let book = parse_line("B1,Dune,Herbert,1965,Available,Sam", 1).unwrap();
        assert_eq!(
            book.status,
            BookStatus::Borrowed {
                borrower: "Sam".into()
            }
        );

        let book = parse_line("B1,Dune,Herbert,1965,Lost,", 1).unwrap();
        assert!(book.status.is_available());
    }

    #[test]
    fn encodes_six_fields() {
        let mut book = Book::new("B1", "Dune", "Herbert", "1965");
        assert_eq!(encode_line(&book), "B1,Dune,Herbert,1965,Available,");
        book.status = BookStatus::Borrowed {
            borrower: "Sam".into(),
        };
        assert_eq!(encode_line(&book), "B1,Dune,Herbert,1965,Borrowed,Sam");
    }

    #[test]
    fn missing_file_loads_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_books(&dir.path().join("books.txt")).unwrap();
        assert!(matches!(loaded, Loaded::Missing));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("books.txt");
        save_books(&path, &[Book::new("B1", "Dune", "Herbert", "1965")]).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "B1,Dune,Herbert,1965,Available,\n"
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.txt");
        fs::write(
            &path,
            "B1,Dune,Herbert,1965,Available,\n\nB2,Emma,Austen,1815,Borrowed,Pat\n",
        )
        .unwrap();
        let Loaded::Books(books) = load_books(&path).unwrap() else {
            panic!("expected books");
        };
        assert_eq!(books.len(), 2);
        assert_eq!(books[1].id, "B2");
    }
}

//! Domain models for the catalog. A [`Book`] is a light-weight data holder;
//! the store owns the collection and the UI only ever renders it. The one
//! rule the type itself guards is the pairing of status and borrower: the
//! borrower name only exists inside [`BookStatus::Borrowed`].

use std::fmt;
use std::str::FromStr;

/// Column header matching the row layout produced by `Book`'s `Display`.
pub const TABLE_HEADER: &str =
    "ID    | Title                | Author          | Year  | Status     | Borrower";
/// Width of the dashed rule printed under [`TABLE_HEADER`].
pub const TABLE_RULE_WIDTH: usize = 80;

const ID_WIDTH: usize = 5;
const TITLE_WIDTH: usize = 20;
const AUTHOR_WIDTH: usize = 15;
const YEAR_WIDTH: usize = 5;
const STATUS_WIDTH: usize = 10;

/// Lending state of a book.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BookStatus {
    #[default]
    Available,
    Borrowed {
        borrower: String,
    },
}

impl BookStatus {
    pub const AVAILABLE: &'static str = "Available";
    pub const BORROWED: &'static str = "Borrowed";

    /// The word written to the books file and shown in the status column.
    pub fn label(&self) -> &'static str {
        match self {
            BookStatus::Available => Self::AVAILABLE,
            BookStatus::Borrowed { .. } => Self::BORROWED,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, BookStatus::Available)
    }
}

/// The status column alone, parsed from its stored word. The borrower is
/// attached separately when a record is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LendingState {
    Available,
    Borrowed,
}

impl FromStr for LendingState {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            BookStatus::AVAILABLE => Ok(LendingState::Available),
            BookStatus::BORROWED => Ok(LendingState::Borrowed),
            other => Err(format!("unknown status `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One catalog entry.
pub struct Book {
    /// Unique key, compared exactly (case-sensitive).
    pub id: String,
    pub title: String,
    pub author: String,
    /// Publication year as typed by the user. Not validated as a number.
    pub year: String,
    pub status: BookStatus,
}

impl Book {
    /// A freshly catalogued book, always on the shelf.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            year: year.into(),
            status: BookStatus::Available,
        }
    }

    /// Name of whoever has the book, or `""` while it is available.
    pub fn borrower(&self) -> &str {
        match &self.status {
            BookStatus::Available => "",
            BookStatus::Borrowed { borrower } => borrower,
        }
    }

    /// Case-insensitive substring match against the id or the title.
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(needle) || self.title.to_lowercase().contains(needle)
    }
}

impl fmt::Display for Book {
    /// Fixed-width table row. Columns are left-aligned, padded and cut to
    /// their width; the borrower trails unpadded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {} | {}",
            fit(&self.id, ID_WIDTH),
            fit(&self.title, TITLE_WIDTH),
            fit(&self.author, AUTHOR_WIDTH),
            fit(&self.year, YEAR_WIDTH),
            fit(self.status.label(), STATUS_WIDTH),
            self.borrower()
        )
    }
}

/// Pad `value` with spaces to exactly `width` chars, truncating longer input.
fn fit(value: &str, width: usize) -> String {
    let truncated: String = value.chars().take(width).collect();
    format!("{truncated:<width$}")
}

/// Header line followed by the dashed rule.
pub fn table_heading() -> [String; 2] {
    [TABLE_HEADER.to_string(), "-".repeat(TABLE_RULE_WIDTH)]
}

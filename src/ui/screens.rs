use crate::store::Library;

/// Entries of the main menu, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum MenuItem {
    AddBook,
    ViewBooks,
    SearchBook,
    BorrowBook,
    ReturnBook,
    DeleteBook,
    Exit,
}

impl MenuItem {
    pub(crate) const ALL: [MenuItem; 7] = [
        MenuItem::AddBook,
        MenuItem::ViewBooks,
        MenuItem::SearchBook,
        MenuItem::BorrowBook,
        MenuItem::ReturnBook,
        MenuItem::DeleteBook,
        MenuItem::Exit,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            MenuItem::AddBook => "Add Book",
            MenuItem::ViewBooks => "View All Books",
            MenuItem::SearchBook => "Search Book",
            MenuItem::BorrowBook => "Borrow Book",
            MenuItem::ReturnBook => "Return Book",
            MenuItem::DeleteBook => "Delete Book",
            MenuItem::Exit => "Exit",
        }
    }

    /// Map the digit shortcut (`'1'` to `'7'`) to its entry.
    pub(crate) fn from_digit(ch: char) -> Option<Self> {
        let index = ch.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }
}

/// Selection state of the menu column.
#[derive(Default)]
pub(crate) struct MenuScreen {
    pub(crate) selected: usize,
}

impl MenuScreen {
    pub(crate) fn current(&self) -> MenuItem {
        MenuItem::ALL[self.selected.min(MenuItem::ALL.len() - 1)]
    }

    /// Move the highlight, wrapping around both ends.
    pub(crate) fn move_selection(&mut self, delta: isize) {
        let len = MenuItem::ALL.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }
}

/// What produced the lines currently in the output panel, so they can be
/// recomputed after a mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Listing {
    All,
    Search(String),
}

/// Right-hand panel showing the last listing.
pub(crate) struct OutputPanel {
    pub(crate) title: String,
    pub(crate) lines: Vec<String>,
    pub(crate) scroll: u16,
    pub(crate) source: Option<Listing>,
}

impl Default for OutputPanel {
    fn default() -> Self {
        Self {
            title: "Library".to_string(),
            lines: vec!["Choose an option from the menu.".to_string()],
            scroll: 0,
            source: None,
        }
    }
}

impl OutputPanel {
    /// Replace the panel with a freshly computed listing.
    pub(crate) fn show(&mut self, library: &Library, listing: Listing) {
        let (title, lines) = match &listing {
            Listing::All => ("All Books".to_string(), library.view()),
            Listing::Search(query) => (
                format!("Search Results: {query}"),
                library.search_listing(query),
            ),
        };
        self.title = title;
        self.lines = lines;
        self.scroll = 0;
        self.source = Some(listing);
    }

    /// Recompute the current listing after the catalog changed.
    pub(crate) fn refresh(&mut self, library: &Library) {
        if let Some(listing) = self.source.clone() {
            let scroll = self.scroll;
            self.show(library, listing);
            self.scroll = scroll.min(self.lines.len().saturating_sub(1) as u16);
        }
    }

    pub(crate) fn scroll_by(&mut self, delta: i32, max: u16) {
        let next = (self.scroll as i32 + delta).clamp(0, max as i32);
        self.scroll = next as u16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_menu_entries() {
        assert_eq!(MenuItem::from_digit('1'), Some(MenuItem::AddBook));
        assert_eq!(MenuItem::from_digit('7'), Some(MenuItem::Exit));
        assert_eq!(MenuItem::from_digit('0'), None);
        assert_eq!(MenuItem::from_digit('8'), None);
        assert_eq!(MenuItem::from_digit('x'), None);
    }

    #[test]
    fn selection_wraps() {
        let mut menu = MenuScreen::default();
        menu.move_selection(-1);
        assert_eq!(menu.current(), MenuItem::Exit);
        menu.move_selection(1);
        assert_eq!(menu.current(), MenuItem::AddBook);
    }

    #[test]
    fn refresh_recomputes_listing() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = Library::open(dir.path().join("books.txt")).unwrap();
        let mut panel = OutputPanel::default();
        panel.refresh(&library);
        assert_eq!(panel.source, None);

        panel.show(&library, Listing::All);
        assert_eq!(panel.lines, vec!["No books available.".to_string()]);

        library.add_book("B1", "Dune", "Herbert", "1965").unwrap();
        panel.refresh(&library);
        assert_eq!(panel.lines.len(), 3);
    }
}

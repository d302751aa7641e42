use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Internal representation of the "add book" form fields.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: String,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

/// Fields available within the book form, in tab order.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum BookField {
    #[default]
    Id,
    Title,
    Author,
    Year,
}

impl BookField {
    pub(crate) const ALL: [BookField; 4] = [
        BookField::Id,
        BookField::Title,
        BookField::Author,
        BookField::Year,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Id => "Book ID",
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Year => "Year",
        }
    }

    /// Row of the field inside the form popup.
    pub(crate) fn row(self) -> u16 {
        match self {
            BookField::Id => 0,
            BookField::Title => 1,
            BookField::Author => 2,
            BookField::Year => 3,
        }
    }
}

impl BookForm {
    /// Cycle focus across the four fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            BookField::Id => BookField::Title,
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Year,
            BookField::Year => BookField::Id,
        };
    }

    /// Insert a character into the active field.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value_mut(self.active).push(ch);
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        self.value_mut(self.active).pop();
    }

    pub(crate) fn value(&self, field: BookField) -> &str {
        match field {
            BookField::Id => &self.id,
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Year => &self.year,
        }
    }

    fn value_mut(&mut self, field: BookField) -> &mut String {
        match field {
            BookField::Id => &mut self.id,
            BookField::Title => &mut self.title,
            BookField::Author => &mut self.author,
            BookField::Year => &mut self.year,
        }
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: BookField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() && field == BookField::Id {
            "<required>".to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        self.value(field).chars().count()
    }
}

/// What a single-line prompt is collecting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PromptAction {
    Search,
    BorrowId,
    /// Second step of a borrow, once the book is known to be available.
    BorrowerName { id: String, title: String },
    ReturnId,
    DeleteId,
}

impl PromptAction {
    pub(crate) fn title(&self) -> &'static str {
        match self {
            PromptAction::Search => "Search Book",
            PromptAction::BorrowId | PromptAction::BorrowerName { .. } => "Borrow Book",
            PromptAction::ReturnId => "Return Book",
            PromptAction::DeleteId => "Delete Book",
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            PromptAction::Search => "Enter Book ID or Title",
            PromptAction::BorrowerName { .. } => "Enter your name",
            PromptAction::BorrowId | PromptAction::ReturnId | PromptAction::DeleteId => {
                "Enter Book ID"
            }
        }
    }
}

/// Single-line input state.
#[derive(Clone)]
pub(crate) struct Prompt {
    pub(crate) action: PromptAction,
    pub(crate) input: String,
    pub(crate) error: Option<String>,
}

impl Prompt {
    pub(crate) fn new(action: PromptAction) -> Self {
        Self {
            action,
            input: String::new(),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.input.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.input.pop();
    }

    /// The text before the cursor, e.g. `Enter Book ID: `.
    pub(crate) fn prefix(&self) -> String {
        format!("{}: ", self.action.label())
    }
}

#[derive(Clone)]
pub(crate) struct ConfirmBookDelete {
    pub(crate) id: String,
    pub(crate) title: String,
}

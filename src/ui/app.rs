use std::mem;

use anyhow::{Error, Result};
use crossterm::event::KeyCode;
use log::error;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::error::LibraryError;
use crate::store::Library;

use super::forms::{BookField, BookForm, ConfirmBookDelete, Prompt, PromptAction};
use super::helpers::{centered_rect, max_scroll, surface_error};
use super::screens::{Listing, MenuItem, MenuScreen, OutputPanel};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Width of the menu column.
const MENU_WIDTH: u16 = 24;
/// Lines moved per PageUp/PageDown.
const PAGE_STEP: i32 = 10;

/// Fine-grained modes layered over the menu.
enum Mode {
    Normal,
    AddingBook(BookForm),
    Prompting(Prompt),
    ConfirmDelete(ConfirmBookDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Debug, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Owns the catalog for
/// the lifetime of the session.
pub struct App {
    library: Library,
    menu: MenuScreen,
    output: OutputPanel,
    output_height: u16,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(library: Library) -> Self {
        let mut app = Self {
            library,
            menu: MenuScreen::default(),
            output: OutputPanel::default(),
            output_height: 0,
            mode: Mode::Normal,
            status: None,
        };
        if let Some(notice) = app.library.notice() {
            app.set_status(notice, StatusKind::Info);
        }
        app
    }

    /// Process one key press. Returns `true` when the user asked to exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form)?,
            Mode::Prompting(prompt) => self.handle_prompt(code, prompt)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
        };

        Ok(exit)
    }

    /// Show an error that escaped a key handler without ending the session.
    pub fn report_failure(&mut self, err: &Error) {
        error!("event=ui_action module=ui status=error error={err:#}");
        self.mode = Mode::Normal;
        self.set_status(
            format!("An error occurred: {}", surface_error(err)),
            StatusKind::Error,
        );
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let mode = match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
                Mode::Normal
            }
            KeyCode::Up => {
                self.menu.move_selection(-1);
                Mode::Normal
            }
            KeyCode::Down => {
                self.menu.move_selection(1);
                Mode::Normal
            }
            KeyCode::PageUp => {
                self.scroll_output(-PAGE_STEP);
                Mode::Normal
            }
            KeyCode::PageDown => {
                self.scroll_output(PAGE_STEP);
                Mode::Normal
            }
            KeyCode::Enter => self.activate(self.menu.current(), exit),
            KeyCode::Char(ch) if ch.is_ascii_digit() => match MenuItem::from_digit(ch) {
                Some(item) => {
                    self.menu.selected = MenuItem::ALL
                        .iter()
                        .position(|candidate| *candidate == item)
                        .unwrap_or_default();
                    self.activate(item, exit)
                }
                None => {
                    self.set_status("Invalid option.", StatusKind::Error);
                    Mode::Normal
                }
            },
            _ => Mode::Normal,
        };
        Ok(mode)
    }

    fn activate(&mut self, item: MenuItem, exit: &mut bool) -> Mode {
        self.clear_status();
        match item {
            MenuItem::AddBook => Mode::AddingBook(BookForm::default()),
            MenuItem::ViewBooks => {
                self.output.show(&self.library, Listing::All);
                Mode::Normal
            }
            MenuItem::SearchBook => Mode::Prompting(Prompt::new(PromptAction::Search)),
            MenuItem::BorrowBook => Mode::Prompting(Prompt::new(PromptAction::BorrowId)),
            MenuItem::ReturnBook => Mode::Prompting(Prompt::new(PromptAction::ReturnId)),
            MenuItem::DeleteBook => Mode::Prompting(Prompt::new(PromptAction::DeleteId)),
            MenuItem::Exit => {
                *exit = true;
                Mode::Normal
            }
        }
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Add cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Tab | KeyCode::Down => form.toggle_field(),
            KeyCode::BackTab | KeyCode::Up => {
                for _ in 0..BookField::ALL.len() - 1 {
                    form.toggle_field();
                }
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            KeyCode::Enter => {
                let outcome = self
                    .library
                    .add_book(&form.id, &form.title, &form.author, &form.year)
                    .map(|_| ());
                return match outcome {
                    Ok(()) => {
                        self.output.refresh(&self.library);
                        self.set_status("Book added successfully.", StatusKind::Info);
                        Ok(Mode::Normal)
                    }
                    Err(err) if err.is_recoverable() => {
                        form.error = Some(err.to_string());
                        Ok(Mode::AddingBook(form))
                    }
                    Err(err) => Err(err.into()),
                };
            }
            _ => {}
        }
        form.error = None;
        Ok(Mode::AddingBook(form))
    }

    fn handle_prompt(&mut self, code: KeyCode, mut prompt: Prompt) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.clear_status();
                Ok(Mode::Normal)
            }
            KeyCode::Backspace => {
                prompt.backspace();
                prompt.error = None;
                Ok(Mode::Prompting(prompt))
            }
            KeyCode::Char(ch) => {
                prompt.push_char(ch);
                prompt.error = None;
                Ok(Mode::Prompting(prompt))
            }
            KeyCode::Enter => self.submit_prompt(prompt),
            _ => Ok(Mode::Prompting(prompt)),
        }
    }

    fn submit_prompt(&mut self, mut prompt: Prompt) -> Result<Mode> {
        let input = prompt.input.trim().to_string();
        match prompt.action.clone() {
            PromptAction::Search => {
                let found = !self.library.search(&prompt.input).is_empty();
                self.output
                    .show(&self.library, Listing::Search(prompt.input.clone()));
                if !found {
                    self.set_status(crate::store::NO_MATCH, StatusKind::Error);
                }
                Ok(Mode::Normal)
            }
            PromptAction::BorrowId => {
                let outcome = self
                    .library
                    .available_for_loan(&input)
                    .map(|book| (book.id.clone(), book.title.clone()));
                match self.settle(outcome)? {
                    Some((id, title)) => Ok(Mode::Prompting(Prompt::new(
                        PromptAction::BorrowerName { id, title },
                    ))),
                    None => Ok(Mode::Normal),
                }
            }
            PromptAction::BorrowerName { id, .. } => {
                let outcome = self
                    .library
                    .borrow_book(&id, &prompt.input)
                    .map(|book| book.title.clone());
                match outcome {
                    Ok(title) => {
                        self.output.refresh(&self.library);
                        self.set_status(
                            format!("Book '{title}' borrowed successfully."),
                            StatusKind::Info,
                        );
                        Ok(Mode::Normal)
                    }
                    Err(LibraryError::InvalidInput(message)) => {
                        prompt.error = Some(message);
                        Ok(Mode::Prompting(prompt))
                    }
                    Err(err) => {
                        self.settle::<()>(Err(err))?;
                        Ok(Mode::Normal)
                    }
                }
            }
            PromptAction::ReturnId => {
                let outcome = self
                    .library
                    .return_book(&input)
                    .map(|book| book.title.clone());
                if let Some(title) = self.settle(outcome)? {
                    self.output.refresh(&self.library);
                    self.set_status(
                        format!("Book '{title}' returned successfully."),
                        StatusKind::Info,
                    );
                }
                Ok(Mode::Normal)
            }
            PromptAction::DeleteId => {
                let outcome = self
                    .library
                    .find(&input)
                    .map(|book| ConfirmBookDelete {
                        id: book.id.clone(),
                        title: book.title.clone(),
                    })
                    .ok_or(LibraryError::NotFound { id: input });
                Ok(match self.settle(outcome)? {
                    Some(confirm) => Mode::ConfirmDelete(confirm),
                    None => Mode::Normal,
                })
            }
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmBookDelete) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let outcome = self.library.delete_book(&confirm.id);
                if let Some(book) = self.settle(outcome)? {
                    self.output.refresh(&self.library);
                    self.set_status(
                        format!("Book '{}' deleted successfully.", book.title),
                        StatusKind::Info,
                    );
                }
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.set_status("Delete cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    /// Turn a store result into a footer message. Business-rule rejections
    /// are reported and swallowed; anything else propagates.
    fn settle<T>(&mut self, outcome: std::result::Result<T, LibraryError>) -> Result<Option<T>> {
        match outcome {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                self.set_status(err.to_string(), StatusKind::Error);
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn scroll_output(&mut self, delta: i32) {
        let max = max_scroll(self.output.lines.len(), self.output_height);
        self.output.scroll_by(delta, max);
    }

    /// Track the output viewport so scrolling stops at the last line.
    pub(crate) fn set_viewport(&mut self, area: Rect) {
        self.output_height = self.layout(area).1.height.saturating_sub(2);
    }

    /// Split the screen into menu, output and footer areas.
    fn layout(&self, area: Rect) -> (Rect, Rect, Rect) {
        let footer_height = FOOTER_HEIGHT.min(area.height);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(MENU_WIDTH), Constraint::Min(0)])
            .split(rows[0]);
        (columns[0], columns[1], rows[1])
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let (menu_area, output_area, footer_area) = self.layout(area);

        self.draw_menu(frame, menu_area);
        self.draw_output(frame, output_area);
        self.draw_footer(frame, footer_area);

        match &self.mode {
            Mode::AddingBook(form) => self.draw_book_form(frame, area, form),
            Mode::Prompting(prompt) => self.draw_prompt(frame, area, prompt),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Normal => {}
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = MenuItem::ALL
            .iter()
            .enumerate()
            .map(|(index, item)| ListItem::new(format!("{}. {}", index + 1, item.label())))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Library Menu"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.menu.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_output(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .output
            .lines
            .iter()
            .map(|line| Line::from(line.as_str()))
            .collect();
        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.output.title.as_str()),
            )
            .scroll((self.output.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key = |text: &'static str| Span::styled(text, Style::default().fg(Color::Yellow));
        match &self.mode {
            Mode::Normal => Line::from(vec![
                key("1-7"),
                Span::raw(" Choose  "),
                key("↑/↓ Enter"),
                Span::raw(" Select  "),
                key("PgUp/PgDn"),
                Span::raw(" Scroll  "),
                key("q"),
                Span::raw(" Quit"),
            ]),
            Mode::AddingBook(_) => Line::from(vec![
                key("Tab"),
                Span::raw(" Next field  "),
                key("Enter"),
                Span::raw(" Save  "),
                key("Esc"),
                Span::raw(" Cancel"),
            ]),
            Mode::Prompting(_) => Line::from(vec![
                key("Enter"),
                Span::raw(" Submit  "),
                key("Esc"),
                Span::raw(" Cancel"),
            ]),
            Mode::ConfirmDelete(_) => Line::from(vec![
                key("Y"),
                Span::raw(" Delete  "),
                key("N/Esc"),
                Span::raw(" Keep"),
            ]),
        }
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, form: &BookForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = BookField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let prefix = format!("{}: ", form.active.label()).len() as u16;
        frame.set_cursor_position((
            inner.x + prefix + form.value_len(form.active) as u16,
            inner.y + form.active.row(),
        ));
    }

    fn draw_prompt(&self, frame: &mut Frame, area: Rect, prompt: &Prompt) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(prompt.action.title())
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let prefix = prompt.prefix();
        let mut lines = Vec::new();
        if let PromptAction::BorrowerName { title, .. } = &prompt.action {
            lines.push(Line::from(format!("Borrowing '{title}'.")));
        }
        let input_row = lines.len() as u16;
        lines.push(Line::from(vec![
            Span::raw(prefix.clone()),
            Span::styled(prompt.input.clone(), Style::default().fg(Color::Yellow)),
        ]));
        lines.push(Line::from(""));
        if let Some(error) = &prompt.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let paragraph = Paragraph::new(lines).alignment(Alignment::Left);
        frame.render_widget(paragraph, inner);

        frame.set_cursor_position((
            inner.x + prefix.chars().count() as u16 + prompt.input.chars().count() as u16,
            inner.y + input_row,
        ));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmBookDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Delete")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete '{}' ({})?", confirm.title, confirm.id)),
            Line::from("This cannot be undone."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::models::BookStatus;

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let library = Library::open(dir.path().join("books.txt")).unwrap();
        (dir, App::new(library))
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            assert!(!app.handle_key(*code).unwrap());
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    fn status(app: &App) -> (&str, &StatusKind) {
        let status = app.status.as_ref().expect("status message");
        (status.text.as_str(), &status.kind)
    }

    fn add(app: &mut App, fields: [&str; 4]) {
        press(app, &[KeyCode::Char('1')]);
        for (index, value) in fields.iter().enumerate() {
            if index > 0 {
                press(app, &[KeyCode::Tab]);
            }
            type_text(app, value);
        }
        press(app, &[KeyCode::Enter]);
    }

    #[test]
    fn fresh_start_notice_is_shown() {
        let (_dir, app) = app();
        assert_eq!(status(&app).0, "No existing books file. Starting fresh.");
    }

    #[test]
    fn add_view_borrow_return_delete_flow() {
        let (dir, mut app) = app();

        add(&mut app, ["B1", "Dune", "Herbert", "1965"]);
        assert_eq!(status(&app).0, "Book added successfully.");
        assert!(matches!(app.mode, Mode::Normal));

        press(&mut app, &[KeyCode::Char('2')]);
        assert_eq!(app.output.lines.len(), 3);
        assert!(app.output.lines[2].contains("Available"));

        press(&mut app, &[KeyCode::Char('4')]);
        type_text(&mut app, "B1");
        press(&mut app, &[KeyCode::Enter]);
        assert!(matches!(
            &app.mode,
            Mode::Prompting(Prompt {
                action: PromptAction::BorrowerName { .. },
                ..
            })
        ));
        type_text(&mut app, "Sam");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(status(&app).0, "Book 'Dune' borrowed successfully.");
        assert!(app.output.lines[2].ends_with("Sam"));

        press(&mut app, &[KeyCode::Char('4')]);
        type_text(&mut app, "B1");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(
            status(&app),
            ("Book 'Dune' is already borrowed by Sam.", &StatusKind::Error)
        );
        assert!(matches!(app.mode, Mode::Normal));

        press(&mut app, &[KeyCode::Char('5')]);
        type_text(&mut app, "B1");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(status(&app).0, "Book 'Dune' returned successfully.");
        assert_eq!(app.library.books()[0].status, BookStatus::Available);

        press(&mut app, &[KeyCode::Char('6')]);
        type_text(&mut app, "B1");
        press(&mut app, &[KeyCode::Enter, KeyCode::Char('y')]);
        assert_eq!(status(&app).0, "Book 'Dune' deleted successfully.");
        assert_eq!(app.output.lines, vec!["No books available.".to_string()]);
        assert_eq!(
            fs::read_to_string(dir.path().join("books.txt")).unwrap(),
            ""
        );
    }

    #[test]
    fn duplicate_add_keeps_form_open_with_error() {
        let (_dir, mut app) = app();
        add(&mut app, ["B1", "Dune", "Herbert", "1965"]);
        add(&mut app, ["B1", "Emma", "Austen", "1815"]);

        match &app.mode {
            Mode::AddingBook(form) => {
                assert_eq!(
                    form.error.as_deref(),
                    Some("Book ID already exists. Try again.")
                );
            }
            _ => panic!("form should stay open"),
        }
        assert_eq!(app.library.len(), 1);

        press(&mut app, &[KeyCode::Esc]);
        assert!(matches!(app.mode, Mode::Normal));
    }

    #[test]
    fn unknown_ids_report_not_found() {
        let (_dir, mut app) = app();
        for digit in ['4', '5', '6'] {
            press(&mut app, &[KeyCode::Char(digit)]);
            type_text(&mut app, "nope");
            press(&mut app, &[KeyCode::Enter]);
            assert_eq!(status(&app), ("Book not found.", &StatusKind::Error));
            assert!(matches!(app.mode, Mode::Normal));
        }
    }

    #[test]
    fn empty_borrower_name_keeps_prompt_open() {
        let (_dir, mut app) = app();
        add(&mut app, ["B1", "Dune", "Herbert", "1965"]);
        press(&mut app, &[KeyCode::Char('4')]);
        type_text(&mut app, "B1");
        press(&mut app, &[KeyCode::Enter, KeyCode::Enter]);

        match &app.mode {
            Mode::Prompting(prompt) => {
                assert_eq!(prompt.error.as_deref(), Some("Borrower name is required."))
            }
            _ => panic!("borrower prompt should stay open"),
        }
        assert!(app.library.books()[0].status.is_available());
    }

    #[test]
    fn search_without_match_reports_not_found() {
        let (_dir, mut app) = app();
        add(&mut app, ["B1", "Dune", "Herbert", "1965"]);

        press(&mut app, &[KeyCode::Char('3')]);
        type_text(&mut app, "DUNE");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.output.lines.len(), 3);

        press(&mut app, &[KeyCode::Char('3')]);
        type_text(&mut app, "emma");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.output.lines.last().unwrap(), "Book not found.");
        assert_eq!(status(&app), ("Book not found.", &StatusKind::Error));
    }

    #[test]
    fn declining_delete_keeps_the_book() {
        let (_dir, mut app) = app();
        add(&mut app, ["B1", "Dune", "Herbert", "1965"]);
        press(&mut app, &[KeyCode::Char('6')]);
        type_text(&mut app, "B1");
        press(&mut app, &[KeyCode::Enter, KeyCode::Char('n')]);
        assert_eq!(status(&app).0, "Delete cancelled.");
        assert_eq!(app.library.len(), 1);
    }

    #[test]
    fn exit_and_invalid_options() {
        let (_dir, mut first) = app();
        press(&mut first, &[KeyCode::Char('9')]);
        assert_eq!(status(&first), ("Invalid option.", &StatusKind::Error));
        assert!(first.handle_key(KeyCode::Char('7')).unwrap());

        let (_other_dir, mut second) = app();
        press(&mut second, &[KeyCode::Up]);
        assert!(second.handle_key(KeyCode::Enter).unwrap());
    }

    #[test]
    fn reported_failures_land_in_the_footer() {
        let (_dir, mut app) = app();
        press(&mut app, &[KeyCode::Char('3')]);
        let err = anyhow::anyhow!("disk full").context("failed to save books");
        app.report_failure(&err);
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(
            status(&app),
            ("An error occurred: disk full", &StatusKind::Error)
        );
    }
}

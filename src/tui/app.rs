use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::TreeError;
use crate::tree::session::Session;

/// State of the interactive tree view. Knows nothing about the terminal.
pub struct App {
    session: Session,
    title: String,
    cursor: usize,
    focused: bool,
    should_quit: bool,
}

impl App {
    pub fn new(session: Session, title: impl Into<String>) -> Self {
        Self {
            session,
            title: title.into(),
            cursor: 0,
            focused: true,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Row under the cursor, `None` if there are no rows.
    pub fn selected(&self) -> Option<usize> {
        (!self.session.is_empty()).then_some(self.cursor)
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Result<(), TreeError> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Esc => self.focused = !self.focused,
            _ if !self.focused => {}
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(self.last_row())
            }
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.cursor = self.last_row(),
            KeyCode::Enter | KeyCode::Char(' ') => self.select()?,
            _ => {}
        }
        Ok(())
    }

    fn select(&mut self) -> Result<(), TreeError> {
        let Some(row) = self.selected() else {
            return Ok(());
        };
        self.session.on_select(row)?;
        self.cursor = self.cursor.min(self.last_row());
        Ok(())
    }

    fn last_row(&self) -> usize {
        self.session.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::record::TransactionRecord;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let records = vec![
            TransactionRecord::new(
                NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
                "Landlord",
                "Rent",
                dec!(-800.00),
            ),
            TransactionRecord::new(
                NaiveDate::from_ymd_opt(2023, 3, 15).unwrap(),
                "Landlord",
                "Rent",
                dec!(-800.00),
            ),
            TransactionRecord::new(
                NaiveDate::from_ymd_opt(2023, 4, 2).unwrap(),
                "Grocer",
                "Food",
                dec!(-45.50),
            ),
        ];
        App::new(Session::from_records(&records), "test")
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            app.on_key(key(*code)).unwrap();
        }
    }

    #[test]
    fn starts_focused_on_first_row() {
        let app = app();
        assert_eq!(Some(0), app.selected());
        assert!(app.is_focused());
        assert!(!app.should_quit());
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut app = app();
        press(&mut app, &[KeyCode::Up]);
        assert_eq!(Some(0), app.selected());
        press(&mut app, &[KeyCode::Down; 10]);
        assert_eq!(Some(4), app.selected());
        press(&mut app, &[KeyCode::Char('g')]);
        assert_eq!(Some(0), app.selected());
        press(&mut app, &[KeyCode::End]);
        assert_eq!(Some(4), app.selected());
        press(&mut app, &[KeyCode::Char('k')]);
        assert_eq!(Some(3), app.selected());
    }

    #[test]
    fn enter_expands_selected_row() {
        let mut app = app();
        press(&mut app, &[KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        assert_eq!(7, app.session().len());
        assert_eq!(Some(2), app.selected());
        press(&mut app, &[KeyCode::Char(' ')]);
        assert_eq!(5, app.session().len());
    }

    #[test]
    fn collapsing_year_keeps_cursor_on_it() {
        let mut app = app();
        press(&mut app, &[KeyCode::Down, KeyCode::Down, KeyCode::Enter, KeyCode::End]);
        assert_eq!(Some(6), app.selected());
        press(&mut app, &[KeyCode::Home, KeyCode::Enter]);
        assert_eq!(1, app.session().len());
        assert_eq!(Some(0), app.selected());
        press(&mut app, &[KeyCode::End]);
        assert_eq!(Some(0), app.selected());
    }

    #[test]
    fn unfocused_view_ignores_navigation() {
        let mut app = app();
        press(&mut app, &[KeyCode::Esc, KeyCode::Down, KeyCode::Enter]);
        assert!(!app.is_focused());
        assert_eq!(Some(0), app.selected());
        assert_eq!(5, app.session().len());

        press(&mut app, &[KeyCode::Esc, KeyCode::Down]);
        assert!(app.is_focused());
        assert_eq!(Some(1), app.selected());
    }

    #[rstest]
    #[case(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE))]
    #[case(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))]
    fn quit_keys(#[case] event: KeyEvent) {
        let mut app = app();
        app.on_key(event).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn quit_works_while_unfocused() {
        let mut app = app();
        press(&mut app, &[KeyCode::Esc, KeyCode::Char('q')]);
        assert!(app.should_quit());
    }

    #[test]
    fn empty_view_has_no_selection() {
        let mut app = App::new(Session::from_records(&Vec::<TransactionRecord>::new()), "empty");
        press(&mut app, &[KeyCode::Down, KeyCode::End, KeyCode::Enter]);
        assert_eq!(None, app.selected());
    }
}

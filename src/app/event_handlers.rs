use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use super::App;

impl App {
    /// Returns true when the app should quit.
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Left | KeyCode::Char('p') => {
                self.change_week(-1);
                false
            }
            KeyCode::Right | KeyCode::Char('n') => {
                self.change_week(1);
                false
            }
            KeyCode::Char('r') => {
                self.request_load(true);
                false
            }
            KeyCode::Char('a') => {
                self.open_form();
                false
            }
            _ => false,
        }
    }
}

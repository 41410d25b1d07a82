use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::Intent;
use crate::tui::constants::{STATUS_HELP, STATUS_REFRESHED};

use super::{App, Focus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListAction {
    Quit,
    FocusInput,
    Edit,
    Toggle,
    Delete,
    Copy,
    Refresh,
    ShowHelp,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
}

impl ListAction {
    fn from_event(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Tab => Some(Self::FocusInput),
            KeyCode::Char('e') => Some(Self::Edit),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Self::Toggle),
            KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => Some(Self::Delete),
            KeyCode::Char('c') | KeyCode::Char('y') => Some(Self::Copy),
            KeyCode::Char('r') => Some(Self::Refresh),
            KeyCode::Char('?') => Some(Self::ShowHelp),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            KeyCode::Char('g') | KeyCode::Home => Some(Self::SelectFirst),
            KeyCode::Char('G') | KeyCode::End => Some(Self::SelectLast),
            _ => None,
        }
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL)
}

impl App {
    /// Apply one key press. Returns the intent the controller should handle, if any.
    pub(crate) fn on_key(&mut self, key: KeyEvent) -> Option<Intent> {
        if is_ctrl_c(&key) {
            return Some(Intent::Quit);
        }
        if self.confirm.is_some() {
            return self.handle_confirm_key(key);
        }
        if self.show_help {
            self.handle_help_key(key);
            return None;
        }
        match self.focus {
            Focus::List => self.handle_list_key(key),
            Focus::Input => self.handle_input_key(key),
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Intent> {
        let action = ListAction::from_event(&key)?;
        match action {
            ListAction::Quit => return Some(Intent::Quit),
            ListAction::Toggle => return Some(Intent::ToggleTask),
            ListAction::Delete => return Some(Intent::DeleteTask),
            ListAction::Copy => return Some(Intent::CopyTask),
            ListAction::Refresh => {
                self.set_status_info(STATUS_REFRESHED);
                return Some(Intent::Refresh);
            }
            ListAction::FocusInput => self.begin_add(),
            ListAction::Edit => self.begin_edit(),
            ListAction::ShowHelp => {
                self.show_help = true;
                self.set_status_info(STATUS_HELP);
            }
            ListAction::SelectNext => self.select_next(),
            ListAction::SelectPrev => self.select_prev(),
            ListAction::SelectFirst => self.select_first(),
            ListAction::SelectLast => self.select_last(),
        }
        None
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<Intent> {
        match key.code {
            KeyCode::Enter => {
                return Some(if self.editing.is_some() {
                    Intent::EditTask
                } else {
                    Intent::AddTask
                });
            }
            KeyCode::Esc | KeyCode::Tab => self.cancel_edit(),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete_char(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Char(c) => self.input.insert_char(c),
            _ => {}
        }
        None
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?')) {
            self.show_help = false;
            self.status = None;
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Option<Intent> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.resolve_prompt(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.resolve_prompt(false),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char(' ') => {
                if let Some(prompt) = self.confirm.as_mut() {
                    prompt.choice = prompt.choice.toggle();
                }
                None
            }
            KeyCode::Enter => {
                let accepted = self
                    .confirm
                    .as_ref()
                    .is_some_and(|prompt| prompt.choice == super::ConfirmChoice::Yes);
                self.resolve_prompt(accepted)
            }
            _ => None,
        }
    }
}

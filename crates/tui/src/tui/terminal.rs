use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::Terminal;
use tracing::trace;

use super::app::{App, Focus};
use super::constants::TICK_RATE;
use super::events::EventSource;
use crate::core::{Intent, PendingConfirmation, Ui};
use crate::model::{Task, TaskId};

/// Ratatui implementation of [`Ui`]: draws the [`App`] and turns key presses
/// into intents, one tick at a time.
pub struct TerminalUi<B: Backend, E: EventSource> {
    terminal: Terminal<B>,
    events: E,
    app: App,
    last_tick: Instant,
}

impl<B: Backend, E: EventSource> TerminalUi<B, E> {
    pub fn new(terminal: Terminal<B>, events: E, store_label: String) -> Self {
        Self {
            terminal,
            events,
            app: App::new(store_label),
            last_tick: Instant::now(),
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Hand the terminal back so the caller can restore it.
    pub fn into_terminal(self) -> Terminal<B> {
        self.terminal
    }

    #[cfg(test)]
    pub(crate) fn app(&self) -> &App {
        &self.app
    }
}

impl<B: Backend, E: EventSource> Ui for TerminalUi<B, E> {
    fn next_intent(&mut self) -> Result<Option<Intent>> {
        loop {
            if self.app.should_quit() {
                return Ok(None);
            }
            self.terminal.draw(|f| self.app.draw(f))?;

            let timeout = TICK_RATE
                .checked_sub(self.last_tick.elapsed())
                .unwrap_or(Duration::ZERO);
            if let Some(Event::Key(key)) = self.events.next_event(timeout)? {
                if key.kind == KeyEventKind::Press {
                    if let Some(intent) = self.app.on_key(key) {
                        trace!(?intent, "key produced intent");
                        return Ok(Some(intent));
                    }
                }
            }

            if self.last_tick.elapsed() >= TICK_RATE {
                self.app.on_tick();
                self.last_tick = Instant::now();
            }
        }
    }

    fn stop(&mut self) {
        self.app.quit();
    }

    fn refresh_list(&mut self, tasks: Vec<Task>) {
        self.app.set_tasks(tasks);
    }

    fn input_text(&self) -> String {
        self.app.input_text().to_string()
    }

    fn clear_input(&mut self) {
        self.app.clear_input();
    }

    fn selected_task_id(&self) -> Option<TaskId> {
        self.app.selected_task_id()
    }

    fn selected_task_text(&self) -> Option<String> {
        self.app.selected_task_text()
    }

    fn item_count(&self) -> usize {
        self.app.tasks().len()
    }

    fn focus_list(&mut self) {
        self.app.set_focus(Focus::List);
    }

    fn focus_input(&mut self) {
        self.app.set_focus(Focus::Input);
    }

    fn show_error(&mut self, message: &str) {
        self.app.set_status_error(message);
    }

    fn show_info(&mut self, message: &str) {
        self.app.set_status_info(message);
    }

    fn show_confirmation(&mut self, pending: PendingConfirmation) {
        self.app.prompt(pending);
    }
}

use std::time::Instant;

use ratatui::style::{Color, Style};
use ratatui::widgets::ListState;

use super::buffer::TextBuffer;
use super::constants::*;
use crate::core::{Intent, PendingConfirmation};
use crate::model::{Task, TaskId};

mod input;
mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    List,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmChoice {
    Yes,
    No,
}

impl ConfirmChoice {
    fn toggle(self) -> Self {
        match self {
            ConfirmChoice::Yes => ConfirmChoice::No,
            ConfirmChoice::No => ConfirmChoice::Yes,
        }
    }
}

#[derive(Debug)]
struct ConfirmPrompt {
    pending: PendingConfirmation,
    choice: ConfirmChoice,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

/// Screen state for the task list. Holds no store handle: every change the
/// user asks for leaves here as an [`Intent`].
pub(crate) struct App {
    store_label: String,
    tasks: Vec<Task>,
    list_state: ListState,
    focus: Focus,
    input: TextBuffer,
    editing: Option<TaskId>,
    status: Option<StatusMessage>,
    confirm: Option<ConfirmPrompt>,
    show_help: bool,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(store_label: String) -> Self {
        Self {
            store_label,
            tasks: Vec::new(),
            list_state: ListState::default(),
            focus: Focus::List,
            input: TextBuffer::new(),
            editing: None,
            status: None,
            confirm: None,
            show_help: false,
            should_quit: false,
        }
    }

    pub(crate) fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created_at.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Replace the task list, keeping the selection on the same task when it
    /// survives the reload.
    pub(crate) fn set_tasks(&mut self, tasks: Vec<Task>) {
        let previous_id = self.selected_task().map(|task| task.id);
        let previous_index = self.list_state.selected();
        self.tasks = tasks;

        if self.tasks.is_empty() {
            self.list_state.select(None);
            return;
        }
        let index = previous_id
            .and_then(|id| self.tasks.iter().position(|task| task.id == id))
            .or_else(|| previous_index.map(|idx| idx.min(self.tasks.len() - 1)))
            .unwrap_or(0);
        self.list_state.select(Some(index));
    }

    pub(crate) fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub(crate) fn selected_task(&self) -> Option<&Task> {
        self.list_state
            .selected()
            .and_then(|index| self.tasks.get(index))
    }

    /// The task under edit wins over the list cursor.
    pub(crate) fn selected_task_id(&self) -> Option<TaskId> {
        self.editing
            .or_else(|| self.selected_task().map(|task| task.id))
    }

    pub(crate) fn selected_task_text(&self) -> Option<String> {
        let id = self.selected_task_id()?;
        self.tasks
            .iter()
            .find(|task| task.id == id)
            .map(|task| task.description.clone())
    }

    pub(crate) fn input_text(&self) -> &str {
        self.input.as_str()
    }

    pub(crate) fn clear_input(&mut self) {
        self.input.clear();
        self.editing = None;
    }

    pub(crate) fn focus(&self) -> Focus {
        self.focus
    }

    pub(crate) fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub(crate) fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    pub(crate) fn prompt(&mut self, pending: PendingConfirmation) {
        self.confirm = Some(ConfirmPrompt {
            pending,
            choice: ConfirmChoice::No,
        });
        self.set_status_info(STATUS_CONFIRM_DELETE);
    }

    pub(crate) fn has_prompt(&self) -> bool {
        self.confirm.is_some()
    }

    fn select_next(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let next = self
            .list_state
            .selected()
            .map_or(0, |idx| (idx + 1).min(self.tasks.len() - 1));
        self.list_state.select(Some(next));
    }

    fn select_prev(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let prev = self
            .list_state
            .selected()
            .map_or(0, |idx| idx.saturating_sub(1));
        self.list_state.select(Some(prev));
    }

    fn select_first(&mut self) {
        if !self.tasks.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        if !self.tasks.is_empty() {
            self.list_state.select(Some(self.tasks.len() - 1));
        }
    }

    fn begin_add(&mut self) {
        if self.editing.take().is_some() {
            self.input.clear();
        }
        self.focus = Focus::Input;
        self.set_status_info(STATUS_ENTER_ADD);
    }

    fn begin_edit(&mut self) {
        let Some(task) = self.selected_task() else {
            self.set_status_info(STATUS_NOTHING_SELECTED);
            return;
        };
        let (id, description) = (task.id, task.description.clone());
        self.input.set(description);
        self.editing = Some(id);
        self.focus = Focus::Input;
        self.set_status_info(STATUS_ENTER_EDIT);
    }

    fn cancel_edit(&mut self) {
        if self.editing.take().is_some() {
            self.input.clear();
            self.set_status_info(STATUS_EDIT_CANCELLED);
        } else {
            self.status = None;
        }
        self.focus = Focus::List;
    }

    /// Settle the open prompt. Only acceptance yields an intent.
    fn resolve_prompt(&mut self, accepted: bool) -> Option<Intent> {
        let prompt = self.confirm.take()?;
        match prompt.pending.resolve(accepted) {
            Some(confirmed) => {
                self.status = None;
                Some(Intent::Confirmed(confirmed))
            }
            None => {
                self.set_status_info(STATUS_DELETE_CANCELLED);
                None
            }
        }
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("ℹ️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("⚠️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Error));
    }
}

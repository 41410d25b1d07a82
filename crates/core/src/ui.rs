//! The surface the controller drives. The terminal UI is the production
//! implementation; tests use a recording double.

use crate::model::{Task, TaskId};

/// A user request raised by the UI and routed through the controller.
#[derive(Debug)]
pub enum Intent {
    AddTask,
    ToggleTask,
    DeleteTask,
    EditTask,
    CopyTask,
    Refresh,
    Quit,
    /// A confirmation the user accepted.
    Confirmed(Confirmed),
}

/// Action guarded by a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTask(TaskId),
}

/// A prompt awaiting the user's answer.
///
/// Created only by the controller. Resolving consumes it, so the guarded action
/// can run at most once, and only an acceptance yields a [`Confirmed`] token.
#[derive(Debug)]
pub struct PendingConfirmation {
    message: String,
    action: ConfirmAction,
}

impl PendingConfirmation {
    pub(crate) fn new(message: String, action: ConfirmAction) -> Self {
        Self { message, action }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action(&self) -> ConfirmAction {
        self.action
    }

    pub fn resolve(self, accepted: bool) -> Option<Confirmed> {
        accepted.then_some(Confirmed {
            action: self.action,
        })
    }
}

/// Proof that the user accepted a [`PendingConfirmation`].
#[derive(Debug)]
pub struct Confirmed {
    action: ConfirmAction,
}

impl Confirmed {
    pub fn action(&self) -> ConfirmAction {
        self.action
    }
}

pub trait Ui {
    /// Run one turn of the render/input loop and return the next user intent.
    ///
    /// Returns `Ok(None)` once the UI has been stopped and `Err` if the loop
    /// exits abnormally.
    fn next_intent(&mut self) -> anyhow::Result<Option<Intent>>;

    fn stop(&mut self);

    /// Replace the displayed task set.
    fn refresh_list(&mut self, tasks: Vec<Task>);

    fn input_text(&self) -> String;

    fn clear_input(&mut self);

    fn selected_task_id(&self) -> Option<TaskId>;

    fn selected_task_text(&self) -> Option<String>;

    fn item_count(&self) -> usize;

    fn focus_list(&mut self);

    fn focus_input(&mut self);

    fn show_error(&mut self, message: &str);

    fn show_info(&mut self, message: &str);

    /// Present the prompt. The UI must hand back `pending.resolve(true)` as an
    /// [`Intent::Confirmed`] if the user accepts, and drop it otherwise.
    fn show_confirmation(&mut self, pending: PendingConfirmation);
}

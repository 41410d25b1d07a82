//! Sequences user intents into store calls and UI updates.
//!
//! Every handler runs to completion: store errors are logged and shown through
//! [`Ui::show_error`], never returned. Successful mutations reload the full
//! list from the store before re-rendering.

use tracing::{debug, error, info, warn};

use crate::clipboard::Clipboard;
use crate::error::{ControllerError, ValidationError};
use crate::model::TaskId;
use crate::store::Store;
use crate::ui::{ConfirmAction, Confirmed, Intent, PendingConfirmation, Ui};


pub struct AppController<S: Store, U: Ui> {
    store: S,
    ui: Option<U>,
    clipboard: Option<Box<dyn Clipboard>>,
}

impl<S: Store, U: Ui> AppController<S, U> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            ui: None,
            clipboard: None,
        }
    }

    /// Enable copying task text. Without a clipboard, copy requests report an error.
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn set_ui(&mut self, ui: U) {
        self.ui = Some(ui);
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn ui(&self) -> Option<&U> {
        self.ui.as_ref()
    }

    /// Tear the controller apart so the caller can close the store and restore the UI.
    pub fn into_parts(self) -> (S, Option<U>) {
        (self.store, self.ui)
    }

    /// Load the task list, then drive the UI loop until it stops.
    pub fn start(&mut self) -> Result<(), ControllerError> {
        let Some(ui) = self.ui.as_mut() else {
            return Err(ControllerError::UiNotAttached);
        };
        info!("loading and displaying tasks");
        load_and_display_tasks(&self.store, ui);

        info!("starting UI");
        while let Some(intent) = self.next_intent()? {
            self.dispatch(intent);
        }
        info!("UI stopped");
        Ok(())
    }

    fn next_intent(&mut self) -> Result<Option<Intent>, ControllerError> {
        let ui = self.ui.as_mut().ok_or(ControllerError::UiNotAttached)?;
        Ok(ui.next_intent()?)
    }

    pub fn dispatch(&mut self, intent: Intent) {
        debug!(?intent, "dispatching intent");
        match intent {
            Intent::AddTask => self.handle_add_task(),
            Intent::ToggleTask => self.handle_toggle_task(),
            Intent::DeleteTask => self.handle_delete_task(),
            Intent::EditTask => self.handle_edit_task(),
            Intent::CopyTask => self.handle_copy_task(),
            Intent::Refresh => self.handle_refresh(),
            Intent::Quit => self.handle_quit(),
            Intent::Confirmed(confirmed) => self.handle_confirmed(confirmed),
        }
    }

    pub fn handle_add_task(&mut self) {
        let Some(ui) = self.ui.as_mut() else {
            warn!("add requested without a UI");
            return;
        };

        let description = ui.input_text();
        if let Err(err) = validate_description(&description) {
            ui.show_error(&err.to_string());
            return;
        }

        match self.store.add_task(&description) {
            Ok(id) => info!(task_id = id, "added task"),
            Err(err) => {
                error!(error = %err, "error adding task");
                ui.show_error(&format!("Failed to add task: {err}"));
                return;
            }
        }

        ui.clear_input();
        load_and_display_tasks(&self.store, ui);
        ui.focus_list();
    }

    pub fn handle_toggle_task(&mut self) {
        let Some(ui) = self.ui.as_mut() else {
            warn!("toggle requested without a UI");
            return;
        };
        let Some(id) = ui.selected_task_id() else {
            debug!("toggle attempted on invalid or no selection");
            return;
        };

        if let Err(err) = self.store.toggle_task_status(id) {
            error!(task_id = id, error = %err, "error toggling task");
            ui.show_error(&format!("Failed to toggle task ID {id}: {err}"));
            return;
        }
        load_and_display_tasks(&self.store, ui);
    }

    /// Ask for confirmation; the delete itself runs from [`Self::handle_confirmed`].
    pub fn handle_delete_task(&mut self) {
        let Some(ui) = self.ui.as_mut() else {
            warn!("delete requested without a UI");
            return;
        };
        let Some(id) = ui.selected_task_id() else {
            debug!("delete attempted on invalid or no selection");
            return;
        };

        let pending = PendingConfirmation::new(
            format!("Are you sure you want to delete task ID {id}?"),
            ConfirmAction::DeleteTask(id),
        );
        ui.show_confirmation(pending);
    }

    pub fn handle_edit_task(&mut self) {
        let Some(ui) = self.ui.as_mut() else {
            warn!("edit requested without a UI");
            return;
        };
        let Some(id) = ui.selected_task_id() else {
            debug!("edit attempted on invalid or no selection");
            return;
        };

        let description = ui.input_text();
        if let Err(err) = validate_description(&description) {
            ui.show_error(&err.to_string());
            return;
        }

        if let Err(err) = self.store.update_task_description(id, &description) {
            error!(task_id = id, error = %err, "error editing task");
            ui.show_error(&format!("Failed to edit task ID {id}: {err}"));
            return;
        }

        ui.clear_input();
        load_and_display_tasks(&self.store, ui);
        ui.focus_list();
    }

    pub fn handle_copy_task(&mut self) {
        let Some(ui) = self.ui.as_mut() else {
            warn!("copy requested without a UI");
            return;
        };
        let Some(id) = ui.selected_task_id() else {
            debug!("copy attempted on invalid or no selection");
            return;
        };
        let Some(clipboard) = self.clipboard.as_mut() else {
            ui.show_error("Clipboard not available");
            return;
        };
        let Some(text) = ui.selected_task_text() else {
            debug!(task_id = id, "selected task has no text to copy");
            return;
        };

        match clipboard.copy(&text) {
            Ok(()) => ui.show_info(&format!("Copied task ID {id} to clipboard")),
            Err(err) => {
                error!(task_id = id, error = %err, "error copying task");
                ui.show_error(&format!("Failed to copy task ID {id}: {err}"));
            }
        }
    }

    /// Reload from the store without mutating anything.
    pub fn handle_refresh(&mut self) {
        if let Some(ui) = self.ui.as_mut() {
            load_and_display_tasks(&self.store, ui);
        }
    }

    pub fn handle_quit(&mut self) {
        if let Some(ui) = self.ui.as_mut() {
            ui.stop();
        }
    }

    pub fn handle_confirmed(&mut self, confirmed: Confirmed) {
        match confirmed.action() {
            ConfirmAction::DeleteTask(id) => self.delete_confirmed(id),
        }
    }

    /// Resolve a prompt the caller is holding; runs the action only when `accepted`.
    pub fn resolve_confirmation(&mut self, pending: PendingConfirmation, accepted: bool) {
        if let Some(confirmed) = pending.resolve(accepted) {
            self.handle_confirmed(confirmed);
        } else {
            debug!("confirmation declined");
        }
    }

    fn delete_confirmed(&mut self, id: TaskId) {
        let Some(ui) = self.ui.as_mut() else {
            warn!(task_id = id, "delete confirmed without a UI");
            return;
        };

        if let Err(err) = self.store.delete_task(id) {
            error!(task_id = id, error = %err, "error deleting task");
            ui.show_error(&format!("Failed to delete task ID {id}: {err}"));
            return;
        }
        info!(task_id = id, "deleted task");

        load_and_display_tasks(&self.store, ui);
        if ui.item_count() == 0 {
            ui.focus_input();
        }
    }
}

/// Descriptions are taken verbatim: whitespace-only text is accepted.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(())
}

fn load_and_display_tasks<S: Store, U: Ui>(store: &S, ui: &mut U) {
    match store.get_tasks() {
        Ok(tasks) => {
            debug!(count = tasks.len(), "refreshing task list");
            ui.refresh_list(tasks);
        }
        Err(err) => {
            error!(error = %err, "error loading tasks");
            ui.show_error(&format!("Failed to load tasks: {err}"));
        }
    }
}

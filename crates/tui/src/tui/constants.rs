use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);
pub(crate) const STATUS_TTL: Duration = Duration::from_secs(5);

pub(crate) const STATUS_ENTER_ADD: &str = "Type a task description • Enter to add • Esc to go back";
pub(crate) const STATUS_ENTER_EDIT: &str = "Edit the description • Enter to save • Esc to cancel";
pub(crate) const STATUS_EDIT_CANCELLED: &str = "Edit cancelled";
pub(crate) const STATUS_NOTHING_SELECTED: &str = "No task selected";
pub(crate) const STATUS_REFRESHED: &str = "Refreshed tasks";
pub(crate) const STATUS_DELETE_CANCELLED: &str = "Deletion cancelled";
pub(crate) const STATUS_HELP: &str = "Keyboard reference • Enter/Esc to close";
pub(crate) const STATUS_CONFIRM_DELETE: &str =
    "Confirm deletion • y/n or arrows to choose • Enter confirms • Esc cancels";

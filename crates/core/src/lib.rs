pub mod clipboard;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod store;
pub mod ui;

pub use clipboard::Clipboard;
pub use config::{AppConfig, StoreBackend};
pub use controller::AppController;
pub use error::{ControllerError, StoreError, ValidationError};
pub use model::*;
pub use store::{open_store, JsonStore, SqliteStore, Store};
pub use ui::{ConfirmAction, Confirmed, Intent, PendingConfirmation, Ui};

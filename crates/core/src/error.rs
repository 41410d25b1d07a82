use thiserror::Error;

use crate::model::TaskId;

/// Failures raised by a [`crate::store::Store`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task with ID {0} not found")]
    NotFound(TaskId),
    #[error("store is closed")]
    Closed,
    #[error("no task IDs left to assign")]
    IdsExhausted,
    #[error("{context}: {source}")]
    Sqlite {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Attach operation context to lower-level storage errors.
pub(crate) trait StoreContext<T> {
    fn store_context(self, context: &'static str) -> Result<T, StoreError>;
}

impl<T> StoreContext<T> for Result<T, rusqlite::Error> {
    fn store_context(self, context: &'static str) -> Result<T, StoreError> {
        self.map_err(|source| StoreError::Sqlite { context, source })
    }
}

impl<T> StoreContext<T> for Result<T, std::io::Error> {
    fn store_context(self, context: &'static str) -> Result<T, StoreError> {
        self.map_err(|source| StoreError::Io { context, source })
    }
}

impl<T> StoreContext<T> for Result<T, serde_json::Error> {
    fn store_context(self, context: &'static str) -> Result<T, StoreError> {
        self.map_err(|source| StoreError::Json { context, source })
    }
}

/// Input rejected by the controller before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task description cannot be empty")]
    EmptyDescription,
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("UI not initialised for controller")]
    UiNotAttached,
    #[error(transparent)]
    Ui(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_errors_keep_operation_context() {
        let result: Result<(), rusqlite::Error> = Err(rusqlite::Error::QueryReturnedNoRows);
        let err = result.store_context("inserting task").unwrap_err();
        assert!(err.to_string().starts_with("inserting task: "));
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_names_the_id() {
        let err = StoreError::NotFound(42);
        assert_eq!(err.to_string(), "task with ID 42 not found");
        assert!(err.is_not_found());
    }
}

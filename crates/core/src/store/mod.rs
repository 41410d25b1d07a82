use tracing::info;

use crate::config::{AppConfig, StoreBackend};
use crate::error::StoreError;
use crate::model::{DeleteResult, Task, TaskId};

mod json;
mod sqlite;

pub use json::JsonStore;
pub use sqlite::SqliteStore;

/// Persistence boundary used by the controller and the CLI commands.
///
/// Every operation is synchronous and fails independently. Ordering of
/// [`Store::get_tasks`] is defined by the implementation; callers relay it as-is.
pub trait Store {
    fn get_tasks(&self) -> Result<Vec<Task>, StoreError>;

    fn add_task(&mut self, description: &str) -> Result<TaskId, StoreError>;

    /// Flip `done` for the task, or fail with [`StoreError::NotFound`].
    fn toggle_task_status(&mut self, id: TaskId) -> Result<(), StoreError>;

    fn update_task_description(&mut self, id: TaskId, description: &str)
        -> Result<(), StoreError>;

    fn delete_task(&mut self, id: TaskId) -> Result<(), StoreError>;

    /// Release the underlying resources. Safe to call more than once.
    fn close(&mut self);

    /// Delete each id in turn, reporting missing ids instead of failing the batch.
    fn delete_tasks(&mut self, ids: &[TaskId]) -> Result<Vec<DeleteResult>, StoreError> {
        let mut results = Vec::with_capacity(ids.len());
        for &id in ids {
            match self.delete_task(id) {
                Ok(()) => results.push(DeleteResult { id, deleted: true }),
                Err(StoreError::NotFound(_)) => results.push(DeleteResult { id, deleted: false }),
                Err(err) => return Err(err),
            }
        }
        Ok(results)
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn get_tasks(&self) -> Result<Vec<Task>, StoreError> {
        (**self).get_tasks()
    }

    fn add_task(&mut self, description: &str) -> Result<TaskId, StoreError> {
        (**self).add_task(description)
    }

    fn toggle_task_status(&mut self, id: TaskId) -> Result<(), StoreError> {
        (**self).toggle_task_status(id)
    }

    fn update_task_description(
        &mut self,
        id: TaskId,
        description: &str,
    ) -> Result<(), StoreError> {
        (**self).update_task_description(id, description)
    }

    fn delete_task(&mut self, id: TaskId) -> Result<(), StoreError> {
        (**self).delete_task(id)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Open the store selected by the configuration.
pub fn open_store(config: &AppConfig) -> Result<Box<dyn Store>, StoreError> {
    let path = config.store_path();
    info!(backend = %config.backend(), path = %path.display(), "opening task store");
    let store: Box<dyn Store> = match config.backend() {
        StoreBackend::Sqlite => Box::new(SqliteStore::open(&path)?),
        StoreBackend::Json => Box::new(JsonStore::open(&path)?),
    };
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    fn temp_store(backend: StoreBackend) -> (Box<dyn Store>, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf(), backend);
        let store = open_store(&config).expect("open store");
        (store, dir)
    }

    #[rstest]
    #[case(StoreBackend::Sqlite)]
    #[case(StoreBackend::Json)]
    fn added_task_is_listed_open(#[case] backend: StoreBackend) {
        let (mut store, _dir) = temp_store(backend);
        let id = store.add_task("X").unwrap();

        let tasks = store.get_tasks().unwrap();
        let task = tasks.iter().find(|t| t.id == id).expect("task listed");
        assert_eq!(task.description, "X");
        assert!(!task.done);
    }

    #[rstest]
    #[case(StoreBackend::Sqlite)]
    #[case(StoreBackend::Json)]
    fn toggling_twice_restores_status(#[case] backend: StoreBackend) {
        let (mut store, _dir) = temp_store(backend);
        let id = store.add_task("Water plants").unwrap();

        store.toggle_task_status(id).unwrap();
        assert!(store.get_tasks().unwrap()[0].done);
        store.toggle_task_status(id).unwrap();
        assert!(!store.get_tasks().unwrap()[0].done);
    }

    #[rstest]
    #[case(StoreBackend::Sqlite)]
    #[case(StoreBackend::Json)]
    fn missing_ids_report_not_found(#[case] backend: StoreBackend) {
        let (mut store, _dir) = temp_store(backend);

        assert!(store.toggle_task_status(99).unwrap_err().is_not_found());
        assert!(store.delete_task(99).unwrap_err().is_not_found());
        assert!(store
            .update_task_description(99, "nope")
            .unwrap_err()
            .is_not_found());
    }

    #[rstest]
    #[case(StoreBackend::Sqlite)]
    #[case(StoreBackend::Json)]
    fn ids_are_not_reused_after_delete(#[case] backend: StoreBackend) {
        let (mut store, _dir) = temp_store(backend);
        let first = store.add_task("one").unwrap();
        let second = store.add_task("two").unwrap();
        store.delete_task(second).unwrap();

        let third = store.add_task("three").unwrap();
        assert!(third > second);
        assert!(second > first);
    }

    #[rstest]
    #[case(StoreBackend::Sqlite)]
    #[case(StoreBackend::Json)]
    fn listing_is_ordered_by_id(#[case] backend: StoreBackend) {
        let (mut store, _dir) = temp_store(backend);
        for text in ["a", "b", "c"] {
            store.add_task(text).unwrap();
        }
        let descriptions: Vec<String> = store
            .get_tasks()
            .unwrap()
            .into_iter()
            .map(|t| t.description)
            .collect();
        assert_eq!(descriptions, vec!["a", "b", "c"]);
    }

    #[rstest]
    #[case(StoreBackend::Sqlite)]
    #[case(StoreBackend::Json)]
    fn close_is_idempotent_and_blocks_further_use(#[case] backend: StoreBackend) {
        let (mut store, _dir) = temp_store(backend);
        store.close();
        store.close();
        assert!(matches!(store.get_tasks(), Err(StoreError::Closed)));
        assert!(matches!(store.add_task("late"), Err(StoreError::Closed)));
    }

    #[rstest]
    #[case(StoreBackend::Sqlite)]
    #[case(StoreBackend::Json)]
    fn delete_tasks_reports_missing(#[case] backend: StoreBackend) {
        let (mut store, _dir) = temp_store(backend);
        let id = store.add_task("Test").unwrap();

        let results = store.delete_tasks(&[id, 404]).unwrap();
        assert_eq!(
            results,
            vec![
                DeleteResult { id, deleted: true },
                DeleteResult {
                    id: 404,
                    deleted: false
                },
            ]
        );
        assert!(store.get_tasks().unwrap().is_empty());
    }

    #[rstest]
    #[case(StoreBackend::Sqlite)]
    #[case(StoreBackend::Json)]
    fn tasks_survive_reopen(#[case] backend: StoreBackend) {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::from_data_dir(dir.path().to_path_buf(), backend);
        {
            let mut store = open_store(&config).unwrap();
            let id = store.add_task("Persist me").unwrap();
            store.update_task_description(id, "Persisted").unwrap();
            store.close();
        }

        let store = open_store(&config).unwrap();
        let tasks = store.get_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "Persisted");
        assert!(tasks[0].created_at.is_some());
        assert!(tasks[0].updated_at.is_some());
    }
}

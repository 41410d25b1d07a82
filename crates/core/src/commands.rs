use anyhow::Result;

use crate::config::AppConfig;
use crate::error::StoreError;
use crate::model::{DeleteResult, Task, TaskId};
use crate::store::{open_store, Store};

/// Delete the tasks with the provided ids and return per-id results.
pub fn delete_tasks(config: &AppConfig, ids: &[TaskId]) -> Result<Vec<DeleteResult>> {
    let mut store = open_store(config)?;
    let results = store.delete_tasks(ids)?;
    store.close();
    Ok(results)
}

/// Mark a task completed. Already-completed tasks are left untouched.
///
/// Returns the task as it now stands, or `None` when no task has that id.
pub fn mark_done<S: Store + ?Sized>(store: &mut S, id: TaskId) -> Result<Option<Task>, StoreError> {
    let Some(mut task) = store.get_tasks()?.into_iter().find(|task| task.id == id) else {
        return Ok(None);
    };
    if !task.done {
        store.toggle_task_status(id)?;
        task.done = true;
    }
    Ok(Some(task))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreBackend;
    use crate::store::SqliteStore;
    use tempfile::TempDir;

    #[test]
    fn mark_done_is_idempotent() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let id = store.add_task("Walk dog").unwrap();

        assert!(mark_done(&mut store, id).unwrap().unwrap().done);
        assert!(mark_done(&mut store, id).unwrap().unwrap().done);
        assert!(store.get_tasks().unwrap()[0].done);
    }

    #[test]
    fn mark_done_reports_missing_task() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert!(mark_done(&mut store, 12).unwrap().is_none());
    }

    #[test]
    fn delete_tasks_opens_configured_store() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::from_data_dir(dir.path().to_path_buf(), StoreBackend::Json);
        let id = {
            let mut store = open_store(&config).unwrap();
            store.add_task("Temporary").unwrap()
        };

        let results = delete_tasks(&config, &[id, id + 1]).unwrap();
        assert!(results[0].deleted);
        assert!(!results[1].deleted);
    }
}

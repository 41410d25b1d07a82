use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use super::Store;
use crate::error::{StoreContext, StoreError};
use crate::model::{Task, TaskId};

/// Flat-file store: a JSON array rewritten wholesale on every mutation.
///
/// Ids follow a max+1 scheme, with a high-water mark so an id freed by a delete
/// is not handed out again while the store is open.
pub struct JsonStore {
    path: PathBuf,
    /// `None` once the largest id on file is `TaskId::MAX`.
    next_id: Option<TaskId>,
    closed: bool,
}

impl JsonStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let mut store = Self {
            path: path.to_path_buf(),
            next_id: Some(1),
            closed: false,
        };
        let tasks = store.load()?;
        store.observe_ids(&tasks);
        Ok(store)
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed {
            Err(StoreError::Closed)
        } else {
            Ok(())
        }
    }

    fn observe_ids(&mut self, tasks: &[Task]) {
        if let Some(max) = tasks.iter().map(|task| task.id).max() {
            self.next_id = match (self.next_id, max.checked_add(1)) {
                (Some(current), Some(after)) => Some(current.max(after)),
                _ => None,
            };
        }
    }

    fn load(&self) -> Result<Vec<Task>, StoreError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err).store_context("reading task file"),
        };
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&data).store_context("decoding task file")
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(tasks).store_context("encoding task file")?;
        fs::write(&self.path, data).store_context("writing task file")?;
        debug!(count = tasks.len(), path = %self.path.display(), "saved task file");
        Ok(())
    }

    /// Load, apply `change` to the task with `id`, and persist.
    fn modify<F>(&mut self, id: TaskId, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Task),
    {
        self.ensure_open()?;
        let mut tasks = self.load()?;
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))?;
        change(task);
        task.updated_at = Some(Utc::now());
        self.save(&tasks)
    }
}

impl Store for JsonStore {
    fn get_tasks(&self) -> Result<Vec<Task>, StoreError> {
        self.ensure_open()?;
        let mut tasks = self.load()?;
        tasks.sort_by_key(|task| task.id);
        Ok(tasks)
    }

    fn add_task(&mut self, description: &str) -> Result<TaskId, StoreError> {
        self.ensure_open()?;
        let mut tasks = self.load()?;
        self.observe_ids(&tasks);

        let id = self.next_id.ok_or(StoreError::IdsExhausted)?;
        let now = Utc::now();
        tasks.push(Task {
            id,
            description: description.to_string(),
            done: false,
            created_at: Some(now),
            updated_at: Some(now),
        });
        self.save(&tasks)?;
        self.next_id = id.checked_add(1);
        Ok(id)
    }

    fn toggle_task_status(&mut self, id: TaskId) -> Result<(), StoreError> {
        self.modify(id, |task| task.done = !task.done)
    }

    fn update_task_description(
        &mut self,
        id: TaskId,
        description: &str,
    ) -> Result<(), StoreError> {
        self.modify(id, |task| task.description = description.to_string())
    }

    fn delete_task(&mut self, id: TaskId) -> Result<(), StoreError> {
        self.ensure_open()?;
        let mut tasks = self.load()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(StoreError::NotFound(id));
        }
        self.save(&tasks)
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            debug!(path = %self.path.display(), "closed task file");
        }
    }
}

impl Drop for JsonStore {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_an_empty_list() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::open(&dir.path().join("todos.json")).unwrap();
        assert!(store.get_tasks().unwrap().is_empty());
    }

    #[test]
    fn reads_files_written_by_the_flag_cli() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.json");
        fs::write(
            &path,
            r#"[
  { "id": 1, "text": "Buy milk", "completed": false },
  { "id": 2, "text": "Walk dog", "completed": true }
]"#,
        )
        .unwrap();

        let mut store = JsonStore::open(&path).unwrap();
        let tasks = store.get_tasks().unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks[1].done);

        let id = store.add_task("Read book").unwrap();
        assert_eq!(id, 3);
    }

    #[test]
    fn rewrites_the_whole_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.json");
        let mut store = JsonStore::open(&path).unwrap();
        store.add_task("first").unwrap();
        let second = store.add_task("second").unwrap();
        store.toggle_task_status(second).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let items = raw.as_array().expect("array");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["text"], "second");
        assert_eq!(items[1]["completed"], true);
    }

    #[test]
    fn largest_possible_id_blocks_adds_but_not_reads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.json");
        fs::write(
            &path,
            format!(r#"[{{ "id": {}, "text": "last", "completed": false }}]"#, TaskId::MAX),
        )
        .unwrap();

        let mut store = JsonStore::open(&path).unwrap();
        assert_eq!(store.get_tasks().unwrap()[0].id, TaskId::MAX);

        let err = store.add_task("one more").unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted));
        assert_eq!(store.get_tasks().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_file_is_a_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todos.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonStore::open(&path).err().expect("decode error");
        assert!(err.to_string().starts_with("decoding task file"));
    }
}

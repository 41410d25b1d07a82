use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{named_params, Connection, OptionalExtension, Row};
use tracing::{debug, warn};

use super::Store;
use crate::error::{StoreContext, StoreError};
use crate::model::{Task, TaskId};

const NOW_SQL: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

/// SQLite-backed store with AUTOINCREMENT ids and trigger-maintained `updated_at`.
pub struct SqliteStore {
    conn: Option<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).store_context("failed to open database")?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database; used by tests and dry runs.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().store_context("failed to open database")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .store_context("failed to configure database")?;
        let store = Self { conn: Some(conn) };
        store.apply_migrations()?;
        Ok(store)
    }

    fn conn(&self) -> Result<&Connection, StoreError> {
        self.conn.as_ref().ok_or(StoreError::Closed)
    }

    fn apply_migrations(&self) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                done INTEGER DEFAULT 0 CHECK(done IN (0,1)),
                created_at TEXT,
                updated_at TEXT
             );",
        )
        .store_context("failed to create tasks table")?;

        // Databases from the first schema only carry id/description/done.
        let columns = self.column_names()?;
        for column in ["created_at", "updated_at"] {
            if !columns.iter().any(|existing| existing == column) {
                debug!(column, "adding missing tasks column");
                conn.execute_batch(&format!("ALTER TABLE tasks ADD COLUMN {column} TEXT;"))
                    .store_context("failed to migrate tasks table")?;
            }
        }

        conn.execute_batch(&format!(
            "CREATE TRIGGER IF NOT EXISTS tasks_touch_updated_at
             AFTER UPDATE OF description, done ON tasks
             FOR EACH ROW
             BEGIN
                UPDATE tasks SET updated_at = {NOW_SQL} WHERE id = NEW.id;
             END;"
        ))
        .store_context("failed to create tasks trigger")?;
        Ok(())
    }

    fn column_names(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("PRAGMA table_info(tasks)")
            .store_context("reading tasks schema")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .store_context("reading tasks schema")?
            .collect::<Result<Vec<_>, _>>()
            .store_context("reading tasks schema")?;
        Ok(names)
    }

    fn map_task(row: &Row<'_>) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get(0)?,
            description: row.get(1)?,
            done: row.get::<_, Option<i64>>(2)?.unwrap_or(0) == 1,
            created_at: parse_timestamp(row.get(3)?),
            updated_at: parse_timestamp(row.get(4)?),
        })
    }

    pub fn fetch_task(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        self.conn()?
            .query_row(
                "SELECT id, description, done, created_at, updated_at FROM tasks WHERE id = :id",
                named_params![":id": id],
                Self::map_task,
            )
            .optional()
            .store_context("querying task")
    }
}

impl Store for SqliteStore {
    fn get_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, description, done, created_at, updated_at FROM tasks ORDER BY id ASC",
            )
            .store_context("querying tasks")?;
        let tasks = stmt
            .query_map([], Self::map_task)
            .store_context("querying tasks")?
            .collect::<Result<Vec<_>, _>>()
            .store_context("scanning task row")?;
        Ok(tasks)
    }

    fn add_task(&mut self, description: &str) -> Result<TaskId, StoreError> {
        let conn = self.conn()?;
        conn.execute(
            &format!(
                "INSERT INTO tasks (description, done, created_at, updated_at) \
                 VALUES (:description, 0, {NOW_SQL}, {NOW_SQL})"
            ),
            named_params![":description": description],
        )
        .store_context("inserting task")?;
        let id = conn.last_insert_rowid();
        debug!(task_id = id, "inserted task");
        Ok(id)
    }

    fn toggle_task_status(&mut self, id: TaskId) -> Result<(), StoreError> {
        let affected = self
            .conn()?
            .execute(
                "UPDATE tasks SET done = 1 - COALESCE(done, 0) WHERE id = :id",
                named_params![":id": id],
            )
            .store_context("updating task status")?;
        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn update_task_description(
        &mut self,
        id: TaskId,
        description: &str,
    ) -> Result<(), StoreError> {
        let affected = self
            .conn()?
            .execute(
                "UPDATE tasks SET description = :description WHERE id = :id",
                named_params![":description": description, ":id": id],
            )
            .store_context("updating task description")?;
        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn delete_task(&mut self, id: TaskId) -> Result<(), StoreError> {
        let affected = self
            .conn()?
            .execute("DELETE FROM tasks WHERE id = :id", named_params![":id": id])
            .store_context("deleting task")?;
        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_, err)) = conn.close() {
                warn!(error = %err, "error closing database");
            } else {
                debug!("closed database");
            }
        }
    }
}

impl Drop for SqliteStore {
    fn drop(&mut self) {
        self.close();
    }
}

fn parse_timestamp(raw: Option<String>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

//! CRUD persistence over the `todos` table.
//!
//! The repository owns its `rusqlite::Connection` (injected at construction,
//! no process-wide handle) and returns typed rows, never raw ones. Every
//! mutating statement commits before the method returns; there is no
//! write-behind buffering. Not-found is a normal outcome (`Option` / `bool`),
//! not an error — only SQLite-level faults surface as `StorageError`.

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::db::StorageError;

/// A persisted todo row. Serializes with the wire-format `createdAt` field
/// name used across the API boundary.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// Partial-update field set. Each field is independently absent; a blank or
/// whitespace-only `title` is treated as "not supplied".
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Synchronous repository over the durable store.
pub struct TodoRepository {
    conn: Connection,
}

impl TodoRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// All todos, newest first. The id tiebreak keeps equal-`createdAt` rows
    /// in a stable order within one listing call.
    pub fn list_all(&self) -> Result<Vec<Todo>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, completed, createdAt FROM todos
             ORDER BY createdAt DESC, id DESC",
        )?;
        let rows = stmt.query_map([], row_to_todo)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<Todo>, StorageError> {
        let todo = self
            .conn
            .query_row(
                "SELECT id, title, completed, createdAt FROM todos WHERE id = ?1",
                params![id],
                row_to_todo,
            )
            .optional()?;
        Ok(todo)
    }

    /// Insert a new row with `completed` forced to false. The caller supplies
    /// `id` and `created_at`; a duplicate id violates the primary key and
    /// surfaces as `StorageError`.
    pub fn create(&self, id: &str, title: &str, created_at: i64) -> Result<Todo, StorageError> {
        self.conn.execute(
            "INSERT INTO todos (id, title, completed, createdAt) VALUES (?1, ?2, 0, ?3)",
            params![id, title, created_at],
        )?;
        Ok(Todo {
            id: id.to_string(),
            title: title.to_string(),
            completed: false,
            created_at,
        })
    }

    /// Apply the supplied fields and return the post-update row, or `None`
    /// if `id` does not exist. Supplying neither field is a no-op read-back.
    pub fn update(&self, id: &str, fields: &UpdateTodo) -> Result<Option<Todo>, StorageError> {
        let mut sets: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(title) = fields.title.as_deref() {
            let title = title.trim();
            if !title.is_empty() {
                sets.push("title = ?");
                values.push(Value::Text(title.to_string()));
            }
        }
        if let Some(completed) = fields.completed {
            sets.push("completed = ?");
            values.push(Value::Integer(i64::from(completed)));
        }

        if !sets.is_empty() {
            values.push(Value::Text(id.to_string()));
            let sql = format!("UPDATE todos SET {} WHERE id = ?", sets.join(", "));
            self.conn.execute(&sql, params_from_iter(values))?;
        }

        self.get_by_id(id)
    }

    /// Remove the row; true iff something was deleted. Deleting twice is
    /// safe — the second call returns false.
    pub fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let changes = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        Ok(changes > 0)
    }
}

fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        completed: row.get::<_, i64>(2)? != 0,
        created_at: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn repo() -> TodoRepository {
        TodoRepository::new(db::open_in_memory().expect("open in-memory db"))
    }

    #[test]
    fn create_then_get_roundtrips() {
        let repo = repo();
        let created = repo.create("100", "Buy milk", 100).unwrap();
        assert_eq!(created.title, "Buy milk");
        assert!(!created.completed);
        assert_eq!(created.created_at, 100);

        let fetched = repo.get_by_id("100").unwrap().expect("row exists");
        assert_eq!(fetched, created);
    }

    #[test]
    fn get_missing_id_is_none() {
        assert!(repo().get_by_id("nope").unwrap().is_none());
    }

    #[test]
    fn create_duplicate_id_is_a_storage_error() {
        let repo = repo();
        repo.create("1", "First", 1).unwrap();
        let err = repo.create("1", "Second", 2).unwrap_err();
        assert!(matches!(err, StorageError::Sqlite(_)));
    }

    #[test]
    fn list_orders_by_created_at_descending() {
        let repo = repo();
        repo.create("1", "Oldest", 1).unwrap();
        repo.create("3", "Newest", 3).unwrap();
        repo.create("2", "Middle", 2).unwrap();

        let todos = repo.list_all().unwrap();
        let ids: Vec<&str> = todos.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }

    #[test]
    fn list_breaks_created_at_ties_stably() {
        let repo = repo();
        repo.create("a", "One", 5).unwrap();
        repo.create("b", "Two", 5).unwrap();

        let first = repo.list_all().unwrap();
        let second = repo.list_all().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn update_completed_leaves_title_unchanged() {
        let repo = repo();
        repo.create("1", "Keep me", 1).unwrap();

        let updated = repo
            .update(
                "1",
                &UpdateTodo {
                    title: None,
                    completed: Some(true),
                },
            )
            .unwrap()
            .expect("row exists");
        assert_eq!(updated.title, "Keep me");
        assert!(updated.completed);
    }

    #[test]
    fn update_blank_title_is_ignored() {
        let repo = repo();
        repo.create("1", "Original", 1).unwrap();

        let updated = repo
            .update(
                "1",
                &UpdateTodo {
                    title: Some("   ".to_string()),
                    completed: Some(true),
                },
            )
            .unwrap()
            .expect("row exists");
        assert_eq!(updated.title, "Original");
        assert!(updated.completed);
    }

    #[test]
    fn update_trims_the_stored_title() {
        let repo = repo();
        repo.create("1", "Original", 1).unwrap();

        let updated = repo
            .update(
                "1",
                &UpdateTodo {
                    title: Some("  Trimmed  ".to_string()),
                    completed: None,
                },
            )
            .unwrap()
            .expect("row exists");
        assert_eq!(updated.title, "Trimmed");
    }

    #[test]
    fn update_with_no_fields_is_a_read_back() {
        let repo = repo();
        let created = repo.create("1", "Same", 1).unwrap();

        let updated = repo.update("1", &UpdateTodo::default()).unwrap();
        assert_eq!(updated, Some(created));
    }

    #[test]
    fn update_missing_id_is_none() {
        let updated = repo()
            .update(
                "nope",
                &UpdateTodo {
                    title: Some("X".to_string()),
                    completed: None,
                },
            )
            .unwrap();
        assert!(updated.is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let repo = repo();
        repo.create("1", "Doomed", 1).unwrap();

        assert!(repo.delete("1").unwrap());
        assert!(!repo.delete("1").unwrap());
        assert!(repo.get_by_id("1").unwrap().is_none());
    }

    #[test]
    fn full_lifecycle() {
        let repo = repo();
        let created = repo.create("10", "Buy milk", 10).unwrap();
        assert!(!created.completed);

        let updated = repo
            .update(
                "10",
                &UpdateTodo {
                    title: None,
                    completed: Some(true),
                },
            )
            .unwrap()
            .expect("row exists");
        assert!(updated.completed);

        let listed = repo.list_all().unwrap();
        assert_eq!(listed, vec![updated]);

        assert!(repo.delete("10").unwrap());
        assert!(repo.get_by_id("10").unwrap().is_none());
    }
}

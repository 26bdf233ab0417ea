//! Data access for the `Todos` relation.
//!
//! Every query is parameterized and filtered by `acct_name`. Reads that match
//! nothing return an empty `Vec` or `None`; only updates have a distinct
//! "does not exist" outcome.

use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::model::{AccountName, NewTodo, TodoItem};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS Todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    acct_name TEXT NOT NULL,
    title TEXT NOT NULL,
    body TEXT NOT NULL DEFAULT '',
    category TEXT NOT NULL DEFAULT '',
    item_priority INTEGER NOT NULL DEFAULT 0,
    publish_date TEXT NOT NULL,
    active BOOLEAN NOT NULL DEFAULT 1
)
"#;

const SELECT_COLUMNS: &str =
    "SELECT id, acct_name, title, body, category, item_priority, publish_date, active FROM Todos";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("ID {id} does not exist")]
    NotFound { id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle to the todo database. Cheap to clone; clones share one pool.
#[derive(Debug, Clone)]
pub struct TodoStore {
    pool: SqlitePool,
}

impl TodoStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `url` and make sure the `Todos` table exists.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        let store = Self::new(pool);
        store.init_schema().await?;
        Ok(store)
    }

    /// A private in-memory database. The pool is pinned to a single
    /// connection because every SQLite `:memory:` connection is its own
    /// database.
    pub async fn in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        let store = Self::new(pool);
        store.init_schema().await?;
        Ok(store)
    }

    pub async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert a fresh item. The row is always active and stamped with the
    /// current time. Returns the assigned id.
    pub async fn insert(&self, todo: &NewTodo, account: &AccountName) -> StoreResult<i64> {
        let result = sqlx::query(
            "INSERT INTO Todos (acct_name, title, body, category, item_priority, publish_date, active) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(account.as_str())
        .bind(&todo.title)
        .bind(&todo.body)
        .bind(&todo.category)
        .bind(todo.priority)
        .bind(Utc::now())
        .bind(true)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn select_all(&self, account: &AccountName) -> StoreResult<Vec<TodoItem>> {
        let items = sqlx::query_as::<_, TodoItem>(&format!(
            "{SELECT_COLUMNS} WHERE acct_name = ? ORDER BY id"
        ))
        .bind(account.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn select_by_active(
        &self,
        active: bool,
        account: &AccountName,
    ) -> StoreResult<Vec<TodoItem>> {
        let items = sqlx::query_as::<_, TodoItem>(&format!(
            "{SELECT_COLUMNS} WHERE active = ? AND acct_name = ? ORDER BY id"
        ))
        .bind(active)
        .bind(account.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Items at or above `threshold` urgency (numerically `<=`). Unset
    /// priorities (`0`) are never included.
    pub async fn select_by_priority(
        &self,
        threshold: i32,
        account: &AccountName,
    ) -> StoreResult<Vec<TodoItem>> {
        let items = sqlx::query_as::<_, TodoItem>(&format!(
            "{SELECT_COLUMNS} WHERE item_priority != 0 AND item_priority <= ? AND acct_name = ? ORDER BY id"
        ))
        .bind(threshold)
        .bind(account.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn select_non_priority(&self, account: &AccountName) -> StoreResult<Vec<TodoItem>> {
        let items = sqlx::query_as::<_, TodoItem>(&format!(
            "{SELECT_COLUMNS} WHERE item_priority = 0 AND acct_name = ? ORDER BY id"
        ))
        .bind(account.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn select_by_category(
        &self,
        category: &str,
        account: &AccountName,
    ) -> StoreResult<Vec<TodoItem>> {
        let items = sqlx::query_as::<_, TodoItem>(&format!(
            "{SELECT_COLUMNS} WHERE category = ? AND acct_name = ? ORDER BY id"
        ))
        .bind(category)
        .bind(account.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn select_by_id(
        &self,
        id: i64,
        account: &AccountName,
    ) -> StoreResult<Option<TodoItem>> {
        let item = sqlx::query_as::<_, TodoItem>(&format!(
            "{SELECT_COLUMNS} WHERE id = ? AND acct_name = ?"
        ))
        .bind(id)
        .bind(account.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    pub async fn delete_by_title(&self, title: &str, account: &AccountName) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM Todos WHERE title = ? AND acct_name = ?")
            .bind(title)
            .bind(account.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_priority(
        &self,
        priority: i32,
        account: &AccountName,
    ) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM Todos WHERE item_priority = ? AND acct_name = ?")
            .bind(priority)
            .bind(account.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_inactive(&self, account: &AccountName) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM Todos WHERE active = 0 AND acct_name = ?")
            .bind(account.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_id(&self, id: i64, account: &AccountName) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM Todos WHERE id = ? AND acct_name = ?")
            .bind(id)
            .bind(account.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn update_title(
        &self,
        id: i64,
        title: &str,
        account: &AccountName,
    ) -> StoreResult<()> {
        self.update_field(id, FieldChange::Title(title), account).await
    }

    pub async fn update_priority(
        &self,
        id: i64,
        priority: i32,
        account: &AccountName,
    ) -> StoreResult<()> {
        self.update_field(id, FieldChange::Priority(priority), account).await
    }

    pub async fn update_active(
        &self,
        id: i64,
        active: bool,
        account: &AccountName,
    ) -> StoreResult<()> {
        self.update_field(id, FieldChange::Active(active), account).await
    }

    /// A single conditional `UPDATE` scoped to the account. SQLite counts
    /// every row the `WHERE` matched, changed value or not, so zero affected
    /// rows means the id does not exist for this account.
    async fn update_field(
        &self,
        id: i64,
        change: FieldChange<'_>,
        account: &AccountName,
    ) -> StoreResult<()> {
        let query = match change {
            FieldChange::Title(title) => {
                sqlx::query("UPDATE Todos SET title = ? WHERE id = ? AND acct_name = ?")
                    .bind(title)
            }
            FieldChange::Priority(priority) => {
                sqlx::query("UPDATE Todos SET item_priority = ? WHERE id = ? AND acct_name = ?")
                    .bind(priority)
            }
            FieldChange::Active(active) => {
                sqlx::query("UPDATE Todos SET active = ? WHERE id = ? AND acct_name = ?")
                    .bind(active)
            }
        };
        let result = query
            .bind(id)
            .bind(account.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }
}

enum FieldChange<'a> {
    Title(&'a str),
    Priority(i32),
    Active(bool),
}

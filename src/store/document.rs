// Recipe documents stored as JSON rows in SQLite
// Author: kelexine (https://github.com/kelexine)

use super::{RecipeStore, WriteOutcome};
use crate::error::{StoreError, StoreResult};
use crate::models::{Recipe, RecipeFields, RecipeId};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, info};

const SCHEMA_VERSION: i64 = 1;

/// Recipe collection backed by a SQLite database.
///
/// Each recipe is one row: the id as primary key and the content fields as a
/// JSON document. Insertion order is the table's rowid order.
/// [`DocumentStore::in_memory`] keeps the database in process memory,
/// [`DocumentStore::open`] persists it to a file.
pub struct DocumentStore {
    // None once the store has been closed
    conn: Arc<Mutex<Option<Connection>>>,
    path: Option<PathBuf>,
}

impl DocumentStore {
    /// Volatile database; contents are lost when the store is dropped
    pub async fn in_memory() -> StoreResult<Self> {
        let conn = run_blocking(|| {
            let started_at = Instant::now();
            let conn = Connection::open_in_memory()?;
            bootstrap(&conn)?;
            info!(
                "Opened in-memory recipe database in {}ms",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        })
        .await?;

        Ok(Self {
            conn: Arc::new(Mutex::new(Some(conn))),
            path: None,
        })
    }

    /// Open (or create) the database file at `path`
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let db_path = path.clone();

        let conn = run_blocking(move || {
            let started_at = Instant::now();
            if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let conn = Connection::open(&db_path)?;
            bootstrap(&conn)?;
            info!(
                "Opened recipe database {} in {}ms",
                db_path.display(),
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        })
        .await?;

        Ok(Self {
            conn: Arc::new(Mutex::new(Some(conn))),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `op` against the connection on the blocking pool
    async fn with_conn<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        run_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))?;
            let conn = guard
                .as_ref()
                .ok_or_else(|| StoreError::Unavailable("store has been closed".to_string()))?;
            op(conn)
        })
        .await
    }
}

async fn run_blocking<T, F>(op: F) -> StoreResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> StoreResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| StoreError::Persistence(format!("store task failed: {}", e)))?
}

fn bootstrap(conn: &Connection) -> StoreResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;

    let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if version < SCHEMA_VERSION {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY NOT NULL,
                doc TEXT NOT NULL
            );
            PRAGMA user_version = 1;",
        )?;
        debug!("Migrated recipe schema from version {} to {}", version, SCHEMA_VERSION);
    }
    Ok(())
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<(String, String)> {
    Ok((row.get(0)?, row.get(1)?))
}

fn decode(id: &str, doc: &str) -> StoreResult<Recipe> {
    let id: RecipeId = id
        .parse()
        .map_err(|e| StoreError::Persistence(format!("stored recipe has a bad id: {}", e)))?;
    let fields: RecipeFields = serde_json::from_str(doc)?;
    Ok(Recipe::new(id, fields))
}

fn outcome(rows: usize) -> WriteOutcome {
    if rows == 0 {
        WriteOutcome::NoMatch
    } else {
        WriteOutcome::Matched
    }
}

#[async_trait]
impl RecipeStore for DocumentStore {
    async fn insert(&self, fields: RecipeFields) -> StoreResult<Recipe> {
        let recipe = Recipe::new(RecipeId::new(), fields);
        let doc = serde_json::to_string(&recipe.fields)?;
        let id = recipe.id.to_string();

        self.with_conn(move |conn| {
            conn.execute("INSERT INTO recipes (id, doc) VALUES (?1, ?2)", params![id, doc])?;
            Ok(())
        })
        .await?;

        debug!("Inserted recipe {}", recipe.id);
        Ok(recipe)
    }

    async fn find_by_id(&self, id: RecipeId) -> StoreResult<Recipe> {
        let key = id.to_string();
        let row = self
            .with_conn(move |conn| {
                let row = conn
                    .query_row(
                        "SELECT id, doc FROM recipes WHERE id = ?1",
                        params![key],
                        read_row,
                    )
                    .optional()?;
                Ok(row)
            })
            .await?;

        match row {
            Some((stored_id, doc)) => decode(&stored_id, &doc),
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn find_all(&self) -> StoreResult<Vec<Recipe>> {
        let rows = self
            .with_conn(|conn| {
                let mut stmt = conn.prepare("SELECT id, doc FROM recipes ORDER BY rowid")?;
                let rows = stmt
                    .query_map([], read_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(rows)
            })
            .await?;

        rows.iter().map(|(id, doc)| decode(id, doc)).collect()
    }

    async fn update_by_id(&self, id: RecipeId, fields: RecipeFields) -> StoreResult<WriteOutcome> {
        let doc = serde_json::to_string(&fields)?;
        let key = id.to_string();
        let rows = self
            .with_conn(move |conn| {
                Ok(conn.execute("UPDATE recipes SET doc = ?2 WHERE id = ?1", params![key, doc])?)
            })
            .await?;
        Ok(outcome(rows))
    }

    async fn delete_by_id(&self, id: RecipeId) -> StoreResult<WriteOutcome> {
        let key = id.to_string();
        let rows = self
            .with_conn(move |conn| Ok(conn.execute("DELETE FROM recipes WHERE id = ?1", params![key])?))
            .await?;
        Ok(outcome(rows))
    }

    async fn ping(&self) -> StoreResult<()> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
    }

    async fn close(&self) -> StoreResult<()> {
        let conn = Arc::clone(&self.conn);
        let path = self.path.clone();
        run_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))?;
            if let Some(conn) = guard.take() {
                conn.close().map_err(|(_, e)| StoreError::Sqlite(e))?;
                match path {
                    Some(path) => info!("Closed recipe database {}", path.display()),
                    None => info!("Closed in-memory recipe database"),
                }
            }
            Ok(())
        })
        .await
    }
}

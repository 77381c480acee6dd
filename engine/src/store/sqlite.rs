//! SQLite-backed record store.
//!
//! Schema (one row per `n`):
//!
//! ```text
//! records(n INTEGER PRIMARY KEY,
//!         components_str TEXT NOT NULL,   -- "K_{1,2}, K_{2,2}", "" for primes
//!         w INTEGER NOT NULL,
//!         graph_data TEXT,                -- JSON {nodes, edges} or NULL
//!         is_prime INTEGER NOT NULL)      -- 0 / 1
//! ```
//!
//! Each [`RecordStore::commit`] runs in one transaction, so a batch is either
//! fully visible or absent.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::{check_append_only, RecordStore};
use crate::component::parse_list;
use crate::error::StoreError;
use crate::graph::Graph;
use crate::record::Record;

/// Table and index definitions.
pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS records (
    n INTEGER PRIMARY KEY,
    components_str TEXT NOT NULL,
    w INTEGER NOT NULL,
    graph_data TEXT,
    is_prime INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_prime ON records (is_prime);
";

const INSERT_SQL: &str =
    "INSERT INTO records (n, components_str, w, graph_data, is_prime) VALUES (?1, ?2, ?3, ?4, ?5)";

const SELECT_SQL: &str =
    "SELECT components_str, w, graph_data, is_prime FROM records WHERE n = ?1";

/// A [`RecordStore`] on a SQLite database file (or an in-memory database).
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and ensures the schema.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlite`] if the file cannot be opened or the
    /// schema cannot be created.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })?;
        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Creates a store in a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlite`] if the schema cannot be created.
    pub fn in_memory() -> Result<Self, StoreError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// The database file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The underlying connection, for read-only queries.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn to_column(value: u64) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::OutOfRange(value))
}

fn from_column(n: u64, column: &str, value: i64) -> Result<u64, StoreError> {
    u64::try_from(value).map_err(|_| StoreError::Corrupt {
        n,
        reason: format!("negative {} ({})", column, value),
    })
}

impl RecordStore for SqliteStore {
    fn max_n(&self) -> Result<Option<u64>, StoreError> {
        let max: Option<i64> = self
            .conn
            .query_row("SELECT MAX(n) FROM records", [], |row| row.get(0))?;
        max.map(|n| from_column(0, "n", n)).transpose()
    }

    fn commit(&mut self, batch: &[Record]) -> Result<(), StoreError> {
        check_append_only(self.max_n()?, batch)?;

        let tx = self.conn.transaction()?;
        {
            let mut insert = tx.prepare_cached(INSERT_SQL)?;
            for record in batch {
                let graph = record
                    .graph
                    .as_ref()
                    .map(serde_json::to_string)
                    .transpose()?;
                insert.execute(params![
                    to_column(record.n)?,
                    record.components_str(),
                    to_column(record.weight)?,
                    graph,
                    record.is_prime,
                ])?;
            }
        }
        tx.commit()?;
        debug!(rows = batch.len(), "sqlite batch committed");
        Ok(())
    }

    fn get(&self, n: u64) -> Result<Option<Record>, StoreError> {
        let row = self
            .conn
            .query_row(SELECT_SQL, params![to_column(n)?], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, bool>(3)?,
                ))
            })
            .optional()?;

        let Some((components_str, w, graph_data, is_prime)) = row else {
            return Ok(None);
        };
        let graph = graph_data
            .map(|json| serde_json::from_str::<Graph>(&json))
            .transpose()?;
        Ok(Some(Record {
            n,
            components: parse_list(&components_str)?,
            weight: from_column(n, "w", w)?,
            graph,
            is_prime,
        }))
    }

    fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        from_column(0, "count", count)
    }

    fn compact(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch("VACUUM")?;
        Ok(())
    }
}

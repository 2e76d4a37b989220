//! Access to the SANCdpd SQLite database.
//!
//! The database is created and maintained outside this tool (see the data
//! dictionary); here we only check it, read reference tables and manage the
//! `agent` and `storage_location` rows.

use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("database is missing required table `{0}`")]
    MissingTable(&'static str),

    #[error("default person agent `{0}` is not in the agent table")]
    MissingDefaultAgent(String),

    #[error("default person agent `{code}` appears {count} times in the agent table")]
    DuplicateDefaultAgent { code: String, count: i64 },

    #[error("agent `{0}` is the default person agent and stays active")]
    DefaultAgentLocked(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

pub type DbResult<T> = std::result::Result<T, DbError>;

const REQUIRED_TABLES: [&str; 4] = ["event_type", "event_type_outcome", "agent", "storage_location"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventType {
    pub code: String,
    pub name: String,
    pub category: String,
}

/// Read-only lookup data loaded once per session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefData {
    pub event_types: Vec<EventType>,
    /// event_type_code -> outcome codes
    pub event_type_outcomes: BTreeMap<String, Vec<String>>,
}

/// Row counts seen by [`Database::verify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefCounts {
    pub event_types: usize,
    pub outcomes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub code: String,
    pub name: String,
    pub agent_type: String,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    pub code: String,
    pub name: String,
    pub path: String,
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open an existing database file. Never creates one.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DbError::FileNotFound(path.to_path_buf()));
        }
        let conn = Connection::open(path)?;
        tracing::info!(path = %path.display(), "connected to SQLite database");
        Ok(Database { conn })
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Database {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Create the tables this tool relies on, if absent.
    pub fn create_schema(&self) -> DbResult<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS event_type (
                event_type_code TEXT PRIMARY KEY,
                event_name TEXT NOT NULL,
                event_category_code TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS event_type_outcome (
                event_type_code TEXT NOT NULL,
                outcome_code TEXT NOT NULL,
                PRIMARY KEY (event_type_code, outcome_code),
                FOREIGN KEY (event_type_code) REFERENCES event_type(event_type_code)
            );

            CREATE TABLE IF NOT EXISTS agent (
                agent_code TEXT NOT NULL,
                agent_name TEXT NOT NULL,
                agent_type TEXT NOT NULL,
                agent_version TEXT,
                active INTEGER NOT NULL DEFAULT 1
            );

            CREATE TABLE IF NOT EXISTS storage_location (
                storage_code TEXT PRIMARY KEY,
                storage_name TEXT NOT NULL,
                storage_path TEXT NOT NULL,
                active INTEGER NOT NULL DEFAULT 1
            );
            ",
        )?;
        Ok(())
    }

    /// Sanity check: required tables exist and the default person agent is
    /// present exactly once.
    pub fn verify(&self, person_agent_code: &str) -> DbResult<RefCounts> {
        for table in REQUIRED_TABLES {
            let found: i64 = self.conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
                params![table],
                |row| row.get(0),
            )?;
            if found == 0 {
                return Err(DbError::MissingTable(table));
            }
        }

        let count = |sql: &str| -> DbResult<usize> {
            let n: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
            Ok(n.max(0) as usize)
        };
        let counts = RefCounts {
            event_types: count("SELECT COUNT(*) FROM event_type")?,
            outcomes: count("SELECT COUNT(*) FROM event_type_outcome")?,
        };

        let agents: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM agent WHERE agent_code = ?",
            params![person_agent_code],
            |row| row.get(0),
        )?;
        match agents {
            0 => Err(DbError::MissingDefaultAgent(person_agent_code.to_string())),
            1 => Ok(counts),
            n => Err(DbError::DuplicateDefaultAgent {
                code: person_agent_code.to_string(),
                count: n,
            }),
        }
    }

    pub fn load_reference(&self) -> DbResult<RefData> {
        let mut stmt = self.conn.prepare(
            "SELECT event_type_code, event_name, event_category_code
             FROM event_type ORDER BY event_type_code",
        )?;
        let event_types = stmt
            .query_map([], |row| {
                Ok(EventType {
                    code: row.get(0)?,
                    name: row.get(1)?,
                    category: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = self.conn.prepare(
            "SELECT event_type_code, outcome_code
             FROM event_type_outcome ORDER BY event_type_code, outcome_code",
        )?;
        let mut event_type_outcomes: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (code, outcome) = row?;
            event_type_outcomes.entry(code).or_default().push(outcome);
        }

        Ok(RefData {
            event_types,
            event_type_outcomes,
        })
    }

    /* ---------- agents ---------- */

    pub fn active_agents(&self) -> DbResult<Vec<Agent>> {
        let mut stmt = self.conn.prepare(
            "SELECT agent_code, agent_name, agent_type, agent_version
             FROM agent WHERE active = 1 ORDER BY agent_code",
        )?;
        let agents = stmt
            .query_map([], |row| {
                Ok(Agent {
                    code: row.get(0)?,
                    name: row.get(1)?,
                    agent_type: row.get(2)?,
                    version: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(agents)
    }

    pub fn agent_exists(&self, code: &str) -> DbResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM agent WHERE agent_code = ? LIMIT 1",
                params![code],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub fn add_agent(&self, agent: &Agent) -> DbResult<()> {
        self.conn.execute(
            "INSERT INTO agent (agent_code, agent_name, agent_type, agent_version, active)
             VALUES (?, ?, ?, ?, 1)",
            params![agent.code, agent.name, agent.agent_type, agent.version],
        )?;
        Ok(())
    }

    /// Returns false when no active agent has this code.
    pub fn deactivate_agent(&self, code: &str, person_agent_code: &str) -> DbResult<bool> {
        if code == person_agent_code {
            return Err(DbError::DefaultAgentLocked(code.to_string()));
        }
        let changed = self.conn.execute(
            "UPDATE agent SET active = 0 WHERE agent_code = ? AND active = 1",
            params![code],
        )?;
        Ok(changed > 0)
    }

    /* ---------- storage locations ---------- */

    pub fn active_storage(&self) -> DbResult<Vec<StorageLocation>> {
        let mut stmt = self.conn.prepare(
            "SELECT storage_code, storage_name, storage_path
             FROM storage_location WHERE active = 1 ORDER BY storage_code",
        )?;
        let locations = stmt
            .query_map([], |row| {
                Ok(StorageLocation {
                    code: row.get(0)?,
                    name: row.get(1)?,
                    path: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(locations)
    }

    pub fn storage_exists(&self, code: &str) -> DbResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM storage_location WHERE storage_code = ? LIMIT 1",
                params![code],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub fn add_storage(&self, location: &StorageLocation) -> DbResult<()> {
        self.conn.execute(
            "INSERT INTO storage_location (storage_code, storage_name, storage_path, active)
             VALUES (?, ?, ?, 1)",
            params![location.code, location.name, location.path],
        )?;
        Ok(())
    }

    pub fn deactivate_storage(&self, code: &str) -> DbResult<bool> {
        let changed = self.conn.execute(
            "UPDATE storage_location SET active = 0 WHERE storage_code = ? AND active = 1",
            params![code],
        )?;
        Ok(changed > 0)
    }

    /// Raw connection, for seeding fixtures.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

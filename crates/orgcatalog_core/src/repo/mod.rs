//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for the catalog tables.
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - Repositories are constructed only over fully migrated connections.
//! - Read paths reject invalid persisted state (`InvalidData`) instead of
//!   masking it.
//! - List queries are ordered by primary key.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::building::CoordinateError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod building_repo;
pub mod business_repo;
pub mod organization_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for catalog persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Building coordinates rejected before a write.
    InvalidCoordinates(CoordinateError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidCoordinates(err) => write!(f, "invalid building coordinates: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "catalog repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "catalog repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidCoordinates(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<CoordinateError> for RepoError {
    fn from(value: CoordinateError) -> Self {
        Self::InvalidCoordinates(value)
    }
}

const CATALOG_TABLES: [&str; 5] = [
    "building",
    "organization",
    "phone",
    "business",
    "organization_business",
];

/// Verifies the connection carries the current catalog schema.
pub(crate) fn ensure_catalog_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in CATALOG_TABLES {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

/// `?, ?, ?` placeholder list for an `IN (...)` clause of `count` items.
pub(crate) fn in_placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

#[cfg(test)]
mod tests {
    use super::{ensure_catalog_connection_ready, in_placeholders, RepoError};
    use crate::db::open_db_in_memory;
    use rusqlite::Connection;

    #[test]
    fn placeholders_match_item_count() {
        assert_eq!(in_placeholders(1), "?");
        assert_eq!(in_placeholders(3), "?, ?, ?");
    }

    #[test]
    fn migrated_connection_is_ready() {
        let conn = open_db_in_memory().expect("in-memory catalog should open");
        ensure_catalog_connection_ready(&conn).expect("migrated connection should pass the check");
    }

    #[test]
    fn raw_connection_is_rejected() {
        let conn = Connection::open_in_memory().expect("raw in-memory connection should open");
        let err = ensure_catalog_connection_ready(&conn)
            .expect_err("unmigrated connection should be rejected");
        assert!(matches!(
            err,
            RepoError::UninitializedConnection {
                actual_version: 0,
                ..
            }
        ));
    }
}

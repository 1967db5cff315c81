//! Business category repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load categories by id and by tagged organization.
//! - Serve direct-child lookups for category closure.
//!
//! # Invariants
//! - `(name, parent_id)` is unique; duplicate siblings surface as `Db` errors.

use crate::hierarchy::ChildFetcher;
use crate::model::business::{Business, BusinessId};
use crate::model::organization::OrganizationId;
use crate::repo::{ensure_catalog_connection_ready, in_placeholders, RepoResult};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

/// Repository interface for category reads and seeding.
///
/// Child lookups come from the [`ChildFetcher`] supertrait.
pub trait BusinessRepository: ChildFetcher<Error = crate::repo::RepoError> {
    fn get_business(&self, id: BusinessId) -> RepoResult<Option<Business>>;
    /// Category tags of each organization, ordered by organization then category id.
    fn list_for_organizations(
        &self,
        organization_ids: &[OrganizationId],
    ) -> RepoResult<Vec<(OrganizationId, Business)>>;
    fn create_business(&self, name: &str, parent_id: Option<BusinessId>)
        -> RepoResult<Business>;
}

/// SQLite-backed category repository.
pub struct SqliteBusinessRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBusinessRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ChildFetcher for SqliteBusinessRepository<'_> {
    type Error = crate::repo::RepoError;

    fn children_of(&self, parent_ids: &[BusinessId]) -> RepoResult<Vec<BusinessId>> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT id FROM business WHERE parent_id IN ({}) ORDER BY id ASC;",
            in_placeholders(parent_ids.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(parent_ids.iter()), |row| row.get(0))?;
        let ids = rows.collect::<rusqlite::Result<Vec<BusinessId>>>()?;
        Ok(ids)
    }
}

impl BusinessRepository for SqliteBusinessRepository<'_> {
    fn get_business(&self, id: BusinessId) -> RepoResult<Option<Business>> {
        let business = self
            .conn
            .query_row(
                "SELECT id, name, parent_id FROM business WHERE id = ?1;",
                [id],
                parse_business_row,
            )
            .optional()?;
        Ok(business)
    }

    fn list_for_organizations(
        &self,
        organization_ids: &[OrganizationId],
    ) -> RepoResult<Vec<(OrganizationId, Business)>> {
        if organization_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT ob.organization_id AS organization_id,
                    b.id AS id,
                    b.name AS name,
                    b.parent_id AS parent_id
             FROM organization_business ob
             INNER JOIN business b ON b.id = ob.business_id
             WHERE ob.organization_id IN ({})
             ORDER BY ob.organization_id ASC, b.id ASC;",
            in_placeholders(organization_ids.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(organization_ids.iter()), |row| {
            Ok((row.get("organization_id")?, parse_business_row(row)?))
        })?;
        let tags = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tags)
    }

    fn create_business(
        &self,
        name: &str,
        parent_id: Option<BusinessId>,
    ) -> RepoResult<Business> {
        self.conn.execute(
            "INSERT INTO business (name, parent_id) VALUES (?1, ?2);",
            params![name, parent_id],
        )?;
        Ok(Business {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            parent_id,
        })
    }
}

fn parse_business_row(row: &Row<'_>) -> rusqlite::Result<Business> {
    Ok(Business {
        id: row.get("id")?,
        name: row.get("name")?,
        parent_id: row.get("parent_id")?,
    })
}

//! Organization repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Resolve organizations by id, building ids, and category ids.
//! - Load phones for a batch of organizations.
//! - Insert organizations, phones and category tags for the seed loader.
//!
//! # Invariants
//! - Category lookups return each organization once, even when several of
//!   its tags match.
//! - `(number, organization_id)` duplicates are rejected by the store.

use crate::model::building::BuildingId;
use crate::model::business::BusinessId;
use crate::model::organization::{Organization, OrganizationId, Phone};
use crate::repo::{ensure_catalog_connection_ready, in_placeholders, RepoResult};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const ORGANIZATION_SELECT_SQL: &str = "SELECT id, name, building_id FROM organization";

/// Repository interface for organization reads and seeding.
pub trait OrganizationRepository {
    fn get_organization(&self, id: OrganizationId) -> RepoResult<Option<Organization>>;
    fn list_organizations(&self) -> RepoResult<Vec<Organization>>;
    fn list_by_buildings(&self, building_ids: &[BuildingId]) -> RepoResult<Vec<Organization>>;
    fn list_by_businesses(&self, business_ids: &[BusinessId]) -> RepoResult<Vec<Organization>>;
    /// Phones of each organization, ordered by organization then phone id.
    fn list_phones(&self, organization_ids: &[OrganizationId]) -> RepoResult<Vec<Phone>>;
    fn create_organization(&self, name: &str, building_id: BuildingId)
        -> RepoResult<Organization>;
    fn add_phone(&self, organization_id: OrganizationId, number: &str) -> RepoResult<Phone>;
    fn tag_business(
        &self,
        organization_id: OrganizationId,
        business_id: BusinessId,
    ) -> RepoResult<()>;
}

/// SQLite-backed organization repository.
pub struct SqliteOrganizationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOrganizationRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_organizations(
        &self,
        sql: &str,
        ids: &[i64],
    ) -> RepoResult<Vec<Organization>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), parse_organization_row)?;
        let organizations = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(organizations)
    }
}

impl OrganizationRepository for SqliteOrganizationRepository<'_> {
    fn get_organization(&self, id: OrganizationId) -> RepoResult<Option<Organization>> {
        let organization = self
            .conn
            .query_row(
                &format!("{ORGANIZATION_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_organization_row,
            )
            .optional()?;
        Ok(organization)
    }

    fn list_organizations(&self) -> RepoResult<Vec<Organization>> {
        self.query_organizations(&format!("{ORGANIZATION_SELECT_SQL} ORDER BY id ASC;"), &[])
    }

    fn list_by_buildings(&self, building_ids: &[BuildingId]) -> RepoResult<Vec<Organization>> {
        if building_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "{ORGANIZATION_SELECT_SQL} WHERE building_id IN ({}) ORDER BY id ASC;",
            in_placeholders(building_ids.len())
        );
        self.query_organizations(&sql, building_ids)
    }

    fn list_by_businesses(&self, business_ids: &[BusinessId]) -> RepoResult<Vec<Organization>> {
        if business_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "{ORGANIZATION_SELECT_SQL}
             WHERE id IN (
                SELECT organization_id
                FROM organization_business
                WHERE business_id IN ({})
             )
             ORDER BY id ASC;",
            in_placeholders(business_ids.len())
        );
        self.query_organizations(&sql, business_ids)
    }

    fn list_phones(&self, organization_ids: &[OrganizationId]) -> RepoResult<Vec<Phone>> {
        if organization_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT id, number, organization_id
             FROM phone
             WHERE organization_id IN ({})
             ORDER BY organization_id ASC, id ASC;",
            in_placeholders(organization_ids.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(organization_ids.iter()), |row| {
            Ok(Phone {
                id: row.get("id")?,
                number: row.get("number")?,
                organization_id: row.get("organization_id")?,
            })
        })?;
        let phones = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(phones)
    }

    fn create_organization(
        &self,
        name: &str,
        building_id: BuildingId,
    ) -> RepoResult<Organization> {
        self.conn.execute(
            "INSERT INTO organization (name, building_id) VALUES (?1, ?2);",
            params![name, building_id],
        )?;
        Ok(Organization {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            building_id,
        })
    }

    fn add_phone(&self, organization_id: OrganizationId, number: &str) -> RepoResult<Phone> {
        self.conn.execute(
            "INSERT INTO phone (number, organization_id) VALUES (?1, ?2);",
            params![number, organization_id],
        )?;
        Ok(Phone {
            id: self.conn.last_insert_rowid(),
            number: number.to_string(),
            organization_id,
        })
    }

    fn tag_business(
        &self,
        organization_id: OrganizationId,
        business_id: BusinessId,
    ) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO organization_business (organization_id, business_id) VALUES (?1, ?2);",
            params![organization_id, business_id],
        )?;
        Ok(())
    }
}

fn parse_organization_row(row: &Row<'_>) -> rusqlite::Result<Organization> {
    Ok(Organization {
        id: row.get("id")?,
        name: row.get("name")?,
        building_id: row.get("building_id")?,
    })
}

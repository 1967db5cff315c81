//! Demo catalog loader.
//!
//! # Responsibility
//! - Populate an empty catalog with Moscow buildings, a three-level
//!   category tree, organizations, phones and category tags.
//!
//! # Invariants
//! - Seeding is all-or-nothing (one transaction).
//! - A catalog that already has buildings is left untouched.
//! - Categories are inserted level by level, so ids grow with depth.

mod data;

use crate::model::business::BusinessId;
use crate::repo::building_repo::{BuildingRepository, SqliteBuildingRepository};
use crate::repo::business_repo::{BusinessRepository, SqliteBusinessRepository};
use crate::repo::organization_repo::{OrganizationRepository, SqliteOrganizationRepository};
use crate::repo::{RepoError, RepoResult};
use data::{CategorySeed, BUILDINGS, CATEGORY_TREE, ORGANIZATIONS};
use log::{error, info};
use rusqlite::Connection;
use std::collections::HashMap;

/// Row counts written by [`seed_catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCounts {
    pub buildings: usize,
    pub businesses: usize,
    pub organizations: usize,
    pub phones: usize,
    pub tags: usize,
}

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded(SeedCounts),
    /// Buildings were already present; nothing was written.
    AlreadySeeded,
}

/// Seeds the demo catalog when the building table is empty.
pub fn seed_catalog(conn: &mut Connection) -> RepoResult<SeedOutcome> {
    if SqliteBuildingRepository::try_new(conn)?.count_buildings()? > 0 {
        info!("event=seed module=seed status=skipped reason=already_seeded");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let tx = conn.transaction()?;
    let counts = match write_catalog(&tx) {
        Ok(counts) => counts,
        Err(err) => {
            error!("event=seed module=seed status=error error={err}");
            return Err(err);
        }
    };
    tx.commit()?;

    info!(
        "event=seed module=seed status=ok buildings={} businesses={} organizations={} phones={} tags={}",
        counts.buildings, counts.businesses, counts.organizations, counts.phones, counts.tags
    );
    Ok(SeedOutcome::Seeded(counts))
}

fn write_catalog(conn: &Connection) -> RepoResult<SeedCounts> {
    let buildings = SqliteBuildingRepository::try_new(conn)?;
    let businesses = SqliteBusinessRepository::try_new(conn)?;
    let organizations = SqliteOrganizationRepository::try_new(conn)?;

    let mut building_ids = Vec::with_capacity(BUILDINGS.len());
    for (address, latitude, longitude) in BUILDINGS {
        building_ids.push(buildings.create_building(address, latitude, longitude)?.id);
    }

    let category_ids = write_category_levels(&businesses, CATEGORY_TREE)?;

    let mut counts = SeedCounts {
        buildings: building_ids.len(),
        businesses: category_ids.len(),
        organizations: 0,
        phones: 0,
        tags: 0,
    };

    for seed in ORGANIZATIONS {
        let building_id = *building_ids.get(seed.building).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "seed organization `{}` references building #{}",
                seed.name, seed.building
            ))
        })?;
        let organization = organizations.create_organization(seed.name, building_id)?;
        counts.organizations += 1;

        for number in seed.phones {
            organizations.add_phone(organization.id, number)?;
            counts.phones += 1;
        }

        for category in seed.categories {
            let business_id = *category_ids.get(category).ok_or_else(|| {
                RepoError::InvalidData(format!("seed category `{category}` is not defined"))
            })?;
            organizations.tag_business(organization.id, business_id)?;
            counts.tags += 1;
        }
    }

    Ok(counts)
}

/// Inserts the tree breadth-first and returns `name -> id`.
fn write_category_levels<R: BusinessRepository>(
    repo: &R,
    roots: &'static [CategorySeed],
) -> RepoResult<HashMap<&'static str, BusinessId>> {
    let mut ids = HashMap::new();
    let mut level: Vec<(Option<BusinessId>, &'static CategorySeed)> =
        roots.iter().map(|seed| (None, seed)).collect();

    while !level.is_empty() {
        let mut next_level = Vec::new();
        for (parent_id, seed) in level {
            let business = repo.create_business(seed.name, parent_id)?;
            ids.insert(seed.name, business.id);
            next_level.extend(seed.children.iter().map(|child| (Some(business.id), child)));
        }
        level = next_level;
    }

    Ok(ids)
}

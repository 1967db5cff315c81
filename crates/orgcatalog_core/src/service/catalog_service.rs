//! Catalog use-case service.
//!
//! # Responsibility
//! - Validate query input before it reaches the geo/hierarchy core.
//! - Compose repository reads with proximity filtering and category closure.
//! - Hydrate organizations with building, phones and category tags.
//!
//! # Invariants
//! - Referenced building/category/organization ids are checked for existence
//!   before lookups; missing ids map to `*NotFound`.
//! - Empty matches are `Ok(vec![])`, never errors.
//! - Organization lists are ordered by id and free of duplicates.

use crate::geo::{filter_by_area_with, AreaShape, BoundingBox, LongitudeSpan};
use crate::hierarchy::category_subtree_ids;
use crate::model::building::{Building, BuildingId, GeoPoint};
use crate::model::business::{Business, BusinessId};
use crate::model::organization::{Organization, OrganizationDetails, OrganizationId, PhoneNumber};
use crate::repo::building_repo::{BuildingRepository, SqliteBuildingRepository};
use crate::repo::business_repo::{BusinessRepository, SqliteBusinessRepository};
use crate::repo::organization_repo::{OrganizationRepository, SqliteOrganizationRepository};
use crate::repo::{RepoError, RepoResult};
use log::{debug, info};
use rusqlite::Connection;
use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Largest accepted search radius.
pub const MAX_RADIUS_METERS: f64 = 100_000.0;

/// Minimum number of characters in a name search.
pub const MIN_NAME_QUERY_CHARS: usize = 2;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from catalog service operations.
#[derive(Debug)]
pub enum CatalogError {
    /// Query parameters are outside documented bounds.
    InvalidQuery(String),
    BuildingNotFound(BuildingId),
    BusinessNotFound(BusinessId),
    OrganizationNotFound(OrganizationId),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuery(message) => write!(f, "invalid query: {message}"),
            Self::BuildingNotFound(id) => write!(f, "building {id} not found"),
            Self::BusinessNotFound(id) => write!(f, "business {id} not found"),
            Self::OrganizationNotFound(id) => write!(f, "organization {id} not found"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CatalogError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Validated area search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaQuery {
    pub center: GeoPoint,
    pub radius_meters: f64,
    pub shape: AreaShape,
    pub span: LongitudeSpan,
}

impl AreaQuery {
    /// Builds a query after checking coordinate and radius bounds.
    ///
    /// # Errors
    /// - `InvalidQuery` when latitude/longitude are out of range or NaN.
    /// - `InvalidQuery` when radius is not in `(0, MAX_RADIUS_METERS]`.
    pub fn new(
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
        shape: AreaShape,
    ) -> CatalogResult<Self> {
        let center = GeoPoint::new(latitude, longitude);
        center
            .validate()
            .map_err(|err| CatalogError::InvalidQuery(err.to_string()))?;

        if !(radius_meters > 0.0 && radius_meters <= MAX_RADIUS_METERS) {
            return Err(CatalogError::InvalidQuery(format!(
                "radius {radius_meters} must be greater than 0 and at most {MAX_RADIUS_METERS}"
            )));
        }

        Ok(Self {
            center,
            radius_meters,
            shape,
            span: LongitudeSpan::SingleCosine,
        })
    }

    /// Switches the longitude span rule; see [`LongitudeSpan::DoubleCosine`].
    pub fn with_span(mut self, span: LongitudeSpan) -> Self {
        self.span = span;
        self
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::around_with(self.center, self.radius_meters, self.span)
    }
}

/// Catalog use-case facade over building, organization and category
/// repositories.
pub struct CatalogService<B, O, C> {
    buildings: B,
    organizations: O,
    businesses: C,
}

/// Catalog service wired to SQLite repositories.
pub type SqliteCatalogService<'conn> = CatalogService<
    SqliteBuildingRepository<'conn>,
    SqliteOrganizationRepository<'conn>,
    SqliteBusinessRepository<'conn>,
>;

impl<'conn> SqliteCatalogService<'conn> {
    /// Creates a service over one migrated connection.
    pub fn sqlite(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqliteBuildingRepository::try_new(conn)?,
            SqliteOrganizationRepository::try_new(conn)?,
            SqliteBusinessRepository::try_new(conn)?,
        ))
    }
}

impl<B, O, C> CatalogService<B, O, C>
where
    B: BuildingRepository,
    O: OrganizationRepository,
    C: BusinessRepository,
{
    pub fn new(buildings: B, organizations: O, businesses: C) -> Self {
        Self {
            buildings,
            organizations,
            businesses,
        }
    }

    /// Buildings inside the area.
    pub fn buildings_nearby(&self, query: &AreaQuery) -> CatalogResult<Vec<Building>> {
        let started_at = Instant::now();
        let buildings = self.buildings_in_area(query)?;
        log_query("buildings_nearby", started_at, buildings.len());
        Ok(buildings)
    }

    /// Organizations housed in any building inside the area.
    pub fn organizations_nearby(
        &self,
        query: &AreaQuery,
    ) -> CatalogResult<Vec<OrganizationDetails>> {
        let started_at = Instant::now();
        let building_ids: Vec<BuildingId> = self
            .buildings_in_area(query)?
            .into_iter()
            .map(|building| building.id)
            .collect();
        if building_ids.is_empty() {
            log_query("organizations_nearby", started_at, 0);
            return Ok(Vec::new());
        }

        let organizations = self.organizations.list_by_buildings(&building_ids)?;
        let details = self.hydrate(organizations)?;
        log_query("organizations_nearby", started_at, details.len());
        Ok(details)
    }

    /// Case-insensitive substring search over organization names.
    ///
    /// # Errors
    /// - `InvalidQuery` when `name` is shorter than [`MIN_NAME_QUERY_CHARS`].
    pub fn search_organizations(&self, name: &str) -> CatalogResult<Vec<OrganizationDetails>> {
        let started_at = Instant::now();
        if name.chars().count() < MIN_NAME_QUERY_CHARS {
            return Err(CatalogError::InvalidQuery(format!(
                "name must contain at least {MIN_NAME_QUERY_CHARS} characters"
            )));
        }

        let needle = name.to_lowercase();
        let matches: Vec<Organization> = self
            .organizations
            .list_organizations()?
            .into_iter()
            .filter(|organization| organization.name_contains_lowercase(&needle))
            .collect();
        let details = self.hydrate(matches)?;
        log_query("search_organizations", started_at, details.len());
        Ok(details)
    }

    /// Organizations located in one building.
    pub fn organizations_in_building(
        &self,
        building_id: BuildingId,
    ) -> CatalogResult<Vec<OrganizationDetails>> {
        let started_at = Instant::now();
        self.buildings
            .get_building(building_id)?
            .ok_or(CatalogError::BuildingNotFound(building_id))?;

        let organizations = self.organizations.list_by_buildings(&[building_id])?;
        let details = self.hydrate(organizations)?;
        log_query("organizations_in_building", started_at, details.len());
        Ok(details)
    }

    /// Organizations tagged with exactly this category.
    pub fn organizations_by_business(
        &self,
        business_id: BusinessId,
    ) -> CatalogResult<Vec<OrganizationDetails>> {
        let started_at = Instant::now();
        self.ensure_business_exists(business_id)?;

        let organizations = self.organizations.list_by_businesses(&[business_id])?;
        let details = self.hydrate(organizations)?;
        log_query("organizations_by_business", started_at, details.len());
        Ok(details)
    }

    /// Organizations tagged with this category or one of its descendants up
    /// to two levels below it.
    pub fn organizations_by_business_tree(
        &self,
        business_id: BusinessId,
    ) -> CatalogResult<Vec<OrganizationDetails>> {
        let started_at = Instant::now();
        self.ensure_business_exists(business_id)?;

        let subtree: Vec<BusinessId> = category_subtree_ids(business_id, &self.businesses)?
            .into_iter()
            .collect();
        debug!(
            "event=category_closure module=service root={} size={}",
            business_id,
            subtree.len()
        );

        let organizations = self.organizations.list_by_businesses(&subtree)?;
        let details = self.hydrate(organizations)?;
        log_query("organizations_by_business_tree", started_at, details.len());
        Ok(details)
    }

    /// One organization with related data.
    pub fn organization(&self, id: OrganizationId) -> CatalogResult<OrganizationDetails> {
        let organization = self
            .organizations
            .get_organization(id)?
            .ok_or(CatalogError::OrganizationNotFound(id))?;

        self.hydrate(vec![organization])?
            .pop()
            .ok_or(CatalogError::OrganizationNotFound(id))
    }

    fn buildings_in_area(&self, query: &AreaQuery) -> CatalogResult<Vec<Building>> {
        let candidates = self.buildings.list_in_box(&query.bounding_box())?;
        Ok(filter_by_area_with(
            query.center,
            query.radius_meters,
            query.shape,
            query.span,
            candidates,
        ))
    }

    fn ensure_business_exists(&self, business_id: BusinessId) -> CatalogResult<()> {
        self.businesses
            .get_business(business_id)?
            .ok_or(CatalogError::BusinessNotFound(business_id))?;
        Ok(())
    }

    fn hydrate(
        &self,
        organizations: Vec<Organization>,
    ) -> CatalogResult<Vec<OrganizationDetails>> {
        if organizations.is_empty() {
            return Ok(Vec::new());
        }

        let organization_ids: Vec<OrganizationId> =
            organizations.iter().map(|organization| organization.id).collect();
        let building_ids: Vec<BuildingId> = organizations
            .iter()
            .map(|organization| organization.building_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let buildings: HashMap<BuildingId, Building> = self
            .buildings
            .list_by_ids(&building_ids)?
            .into_iter()
            .map(|building| (building.id, building))
            .collect();

        let mut phones: HashMap<OrganizationId, Vec<PhoneNumber>> = HashMap::new();
        for phone in self.organizations.list_phones(&organization_ids)? {
            phones
                .entry(phone.organization_id)
                .or_default()
                .push(PhoneNumber {
                    number: phone.number,
                });
        }

        let mut tags: HashMap<OrganizationId, Vec<Business>> = HashMap::new();
        for (organization_id, business) in
            self.businesses.list_for_organizations(&organization_ids)?
        {
            tags.entry(organization_id).or_default().push(business);
        }

        organizations
            .into_iter()
            .map(|organization| -> CatalogResult<OrganizationDetails> {
                let building = buildings
                    .get(&organization.building_id)
                    .cloned()
                    .ok_or_else(|| {
                        RepoError::InvalidData(format!(
                            "organization {} references missing building {}",
                            organization.id, organization.building_id
                        ))
                    })?;
                Ok(OrganizationDetails {
                    id: organization.id,
                    phones: phones.remove(&organization.id).unwrap_or_default(),
                    businesses: tags.remove(&organization.id).unwrap_or_default(),
                    name: organization.name,
                    building,
                })
            })
            .collect()
    }
}

fn log_query(operation: &str, started_at: Instant, count: usize) {
    info!(
        "event=catalog_query module=service status=ok op={} count={} duration_ms={}",
        operation,
        count,
        started_at.elapsed().as_millis()
    );
}

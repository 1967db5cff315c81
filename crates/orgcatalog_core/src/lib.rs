//! Core domain logic for the organization catalog.
//! Geospatial filtering, category closure, storage and query services live
//! here; transports only translate to and from these types.

pub mod db;
pub mod geo;
pub mod hierarchy;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError};
pub use geo::{
    filter_by_area, haversine_distance, AreaShape, BoundingBox, Located, LongitudeSpan,
};
pub use hierarchy::{category_subtree_ids, ChildFetcher, CLOSURE_DEPTH};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::building::{Building, BuildingId, CoordinateError, GeoPoint};
pub use model::business::{Business, BusinessId};
pub use model::organization::{
    Organization, OrganizationDetails, OrganizationId, Phone, PhoneNumber,
};
pub use repo::{RepoError, RepoResult};
pub use seed::{seed_catalog, SeedCounts, SeedOutcome};
pub use service::catalog_service::{
    AreaQuery, CatalogError, CatalogResult, CatalogService, SqliteCatalogService,
    MAX_RADIUS_METERS, MIN_NAME_QUERY_CHARS,
};

/// Liveness check used by the CLI and health route.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

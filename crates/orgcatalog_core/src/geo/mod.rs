//! Proximity filtering over request-local candidate sets.
//!
//! # Responsibility
//! - Convert a center/radius pair into an inclusive bounding box.
//! - Refine box matches with exact haversine distance for circular areas.
//!
//! # Invariants
//! - Pure functions only: no I/O, no shared state.
//! - Never panics or yields NaN spans for in-range centers, poles included.

pub mod area;
pub mod distance;

pub use area::{
    filter_by_area, filter_by_area_with, is_within_area, AreaShape, BoundingBox, Located,
    LongitudeSpan, METERS_PER_DEGREE, MIN_COS_LATITUDE,
};
pub use distance::{distance_between, haversine_distance, EARTH_RADIUS_METERS};

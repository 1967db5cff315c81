//! Area selection: bounding-box pre-filter plus exact circle refinement.
//!
//! # Invariants
//! - Box bounds are inclusive on both ends.
//! - Circle results are always a subset of square results for the same
//!   center and radius.
//! - Spans stay finite for any center latitude, including the poles.

use crate::geo::distance::haversine_distance;
use crate::model::building::{Building, GeoPoint};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Approximate length of one degree of latitude.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Lower clamp for `cos(latitude)` before dividing by it.
pub const MIN_COS_LATITUDE: f64 = 1e-10;

/// Shape of the searched area around a center point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaShape {
    /// Points within `radius` meters along the great circle.
    #[default]
    Circle,
    /// Axis-aligned box with side `2 * radius`.
    Square,
}

impl AreaShape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
        }
    }
}

impl Display for AreaShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AreaShape {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "circle" => Ok(Self::Circle),
            "square" => Ok(Self::Square),
            other => Err(format!(
                "unsupported area shape `{other}`; expected circle|square"
            )),
        }
    }
}

/// How the longitude half-span is derived from the radius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LongitudeSpan {
    /// `radius / (111000 * cos(lat))`.
    #[default]
    SingleCosine,
    /// `radius / (111000 * cos(radians(cos(lat))))`.
    ///
    /// Reproduces legacy organization-search behavior. The resulting box is
    /// much narrower than the circle away from the equator, so it can miss
    /// matches. Never selected implicitly.
    DoubleCosine,
}

/// Inclusive latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Box of half-side `radius_meters` around `center`.
    pub fn around(center: GeoPoint, radius_meters: f64) -> Self {
        Self::around_with(center, radius_meters, LongitudeSpan::SingleCosine)
    }

    pub fn around_with(center: GeoPoint, radius_meters: f64, span: LongitudeSpan) -> Self {
        let lat_delta = radius_meters / METERS_PER_DEGREE;
        let lon_delta = longitude_delta(center.latitude, radius_meters, span);

        Self {
            min_lat: center.latitude - lat_delta,
            max_lat: center.latitude + lat_delta,
            min_lon: center.longitude - lon_delta,
            max_lon: center.longitude + lon_delta,
        }
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.min_lat <= latitude
            && latitude <= self.max_lat
            && self.min_lon <= longitude
            && longitude <= self.max_lon
    }
}

fn longitude_delta(center_lat: f64, radius_meters: f64, span: LongitudeSpan) -> f64 {
    let cos_lat = center_lat.to_radians().cos().max(MIN_COS_LATITUDE);
    let divisor = match span {
        LongitudeSpan::SingleCosine => cos_lat,
        LongitudeSpan::DoubleCosine => cos_lat.to_radians().cos(),
    };
    radius_meters / (METERS_PER_DEGREE * divisor)
}

/// Anything carrying a coordinate pair.
pub trait Located {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;
}

impl Located for GeoPoint {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Located for Building {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn latitude(&self) -> f64 {
        (**self).latitude()
    }

    fn longitude(&self) -> f64 {
        (**self).longitude()
    }
}

/// Returns true when `candidate` lies inside the area.
///
/// Callers filtering many candidates should build the box once and use
/// [`filter_by_area`] instead.
pub fn is_within_area<T: Located>(
    center: GeoPoint,
    radius_meters: f64,
    shape: AreaShape,
    candidate: &T,
) -> bool {
    let bbox = BoundingBox::around(center, radius_meters);
    matches_area(&bbox, center, radius_meters, shape, candidate)
}

fn matches_area<T: Located>(
    bbox: &BoundingBox,
    center: GeoPoint,
    radius_meters: f64,
    shape: AreaShape,
    candidate: &T,
) -> bool {
    if !bbox.contains(candidate.latitude(), candidate.longitude()) {
        return false;
    }
    match shape {
        AreaShape::Square => true,
        AreaShape::Circle => {
            haversine_distance(
                center.latitude,
                center.longitude,
                candidate.latitude(),
                candidate.longitude(),
            ) <= radius_meters
        }
    }
}

/// Selects the candidates inside the area, preserving input order.
pub fn filter_by_area<T, I>(
    center: GeoPoint,
    radius_meters: f64,
    shape: AreaShape,
    candidates: I,
) -> Vec<T>
where
    T: Located,
    I: IntoIterator<Item = T>,
{
    filter_by_area_with(
        center,
        radius_meters,
        shape,
        LongitudeSpan::SingleCosine,
        candidates,
    )
}

/// [`filter_by_area`] with an explicit longitude span rule.
pub fn filter_by_area_with<T, I>(
    center: GeoPoint,
    radius_meters: f64,
    shape: AreaShape,
    span: LongitudeSpan,
    candidates: I,
) -> Vec<T>
where
    T: Located,
    I: IntoIterator<Item = T>,
{
    let bbox = BoundingBox::around_with(center, radius_meters, span);
    candidates
        .into_iter()
        .filter(|candidate| matches_area(&bbox, center, radius_meters, shape, candidate))
        .collect()
}

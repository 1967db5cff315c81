use crate::error::ApiError;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use orgcatalog_core::{AreaQuery, AreaShape};
use std::str::FromStr;

/// Query string as decoded key/value pairs, in request order.
pub type QueryPairs = Vec<(String, String)>;

/// Raw area parameters; typed parsing happens in [`AreaParams::into_query`]
/// so every problem surfaces as a 422 detail.
#[derive(Debug, Default)]
pub struct AreaParams {
    lat: Option<String>,
    lon: Option<String>,
    radius: Option<String>,
    shape: Option<String>,
}

impl AreaParams {
    pub fn into_query(self) -> Result<AreaQuery, ApiError> {
        let latitude = required_number("lat", self.lat)?;
        let longitude = required_number("lon", self.lon)?;
        let radius = required_number("radius", self.radius)?;
        let shape = match self.shape {
            Some(raw) => AreaShape::from_str(&raw).map_err(ApiError::Unprocessable)?,
            None => AreaShape::default(),
        };
        Ok(AreaQuery::new(latitude, longitude, radius, shape)?)
    }
}

/// A repeated key keeps its last value; unknown keys are ignored.
impl FromIterator<(String, String)> for AreaParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "lat" => params.lat = Some(value),
                "lon" => params.lon = Some(value),
                "radius" => params.radius = Some(value),
                "shape" => params.shape = Some(value),
                _ => {}
            }
        }
        params
    }
}

#[derive(Debug, Default)]
pub struct NameParams {
    name: Option<String>,
}

/// A repeated `name` keeps its last value.
impl FromIterator<(String, String)> for NameParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let name = pairs
            .into_iter()
            .filter(|(key, _)| key == "name")
            .map(|(_, value)| value)
            .last();
        Self { name }
    }
}

impl NameParams {
    pub fn into_name(self) -> Result<String, ApiError> {
        self.name
            .ok_or_else(|| ApiError::Unprocessable("query parameter `name` is required".into()))
    }
}

pub fn query<T>(params: Result<Query<QueryPairs>, QueryRejection>) -> Result<T, ApiError>
where
    T: FromIterator<(String, String)>,
{
    params
        .map(|Query(pairs)| pairs.into_iter().collect())
        .map_err(|rejection| ApiError::Unprocessable(rejection.body_text()))
}

pub fn path_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    id.map(|Path(inner)| inner)
        .map_err(|rejection| ApiError::Unprocessable(rejection.body_text()))
}

fn required_number(name: &str, raw: Option<String>) -> Result<f64, ApiError> {
    let raw = raw
        .ok_or_else(|| ApiError::Unprocessable(format!("query parameter `{name}` is required")))?;
    let value = raw.trim().parse::<f64>().map_err(|_| {
        ApiError::Unprocessable(format!("query parameter `{name}` must be a number, got `{raw}`"))
    })?;
    if !value.is_finite() {
        return Err(ApiError::Unprocessable(format!(
            "query parameter `{name}` must be finite"
        )));
    }
    Ok(value)
}

use super::params::{query, AreaParams, QueryPairs};
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use orgcatalog_core::Building;

pub async fn nearby(
    State(state): State<AppState>,
    params: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Vec<Building>>, ApiError> {
    let area = query::<AreaParams>(params)?.into_query()?;
    let buildings = state
        .with_catalog(move |catalog| catalog.buildings_nearby(&area))
        .await?;
    Ok(Json(buildings))
}

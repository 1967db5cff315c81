use super::params::path_id;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use orgcatalog_core::OrganizationDetails;

/// Organizations tagged with the category or its descendants (two levels).
pub async fn organizations_in_tree(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<OrganizationDetails>>, ApiError> {
    let business_id = path_id(id)?;
    let found = state
        .with_catalog(move |catalog| catalog.organizations_by_business_tree(business_id))
        .await?;
    Ok(Json(found))
}

use super::params::{path_id, query, AreaParams, NameParams, QueryPairs};
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use orgcatalog_core::OrganizationDetails;

type OrganizationList = Result<Json<Vec<OrganizationDetails>>, ApiError>;

pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<QueryPairs>, QueryRejection>,
) -> OrganizationList {
    let name = query::<NameParams>(params)?.into_name()?;
    let found = state
        .with_catalog(move |catalog| catalog.search_organizations(&name))
        .await?;
    Ok(Json(found))
}

pub async fn nearby(
    State(state): State<AppState>,
    params: Result<Query<QueryPairs>, QueryRejection>,
) -> OrganizationList {
    let area = query::<AreaParams>(params)?.into_query()?;
    let found = state
        .with_catalog(move |catalog| catalog.organizations_nearby(&area))
        .await?;
    Ok(Json(found))
}

pub async fn in_building(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> OrganizationList {
    let building_id = path_id(id)?;
    let found = state
        .with_catalog(move |catalog| catalog.organizations_in_building(building_id))
        .await?;
    Ok(Json(found))
}

pub async fn by_business(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> OrganizationList {
    let business_id = path_id(id)?;
    let found = state
        .with_catalog(move |catalog| catalog.organizations_by_business(business_id))
        .await?;
    Ok(Json(found))
}

pub async fn get_one(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<OrganizationDetails>, ApiError> {
    let organization_id = path_id(id)?;
    let organization = state
        .with_catalog(move |catalog| catalog.organization(organization_id))
        .await?;
    Ok(Json(organization))
}

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::BrandResponseData;
use crate::brand::models::BrandQuery;
use crate::domain::common::Page;
use crate::inbound::http::extractors::ActiveUser;
use crate::inbound::http::extractors::QueryParams;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PageParams;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListBrandsParams {
    skip: Option<i64>,
    limit: Option<i64>,
    search: Option<String>,
    #[serde(default)]
    active_only: bool,
}

pub async fn list_brands(
    State(state): State<AppState>,
    ActiveUser(_caller): ActiveUser,
    QueryParams(params): QueryParams<ListBrandsParams>,
) -> Result<ApiSuccess<Vec<BrandResponseData>>, ApiError> {
    let page = Page::new(params.skip, params.limit)?;
    let query = BrandQuery {
        search: params.search.filter(|s| !s.is_empty()),
        active_only: params.active_only,
    };

    respond(&state, page, query).await
}

pub async fn search_brands(
    State(state): State<AppState>,
    ActiveUser(_caller): ActiveUser,
    Path(term): Path<String>,
    QueryParams(params): QueryParams<PageParams>,
) -> Result<ApiSuccess<Vec<BrandResponseData>>, ApiError> {
    let page = params.page()?;
    let query = BrandQuery {
        search: Some(term),
        active_only: false,
    };

    respond(&state, page, query).await
}

async fn respond(
    state: &AppState,
    page: Page,
    query: BrandQuery,
) -> Result<ApiSuccess<Vec<BrandResponseData>>, ApiError> {
    let brands = state.brand_service.list_brands(page, query).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        brands.iter().map(BrandResponseData::from).collect(),
    ))
}

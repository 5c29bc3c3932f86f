use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ProductResponseData;
use crate::domain::common::Page;
use crate::inbound::http::extractors::ActiveUser;
use crate::inbound::http::extractors::QueryParams;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PageParams;
use crate::inbound::http::router::AppState;
use crate::product::models::ProductQuery;

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsParams {
    skip: Option<i64>,
    limit: Option<i64>,
    category: Option<String>,
    search: Option<String>,
    #[serde(default)]
    active_only: bool,
}

pub async fn list_products(
    State(state): State<AppState>,
    ActiveUser(_caller): ActiveUser,
    QueryParams(params): QueryParams<ListProductsParams>,
) -> Result<ApiSuccess<Vec<ProductResponseData>>, ApiError> {
    let page = Page::new(params.skip, params.limit)?;
    // Empty strings count as absent.
    let query = ProductQuery {
        search: params.search.filter(|s| !s.is_empty()),
        category: params.category.filter(|c| !c.is_empty()),
        active_only: params.active_only,
    };

    respond(&state, page, query).await
}

pub async fn list_by_category(
    State(state): State<AppState>,
    ActiveUser(_caller): ActiveUser,
    Path(category): Path<String>,
    QueryParams(params): QueryParams<PageParams>,
) -> Result<ApiSuccess<Vec<ProductResponseData>>, ApiError> {
    let page = params.page()?;
    let query = ProductQuery {
        category: Some(category),
        ..Default::default()
    };

    respond(&state, page, query).await
}

pub async fn search_products(
    State(state): State<AppState>,
    ActiveUser(_caller): ActiveUser,
    Path(term): Path<String>,
    QueryParams(params): QueryParams<PageParams>,
) -> Result<ApiSuccess<Vec<ProductResponseData>>, ApiError> {
    let page = params.page()?;
    let query = ProductQuery {
        search: Some(term),
        ..Default::default()
    };

    respond(&state, page, query).await
}

async fn respond(
    state: &AppState,
    page: Page,
    query: ProductQuery,
) -> Result<ApiSuccess<Vec<ProductResponseData>>, ApiError> {
    let products = state.product_service.list_products(page, query).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        products.iter().map(ProductResponseData::from).collect(),
    ))
}

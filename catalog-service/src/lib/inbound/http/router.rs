use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::login;
use super::handlers::auth::login_json;
use super::handlers::brands;
use super::handlers::fallback;
use super::handlers::health::health;
use super::handlers::health::root;
use super::handlers::products;
use super::handlers::users;
use super::middleware::auth_gate;
use crate::brand::models::Brand;
use crate::brand::ports::BrandServicePort;
use crate::brand::service::BrandService;
use crate::config::ApiConfig;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::service::AuthService;
use crate::domain::record::Repository;
use crate::domain::user::models::User;
use crate::domain::user::service::UserService;
use crate::product::models::Product;
use crate::product::ports::ProductServicePort;
use crate::product::service::ProductService;
use crate::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub product_service: Arc<dyn ProductServicePort>,
    pub brand_service: Arc<dyn BrandServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub api: Arc<ApiConfig>,
}

impl AppState {
    /// Wire every service over its repository.
    ///
    /// A trailing `/` on the API prefix is dropped so routing and the auth
    /// gate agree on path boundaries.
    pub fn new<UR, PR, BR>(
        user_repository: Arc<UR>,
        product_repository: Arc<PR>,
        brand_repository: Arc<BR>,
        authenticator: Arc<Authenticator>,
        mut api: ApiConfig,
    ) -> Self
    where
        UR: Repository<User>,
        PR: Repository<Product>,
        BR: Repository<Brand>,
    {
        api.prefix = api.prefix.trim_end_matches('/').to_string();

        let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(
            user_repository,
            Arc::clone(&authenticator),
        ));
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_service),
            Arc::clone(&authenticator),
        ));

        Self {
            user_service,
            product_service: Arc::new(ProductService::new(product_repository)),
            brand_service: Arc::new(BrandService::new(brand_repository)),
            auth_service,
            authenticator,
            api: Arc::new(api),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let prefix = state.api.prefix.clone();

    let auth_routes = Router::new()
        .route(&format!("{prefix}/auth/login"), post(login))
        .route(&format!("{prefix}/auth/login-json"), post(login_json));

    // Collection routes answer both with and without the trailing slash.
    let user_routes = Router::new()
        .route(
            &format!("{prefix}/users"),
            get(users::list_users).post(users::create_user),
        )
        .route(
            &format!("{prefix}/users/"),
            get(users::list_users).post(users::create_user),
        )
        .route(&format!("{prefix}/users/me/profile"), get(users::get_profile))
        .route(
            &format!("{prefix}/users/:id"),
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    let product_routes = Router::new()
        .route(
            &format!("{prefix}/products"),
            get(products::list_products).post(products::create_product),
        )
        .route(
            &format!("{prefix}/products/"),
            get(products::list_products).post(products::create_product),
        )
        .route(
            &format!("{prefix}/products/category/:category"),
            get(products::list_by_category),
        )
        .route(
            &format!("{prefix}/products/search/:term"),
            get(products::search_products),
        )
        .route(
            &format!("{prefix}/products/:id"),
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        );

    let brand_routes = Router::new()
        .route(
            &format!("{prefix}/brands"),
            get(brands::list_brands).post(brands::create_brand),
        )
        .route(
            &format!("{prefix}/brands/"),
            get(brands::list_brands).post(brands::create_brand),
        )
        .route(
            &format!("{prefix}/brands/search/:term"),
            get(brands::search_brands),
        )
        .route(
            &format!("{prefix}/brands/:id"),
            get(brands::get_brand)
                .put(brands::update_brand)
                .delete(brands::delete_brand),
        );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes)
        .merge(user_routes)
        .merge(product_routes)
        .merge(brand_routes)
        .fallback(fallback::not_found)
        .method_not_allowed_fallback(fallback::method_not_allowed)
        .layer(middleware::from_fn_with_state(state.clone(), auth_gate))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

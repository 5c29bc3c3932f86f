use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::brand::errors::BrandError;
use crate::domain::auth::errors::AuthError;
use crate::domain::common::Page;
use crate::domain::common::PageError;
use crate::product::errors::ProductError;
use crate::user::errors::UserError;

pub mod auth;
pub mod brands;
pub mod fallback;
pub mod health;
pub mod products;
pub mod users;

/// Successful response: status plus the resource serialized as-is.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// `skip` / `limit` query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn page(&self) -> Result<Page, PageError> {
        Page::new(self.skip, self.limit)
    }
}

const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Detail is logged, never sent to the client.
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    MethodNotAllowed(String),
    /// Answered with a `WWW-Authenticate: Bearer` challenge.
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::MethodNotAllowed(msg) => (StatusCode::METHOD_NOT_ALLOWED, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        let mut response = (status, Json(ApiErrorBody::new(status, message))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

/// Uniform error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ApiErrorBody {
    pub fn new(status: StatusCode, message: String) -> Self {
        Self {
            error: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            message,
            status_code: status.as_u16(),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::NotFoundByUsername(_) => {
                ApiError::NotFound("User not found".to_string())
            }
            UserError::UsernameAlreadyExists(_)
            | UserError::EmailAlreadyExists(_)
            | UserError::Inactive(_) => ApiError::BadRequest(err.to_string()),
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::Password(_) | UserError::Store(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ProductError::NameAlreadyExists(_) => ApiError::BadRequest(err.to_string()),
            ProductError::InvalidName(_)
            | ProductError::InvalidDescription(_)
            | ProductError::InvalidPrice(_)
            | ProductError::InvalidCategory(_)
            | ProductError::InvalidStock(_) => ApiError::UnprocessableEntity(err.to_string()),
            ProductError::Store(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<BrandError> for ApiError {
    fn from(err: BrandError) -> Self {
        match err {
            BrandError::NotFound(_) => ApiError::NotFound(err.to_string()),
            BrandError::NameAlreadyExists(_) => ApiError::BadRequest(err.to_string()),
            BrandError::InvalidName(_) | BrandError::InvalidDescription(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            BrandError::Store(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::Token(_) => ApiError::InternalServerError(err.to_string()),
            AuthError::User(err) => err.into(),
        }
    }
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

use axum::async_trait;
use axum::extract::rejection::FormRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::Query;
use axum::extract::Request;
use axum::http::request::Parts;
use axum::Form;
use axum::Json;

use super::handlers::ApiError;
use super::middleware::CallerIdentity;
use super::router::AppState;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// JSON body whose rejection renders as a 422 error envelope.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::UnprocessableEntity(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// URL-encoded form body, 422 on rejection.
pub struct FormBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FormBody<T>
where
    Form<T>: FromRequest<S, Rejection = FormRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::UnprocessableEntity(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Query string parameters, 422 on rejection.
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::UnprocessableEntity(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// The caller's full, active account.
///
/// Resolved from the identity the gate attached to the request. A valid
/// token can outlive its account's activation, so the account is re-read
/// on every request.
pub struct ActiveUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for ActiveUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<CallerIdentity>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

        let user = match state
            .user_service
            .get_user_by_username(&identity.username)
            .await
        {
            Ok(user) => user,
            Err(UserError::NotFoundByUsername(_)) => {
                return Err(ApiError::Unauthorized(
                    "Could not validate credentials".to_string(),
                ))
            }
            Err(err) => return Err(err.into()),
        };

        if !user.is_active {
            tracing::warn!(username = %user.username, "Inactive user rejected");
            return Err(UserError::Inactive(user.username.to_string()).into());
        }

        Ok(ActiveUser(user))
    }
}

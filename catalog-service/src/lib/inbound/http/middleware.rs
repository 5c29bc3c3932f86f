use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use super::router::AppState;

/// Paths served without a token regardless of prefix.
const PUBLIC_PATHS: &[&str] = &["/health", "/docs", "/redoc", "/openapi.json"];

/// Identity resolved from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub username: String,
}

/// How the gate treats a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Login, health and documentation endpoints.
    Exempt,
    /// Anything else under the versioned prefix.
    Protected,
    /// Outside the versioned prefix.
    Ungated,
}

/// Exact-match classification of `path` against the API `prefix`.
pub fn classify(path: &str, prefix: &str) -> Access {
    if PUBLIC_PATHS.contains(&path) {
        return Access::Exempt;
    }

    let Some(rest) = path.strip_prefix(prefix) else {
        return Access::Ungated;
    };

    match rest {
        "/auth/login" | "/auth/login-json" => Access::Exempt,
        "" => Access::Protected,
        rest if rest.starts_with('/') => Access::Protected,
        // e.g. `/api/v10` under prefix `/api/v1`
        _ => Access::Ungated,
    }
}

/// Token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively; an empty token counts as
/// missing.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Middleware gating every protected path behind a valid bearer token.
///
/// On success the caller's username is attached to the request as a
/// [`CallerIdentity`] extension.
pub async fn auth_gate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if classify(req.uri().path(), &state.api.prefix) != Access::Protected {
        return Ok(next.run(req).await);
    }

    let token = bearer_token(req.headers()).ok_or_else(|| {
        tracing::warn!(path = %req.uri().path(), "Missing bearer token");
        ApiError::Unauthorized("Not authenticated".to_string())
    })?;

    let username = state.authenticator.validate_token(token).ok_or_else(|| {
        tracing::warn!(path = %req.uri().path(), "Invalid or expired token");
        ApiError::Unauthorized("Could not validate credentials".to_string())
    })?;

    req.extensions_mut().insert(CallerIdentity { username });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_classify() {
        let prefix = "/api/v1";

        assert_eq!(classify("/api/v1/auth/login", prefix), Access::Exempt);
        assert_eq!(classify("/api/v1/auth/login-json", prefix), Access::Exempt);
        assert_eq!(classify("/health", prefix), Access::Exempt);
        assert_eq!(classify("/docs", prefix), Access::Exempt);
        assert_eq!(classify("/openapi.json", prefix), Access::Exempt);

        assert_eq!(classify("/api/v1/users/", prefix), Access::Protected);
        assert_eq!(classify("/api/v1/auth/login/", prefix), Access::Protected);
        assert_eq!(classify("/api/v1/auth/me", prefix), Access::Protected);
        assert_eq!(classify("/api/v1", prefix), Access::Protected);

        assert_eq!(classify("/", prefix), Access::Ungated);
        assert_eq!(classify("/api/v10/users", prefix), Access::Ungated);
        assert_eq!(classify("/static/app.js", prefix), Access::Ungated);
    }

    fn headers(authorization: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(authorization).unwrap(),
        );
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("BEARER abc")), Some("abc"));

        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&headers("Bearer   ")), None);
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("abc.def")), None);
    }
}

use super::ApiError;

/// Unmatched path.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}

/// Known path, unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("Method Not Allowed".to_string())
}

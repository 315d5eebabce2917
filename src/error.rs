use crate::models::MessageResponse;
use crate::repositories::RepositoryError;
use crate::services::{AdventureServiceError, AuthServiceError, UserServiceError};
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Everything a request can fail with. Each variant maps to a fixed
/// `{"message": ...}` body; storage detail is logged, never returned.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request")]
    BadRequest,

    #[error("Email in use")]
    EmailInUse,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest | AppError::EmailInUse => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            AppError::BadRequest => "Bad request",
            AppError::EmailInUse => "Email in use",
            AppError::Unauthorized => "Unauthorized",
            AppError::Forbidden => "Forbidden",
            AppError::NotFound => "Not found",
            AppError::Database(_) | AppError::Internal(_) => "Internal server error",
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Database(e) => AppError::Database(e),
            RepositoryError::NotFound => AppError::NotFound,
            RepositoryError::NotOwner => AppError::Forbidden,
            RepositoryError::AlreadyExists => {
                AppError::Internal("unexpected duplicate record".to_string())
            }
        }
    }
}

impl From<UserServiceError> for AppError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::EmailInUse => AppError::EmailInUse,
            UserServiceError::Hashing(e) => AppError::Internal(e.to_string()),
            UserServiceError::RepositoryError(e) => e.into(),
        }
    }
}

impl From<AuthServiceError> for AppError {
    fn from(err: AuthServiceError) -> Self {
        match err {
            AuthServiceError::InvalidCredentials => AppError::Unauthorized,
            AuthServiceError::RepositoryError(e) => e.into(),
        }
    }
}

impl From<AdventureServiceError> for AppError {
    fn from(err: AdventureServiceError) -> Self {
        match err {
            AdventureServiceError::NotFound => AppError::NotFound,
            AdventureServiceError::Forbidden => AppError::Forbidden,
            AdventureServiceError::RepositoryError(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let mut response =
            (status, Json(MessageResponse::new(self.public_message()))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"adventures\", charset=\"UTF-8\""),
            );
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn client_errors_render_fixed_messages() {
        let cases = [
            (AppError::BadRequest, StatusCode::BAD_REQUEST, "Bad request"),
            (AppError::EmailInUse, StatusCode::BAD_REQUEST, "Email in use"),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED, "Unauthorized"),
            (AppError::Forbidden, StatusCode::FORBIDDEN, "Forbidden"),
            (AppError::NotFound, StatusCode::NOT_FOUND, "Not found"),
        ];

        for (err, expected_status, expected_message) in cases {
            let (status, body) = render(err).await;
            assert_eq!(status, expected_status);
            assert_eq!(body, serde_json::json!({ "message": expected_message }));
        }
    }

    #[tokio::test]
    async fn unauthorized_carries_basic_challenge() {
        let response = AppError::Unauthorized.into_response();
        let challenge = response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .expect("challenge header")
            .to_str()
            .unwrap();
        assert!(challenge.starts_with("Basic "));
    }

    #[tokio::test]
    async fn storage_failures_do_not_leak_detail() {
        let (status, body) = render(AppError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn service_errors_map_to_http_semantics() {
        assert!(matches!(
            AppError::from(AdventureServiceError::Forbidden),
            AppError::Forbidden
        ));
        assert!(matches!(
            AppError::from(AuthServiceError::InvalidCredentials),
            AppError::Unauthorized
        ));
        assert!(matches!(
            AppError::from(UserServiceError::EmailInUse),
            AppError::EmailInUse
        ));
    }
}

use crate::error::AppError;
use crate::handlers::parse_json_body;
use crate::models::{MessageResponse, RegisterRequest};
use crate::services::RegisterUser;
use crate::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};

/// POST /register - Create a user from `{email, password}`
pub async fn register_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let request: RegisterRequest = parse_json_body(&body)?.ok_or(AppError::BadRequest)?;

    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(AppError::BadRequest);
    };

    state
        .user_service
        .register(RegisterUser { email, password })
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::ok())))
}

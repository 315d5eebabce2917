use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::handlers::{parse_id, parse_json_body};
use crate::models::{
    AdventureResponse, CreateAdventureRequest, MessageResponse, UpdateAdventureRequest,
};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

/// POST /new - Create an adventure owned by the caller
pub async fn create_adventure_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    body: Bytes,
) -> Result<(StatusCode, Json<AdventureResponse>), AppError> {
    let request: CreateAdventureRequest = parse_json_body(&body)?.ok_or(AppError::BadRequest)?;

    let (Some(title), Some(description)) = (request.title, request.description) else {
        return Err(AppError::BadRequest);
    };

    let adventure = state
        .adventure_service
        .create(&user, &title, &description)
        .await?;

    Ok((StatusCode::CREATED, Json(adventure.into())))
}

/// GET /ads - Every adventure with its owner's email
pub async fn list_adventures_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<AdventureResponse>>, AppError> {
    let adventures = state.adventure_service.list().await?;
    Ok(Json(adventures.into_iter().map(Into::into).collect()))
}

/// GET /ads/{id}
pub async fn get_adventure_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AdventureResponse>, AppError> {
    let id = parse_id(&id)?;
    let adventure = state.adventure_service.get(id).await?;
    Ok(Json(adventure.into()))
}

/// PUT /update/{id} - Overwrite only the fields present in the body
pub async fn update_adventure_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<AdventureResponse>, AppError> {
    let id = parse_id(&id)?;
    let patch: UpdateAdventureRequest = parse_json_body(&body)?.unwrap_or_default();

    let adventure = state.adventure_service.update(id, &user, patch).await?;
    Ok(Json(adventure.into()))
}

/// DELETE /delete/{id}
pub async fn delete_adventure_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    state.adventure_service.delete(id, &user).await?;
    Ok(Json(MessageResponse::ok()))
}

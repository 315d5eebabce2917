use crate::{error::AppError, models::User, services::Credentials, AppState};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// The user resolved from the request's Basic credentials. Lives only in
/// that request's extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Extract `email:password` from an `Authorization: Basic ...` header.
///
/// The scheme name is matched case-insensitively (RFC 7617). The decoded
/// payload is split on the first `:` only, so passwords may contain colons.
/// Anything missing or malformed is `Unauthorized`.
pub fn parse_basic_credentials(headers: &HeaderMap) -> Result<Credentials, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AppError::Unauthorized)?
        .to_str()
        .map_err(|_| AppError::Unauthorized)?;

    let (scheme, encoded) = auth_header
        .trim()
        .split_once(' ')
        .ok_or(AppError::Unauthorized)?;

    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(AppError::Unauthorized);
    }

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AppError::Unauthorized)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AppError::Unauthorized)?;

    let (email, password) = decoded.split_once(':').ok_or(AppError::Unauthorized)?;

    Ok(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Per-request Basic Auth: verifies credentials against the user store and
/// attaches [`AuthenticatedUser`] for downstream handlers.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let credentials = parse_basic_credentials(request.headers())?;

    let user = match state.auth_service.authenticate(&credentials).await {
        Ok(user) => user,
        Err(err) => {
            tracing::warn!(email = %credentials.email, "rejected basic auth: {}", err);
            return Err(err.into());
        }
    };

    request.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(request).await)
}

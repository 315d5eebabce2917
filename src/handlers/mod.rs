pub mod adventure_handlers;
pub mod user_handlers;

pub use adventure_handlers::{
    create_adventure_handler, delete_adventure_handler, get_adventure_handler,
    list_adventures_handler, update_adventure_handler,
};
pub use user_handlers::register_handler;

use crate::error::AppError;
use axum::body::Bytes;
use serde::de::DeserializeOwned;

/// Decode a JSON request body without insisting on a `Content-Type`.
///
/// An empty (or whitespace-only) body and a literal `null` are `Ok(None)`;
/// malformed JSON or a body of the wrong shape is `BadRequest`.
pub(crate) fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> Result<Option<T>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice::<Option<T>>(body).map_err(|_| AppError::BadRequest)
}

/// Path ids that are not integers cannot name an existing resource.
pub(crate) fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim().parse::<i64>().map_err(|_| AppError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UpdateAdventureRequest;

    #[test]
    fn empty_body_is_none() {
        let parsed: Option<UpdateAdventureRequest> =
            parse_json_body(&Bytes::from_static(b"  \n")).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn null_body_is_none() {
        let parsed: Option<UpdateAdventureRequest> =
            parse_json_body(&Bytes::from_static(b" null ")).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn malformed_body_is_bad_request() {
        let result: Result<Option<UpdateAdventureRequest>, _> =
            parse_json_body(&Bytes::from_static(b"{not json"));
        assert!(matches!(result, Err(AppError::BadRequest)));

        let result: Result<Option<UpdateAdventureRequest>, _> =
            parse_json_body(&Bytes::from_static(b"[1, 2]"));
        assert!(matches!(result, Err(AppError::BadRequest)));
    }

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(AppError::NotFound)));
    }
}

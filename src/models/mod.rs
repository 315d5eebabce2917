pub mod adventure;
pub mod user;

pub use adventure::{
    Adventure, AdventureResponse, CreateAdventureRequest, UpdateAdventureRequest,
};
pub use user::{RegisterRequest, User};

use serde::{Deserialize, Serialize};

/// `{"message": "..."}` body used for acknowledgements and errors alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn ok() -> Self {
        Self::new("OK")
    }
}

pub mod basic;

pub use basic::{parse_basic_credentials, require_basic_auth, AuthenticatedUser};

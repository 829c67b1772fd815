pub mod account;
pub mod display_name;
pub mod email;
pub mod password;
pub mod profile;
pub mod reset_token;
pub mod role;

use thiserror::Error;

/// Validation failures raised by the domain newtype constructors.
///
/// These surface at the HTTP boundary as 400 responses; no use case is ever
/// invoked with a value that failed to parse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("must be a valid email address")]
    InvalidEmail,
    #[error("password cannot be empty")]
    EmptyPassword,
    #[error("password must be at least 6 characters and contain a number")]
    WeakPassword,
    #[error("name must be between 2 and 100 characters")]
    InvalidName,
    #[error("role must be either patient, caregiver, or admin")]
    InvalidRole,
}

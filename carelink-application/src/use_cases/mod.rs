pub mod change_password;
pub mod confirm_password_reset;
pub mod get_current_user;
pub mod list_accounts;
pub mod login;
pub mod refresh;
pub mod register;
pub mod request_password_reset;
pub mod set_account_status;
pub mod update_profile;

use carelink_core::AccountWithProfile;

/// Result of an operation that establishes a session: the sanitized account
/// with its profile, plus a fresh access/refresh token pair.
#[derive(Debug)]
pub struct IssuedSession {
    pub account: AccountWithProfile,
    pub access_token: String,
    pub refresh_token: String,
}

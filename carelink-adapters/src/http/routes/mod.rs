pub mod error;

mod account_status;
mod change_password;
mod deactivate_account;
mod forgot_password;
mod get_account;
mod list_accounts;
mod login;
mod logout;
mod me;
mod refresh;
mod register;
mod reset_password;
mod update_account;

pub use account_status::account_status;
pub use change_password::change_password;
pub use deactivate_account::deactivate_account;
pub use forgot_password::forgot_password;
pub use get_account::get_account;
pub use list_accounts::list_accounts;
pub use login::login;
pub use logout::logout;
pub use me::me;
pub use refresh::refresh;
pub use register::register;
pub use reset_password::reset_password;
pub use update_account::update_account;

use serde::Serialize;

use carelink_core::AccountWithProfile;

/// Response for operations that establish a session.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub account: AccountWithProfile,
    pub access_token: String,
    pub refresh_token: String,
}

/// Plain acknowledgment body.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

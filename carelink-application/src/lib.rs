pub mod use_cases;

// Re-export the use cases and their error types for the adapter layer
pub use use_cases::{
    IssuedSession,
    change_password::{ChangePasswordError, ChangePasswordUseCase},
    confirm_password_reset::{ConfirmPasswordResetError, ConfirmPasswordResetUseCase},
    get_current_user::{GetCurrentUserError, GetCurrentUserUseCase},
    list_accounts::{ListAccountsError, ListAccountsUseCase},
    login::{LoginError, LoginUseCase},
    refresh::{RefreshError, RefreshUseCase},
    register::{NewRegistration, RegisterError, RegisterUseCase},
    request_password_reset::{RequestPasswordResetError, RequestPasswordResetUseCase},
    set_account_status::{SetAccountStatusError, SetAccountStatusUseCase},
    update_profile::{UpdateProfileError, UpdateProfileUseCase},
};

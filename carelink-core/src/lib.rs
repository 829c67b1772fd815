pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    ValidationError,
    account::{Account, AccountFilter, AccountWithProfile, NewAccount, StoredCredentials},
    display_name::DisplayName,
    email::Email,
    password::{HashedPassword, Password},
    profile::{CaregiverProfile, NewRoleProfile, PatientProfile, ProfileChanges, RoleProfile},
    reset_token::ResetToken,
    role::Role,
};

pub use ports::{
    repositories::{AccountStore, AccountStoreError, ResetTokenStore, ResetTokenStoreError},
    services::{
        AccessClaims, CredentialHasher, CredentialHasherError, EmailClient, RefreshClaims,
        TokenError, TokenIssuer,
    },
};

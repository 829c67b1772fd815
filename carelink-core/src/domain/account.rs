use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{
    email::Email,
    password::HashedPassword,
    profile::RoleProfile,
    role::Role,
};

/// The identity record, as returned to anything outside the stores.
/// Deliberately hash-free; see [`StoredCredentials`] for the verification
/// projection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub email: Email,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An account together with its role profile, the shape most read paths
/// return. `profile` is `None` exactly when the role is admin.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountWithProfile {
    #[serde(flatten)]
    pub account: Account,
    pub profile: Option<RoleProfile>,
}

/// The single projection that carries the password hash, used only to verify
/// a presented credential. Never serialized.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub account: Account,
    pub password_hash: HashedPassword,
}

/// Fields for a new account row. The password arrives already hashed: the
/// auth service, not the store, decides when hashing happens.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: Email,
    pub password_hash: HashedPassword,
    pub role: Role,
}

/// Filter for the admin account listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountFilter {
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

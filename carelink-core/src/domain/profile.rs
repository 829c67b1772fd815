use chrono::NaiveDate;
use serde::Serialize;

use super::{display_name::DisplayName, email::Email};

/// Role-specific profile attached to an account. Exactly one variant exists
/// per patient or caregiver account; admin accounts carry no profile.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RoleProfile {
    Patient(PatientProfile),
    Caregiver(CaregiverProfile),
}

impl RoleProfile {
    pub fn name(&self) -> &DisplayName {
        match self {
            RoleProfile::Patient(profile) => &profile.name,
            RoleProfile::Caregiver(profile) => &profile.name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub name: DisplayName,
    pub date_of_birth: Option<NaiveDate>,
    pub diagnosis_date: Option<NaiveDate>,
    pub diagnosis_type: Option<String>,
    pub profile_photo: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaregiverProfile {
    pub name: DisplayName,
    pub phone: Option<String>,
    pub relationship: Option<String>,
}

/// Profile data handed to `AccountStore::create_with_profile`, keyed by the
/// role the account is being created with. The store dispatches on the tag.
#[derive(Debug, Clone)]
pub enum NewRoleProfile {
    Patient {
        name: DisplayName,
        date_of_birth: Option<NaiveDate>,
    },
    Caregiver {
        name: DisplayName,
        phone: Option<String>,
    },
    Admin,
}

/// Field-level changes applied by `AccountStore::update_profile`.
///
/// Fields that do not apply to the account's role are ignored, mirroring the
/// partial-update semantics of the profile endpoint.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub email: Option<Email>,
    pub name: Option<DisplayName>,
    pub date_of_birth: Option<NaiveDate>,
    pub diagnosis_date: Option<NaiveDate>,
    pub diagnosis_type: Option<String>,
    pub profile_photo: Option<String>,
    pub phone: Option<String>,
    pub relationship: Option<String>,
}

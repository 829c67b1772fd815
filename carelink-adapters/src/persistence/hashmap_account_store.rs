use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use carelink_core::{
    Account, AccountFilter, AccountStore, AccountStoreError, AccountWithProfile, CaregiverProfile,
    Email, HashedPassword, NewAccount, NewRoleProfile, PatientProfile, ProfileChanges, Role,
    RoleProfile, StoredCredentials,
};

/// In-memory account store backing tests and local development. The single
/// `RwLock` over the whole map gives it the same all-or-nothing behavior the
/// Postgres transactions provide.
#[derive(Clone, Default)]
pub struct HashMapAccountStore {
    accounts: Arc<RwLock<HashMap<Uuid, StoredEntry>>>,
}

struct StoredEntry {
    account: Account,
    password_hash: HashedPassword,
    profile: Option<RoleProfile>,
}

impl HashMapAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for HashMapAccountStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|entry| &entry.account.email == email)
            .map(|entry| entry.account.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).map(|entry| entry.account.clone()))
    }

    async fn find_with_profile(
        &self,
        id: Uuid,
    ) -> Result<Option<AccountWithProfile>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).map(|entry| AccountWithProfile {
            account: entry.account.clone(),
            profile: entry.profile.clone(),
        }))
    }

    async fn credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|entry| &entry.account.email == email)
            .map(|entry| StoredCredentials {
                account: entry.account.clone(),
                password_hash: entry.password_hash.clone(),
            }))
    }

    async fn create_with_profile(
        &self,
        account: NewAccount,
        profile: NewRoleProfile,
    ) -> Result<AccountWithProfile, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts
            .values()
            .any(|entry| entry.account.email == account.email)
        {
            return Err(AccountStoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let created = Account {
            id: Uuid::new_v4(),
            email: account.email,
            role: account.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created_profile = match profile {
            NewRoleProfile::Patient {
                name,
                date_of_birth,
            } => Some(RoleProfile::Patient(PatientProfile {
                name,
                date_of_birth,
                diagnosis_date: None,
                diagnosis_type: None,
                profile_photo: None,
            })),
            NewRoleProfile::Caregiver { name, phone } => {
                Some(RoleProfile::Caregiver(CaregiverProfile {
                    name,
                    phone,
                    relationship: None,
                }))
            }
            NewRoleProfile::Admin => None,
        };

        accounts.insert(
            created.id,
            StoredEntry {
                account: created.clone(),
                password_hash: account.password_hash,
                profile: created_profile.clone(),
            },
        );

        Ok(AccountWithProfile {
            account: created,
            profile: created_profile,
        })
    }

    async fn update_email(&self, id: Uuid, email: Email) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts
            .values()
            .any(|entry| entry.account.email == email && entry.account.id != id)
        {
            return Err(AccountStoreError::DuplicateEmail);
        }
        let entry = accounts
            .get_mut(&id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        entry.account.email = email;
        entry.account.updated_at = Utc::now();
        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: HashedPassword,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let entry = accounts
            .get_mut(&id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        entry.password_hash = password_hash;
        entry.account.updated_at = Utc::now();
        Ok(())
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Account, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let entry = accounts
            .get_mut(&id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        entry.account.is_active = is_active;
        entry.account.updated_at = Utc::now();
        Ok(entry.account.clone())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<AccountWithProfile, AccountStoreError> {
        let mut accounts = self.accounts.write().await;

        if let Some(email) = &changes.email {
            if accounts
                .values()
                .any(|entry| &entry.account.email == email && entry.account.id != id)
            {
                return Err(AccountStoreError::DuplicateEmail);
            }
        }

        let entry = accounts
            .get_mut(&id)
            .ok_or(AccountStoreError::AccountNotFound)?;

        if let Some(email) = changes.email {
            entry.account.email = email;
        }

        match &mut entry.profile {
            Some(RoleProfile::Patient(profile)) => {
                if let Some(name) = changes.name {
                    profile.name = name;
                }
                if let Some(date_of_birth) = changes.date_of_birth {
                    profile.date_of_birth = Some(date_of_birth);
                }
                if let Some(diagnosis_date) = changes.diagnosis_date {
                    profile.diagnosis_date = Some(diagnosis_date);
                }
                if let Some(diagnosis_type) = changes.diagnosis_type {
                    profile.diagnosis_type = Some(diagnosis_type);
                }
                if let Some(profile_photo) = changes.profile_photo {
                    profile.profile_photo = Some(profile_photo);
                }
            }
            Some(RoleProfile::Caregiver(profile)) => {
                if let Some(name) = changes.name {
                    profile.name = name;
                }
                if let Some(phone) = changes.phone {
                    profile.phone = Some(phone);
                }
                if let Some(relationship) = changes.relationship {
                    profile.relationship = Some(relationship);
                }
            }
            None => {}
        }

        entry.account.updated_at = Utc::now();

        Ok(AccountWithProfile {
            account: entry.account.clone(),
            profile: entry.profile.clone(),
        })
    }

    async fn list_all(
        &self,
        filter: AccountFilter,
    ) -> Result<Vec<AccountWithProfile>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        let mut matching: Vec<AccountWithProfile> = accounts
            .values()
            .filter(|entry| {
                filter
                    .role
                    .is_none_or(|role| entry.account.role == role)
                    && filter
                        .is_active
                        .is_none_or(|is_active| entry.account.is_active == is_active)
            })
            .map(|entry| AccountWithProfile {
                account: entry.account.clone(),
                profile: entry.profile.clone(),
            })
            .collect();
        matching.sort_by(|a, b| b.account.created_at.cmp(&a.account.created_at));
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use carelink_core::DisplayName;

    async fn create(
        store: &HashMapAccountStore,
        email: &str,
        role: Role,
    ) -> AccountWithProfile {
        let profile = match role {
            Role::Patient => NewRoleProfile::Patient {
                name: DisplayName::try_from("Test User").unwrap(),
                date_of_birth: None,
            },
            Role::Caregiver => NewRoleProfile::Caregiver {
                name: DisplayName::try_from("Test User").unwrap(),
                phone: None,
            },
            Role::Admin => NewRoleProfile::Admin,
        };
        store
            .create_with_profile(
                NewAccount {
                    email: Email::try_from(email).unwrap(),
                    password_hash: HashedPassword::new("hash".to_string()),
                    role,
                },
                profile,
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = HashMapAccountStore::new();
        create(&store, "a@x.com", Role::Patient).await;

        let result = store
            .create_with_profile(
                NewAccount {
                    email: Email::try_from("a@x.com").unwrap(),
                    password_hash: HashedPassword::new("hash".to_string()),
                    role: Role::Caregiver,
                },
                NewRoleProfile::Admin,
            )
            .await;

        assert!(matches!(result, Err(AccountStoreError::DuplicateEmail)));
        assert_eq!(store.accounts.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_profile_variant_follows_role() {
        let store = HashMapAccountStore::new();
        let patient = create(&store, "p@x.com", Role::Patient).await;
        let caregiver = create(&store, "c@x.com", Role::Caregiver).await;
        let admin = create(&store, "admin@x.com", Role::Admin).await;

        assert!(matches!(patient.profile, Some(RoleProfile::Patient(_))));
        assert!(matches!(caregiver.profile, Some(RoleProfile::Caregiver(_))));
        assert!(admin.profile.is_none());
    }

    #[tokio::test]
    async fn test_update_email_enforces_uniqueness() {
        let store = HashMapAccountStore::new();
        create(&store, "a@x.com", Role::Patient).await;
        let other = create(&store, "b@x.com", Role::Patient).await;

        let taken = store
            .update_email(other.account.id, Email::try_from("a@x.com").unwrap())
            .await;
        assert!(matches!(taken, Err(AccountStoreError::DuplicateEmail)));

        store
            .update_email(other.account.id, Email::try_from("c@x.com").unwrap())
            .await
            .unwrap();
        let found = store
            .find_by_email(&Email::try_from("c@x.com").unwrap())
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, other.account.id);
    }

    #[tokio::test]
    async fn test_update_profile_rejects_taken_email() {
        let store = HashMapAccountStore::new();
        create(&store, "a@x.com", Role::Patient).await;
        let other = create(&store, "b@x.com", Role::Patient).await;

        let result = store
            .update_profile(
                other.account.id,
                ProfileChanges {
                    email: Some(Email::try_from("a@x.com").unwrap()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AccountStoreError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_update_profile_applies_role_fields() {
        let store = HashMapAccountStore::new();
        let created = create(&store, "a@x.com", Role::Caregiver).await;

        let updated = store
            .update_profile(
                created.account.id,
                ProfileChanges {
                    phone: Some("555-0100".to_string()),
                    relationship: Some("daughter".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        match updated.profile {
            Some(RoleProfile::Caregiver(profile)) => {
                assert_eq!(profile.phone.as_deref(), Some("555-0100"));
                assert_eq!(profile.relationship.as_deref(), Some("daughter"));
            }
            other => panic!("expected caregiver profile, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_all_filters_by_role_and_status() {
        let store = HashMapAccountStore::new();
        let patient = create(&store, "p@x.com", Role::Patient).await;
        create(&store, "c@x.com", Role::Caregiver).await;
        store.set_active(patient.account.id, false).await.unwrap();

        let inactive_patients = store
            .list_all(AccountFilter {
                role: Some(Role::Patient),
                is_active: Some(false),
            })
            .await
            .unwrap();
        assert_eq!(inactive_patients.len(), 1);
        assert_eq!(inactive_patients[0].account.id, patient.account.id);

        let active = store
            .list_all(AccountFilter {
                role: None,
                is_active: Some(true),
            })
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
    }

    #[tokio::test]
    async fn test_password_hash_round_trip_via_credentials() {
        let store = HashMapAccountStore::new();
        let created = create(&store, "a@x.com", Role::Patient).await;

        store
            .update_password_hash(created.account.id, HashedPassword::new("new-hash".to_string()))
            .await
            .unwrap();

        let credentials = store
            .credentials_by_email(&Email::try_from("a@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(credentials.password_hash.expose(), "new-hash");
    }

}

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use carelink_core::{
    Account, AccountFilter, AccountStore, AccountStoreError, AccountWithProfile, CaregiverProfile,
    DisplayName, Email, HashedPassword, NewAccount, NewRoleProfile, PatientProfile,
    ProfileChanges, Role, RoleProfile, StoredCredentials,
};

const ACCOUNT_COLUMNS: &str = "id, email, role, is_active, created_at, updated_at";

pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_profile(
        &self,
        role: Role,
        account_id: Uuid,
    ) -> Result<Option<RoleProfile>, AccountStoreError> {
        match role {
            Role::Patient => {
                let row: Option<PatientProfileRow> = sqlx::query_as(
                    "SELECT name, date_of_birth, diagnosis_date, diagnosis_type, profile_photo \
                     FROM patient_profiles WHERE account_id = $1",
                )
                .bind(account_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(unexpected)?;
                row.map(PatientProfileRow::into_profile).transpose()
            }
            Role::Caregiver => {
                let row: Option<CaregiverProfileRow> = sqlx::query_as(
                    "SELECT name, phone, relationship \
                     FROM caregiver_profiles WHERE account_id = $1",
                )
                .bind(account_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(unexpected)?;
                row.map(CaregiverProfileRow::into_profile).transpose()
            }
            Role::Admin => Ok(None),
        }
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Finding account by email", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.map(AccountRow::into_account).transpose()
    }

    #[tracing::instrument(name = "Finding account by id", skip_all)]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountStoreError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.map(AccountRow::into_account).transpose()
    }

    #[tracing::instrument(name = "Finding account with profile", skip_all)]
    async fn find_with_profile(
        &self,
        id: Uuid,
    ) -> Result<Option<AccountWithProfile>, AccountStoreError> {
        let Some(account) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let profile = self.load_profile(account.role, account.id).await?;
        Ok(Some(AccountWithProfile { account, profile }))
    }

    #[tracing::instrument(name = "Loading credentials by email", skip_all)]
    async fn credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, AccountStoreError> {
        let row: Option<CredentialsRow> = sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS}, password_hash FROM accounts WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.map(CredentialsRow::into_credentials).transpose()
    }

    #[tracing::instrument(name = "Creating account with profile", skip_all)]
    async fn create_with_profile(
        &self,
        account: NewAccount,
        profile: NewRoleProfile,
    ) -> Result<AccountWithProfile, AccountStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let row: AccountRow = sqlx::query_as(&format!(
            "INSERT INTO accounts (id, email, password_hash, role) \
             VALUES ($1, $2, $3, $4) RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(account.email.as_str())
        .bind(account.password_hash.expose())
        .bind(account.role.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(constraint_or_unexpected)?;

        let created = row.into_account()?;

        let created_profile = match profile {
            NewRoleProfile::Patient {
                name,
                date_of_birth,
            } => {
                sqlx::query(
                    "INSERT INTO patient_profiles (id, account_id, name, date_of_birth) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(Uuid::new_v4())
                .bind(created.id)
                .bind(name.as_str())
                .bind(date_of_birth)
                .execute(&mut *tx)
                .await
                .map_err(constraint_or_unexpected)?;

                Some(RoleProfile::Patient(PatientProfile {
                    name,
                    date_of_birth,
                    diagnosis_date: None,
                    diagnosis_type: None,
                    profile_photo: None,
                }))
            }
            NewRoleProfile::Caregiver { name, phone } => {
                sqlx::query(
                    "INSERT INTO caregiver_profiles (id, account_id, name, phone) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(Uuid::new_v4())
                .bind(created.id)
                .bind(name.as_str())
                .bind(phone.as_deref())
                .execute(&mut *tx)
                .await
                .map_err(constraint_or_unexpected)?;

                Some(RoleProfile::Caregiver(CaregiverProfile {
                    name,
                    phone,
                    relationship: None,
                }))
            }
            NewRoleProfile::Admin => None,
        };

        tx.commit().await.map_err(unexpected)?;

        Ok(AccountWithProfile {
            account: created,
            profile: created_profile,
        })
    }

    #[tracing::instrument(name = "Updating account email", skip_all)]
    async fn update_email(&self, id: Uuid, email: Email) -> Result<(), AccountStoreError> {
        let result = sqlx::query(
            "UPDATE accounts SET email = $1, updated_at = now() WHERE id = $2",
        )
        .bind(email.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(constraint_or_unexpected)?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Updating password hash", skip_all)]
    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: HashedPassword,
    ) -> Result<(), AccountStoreError> {
        let result = sqlx::query(
            "UPDATE accounts SET password_hash = $1, updated_at = now() WHERE id = $2",
        )
        .bind(password_hash.expose())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Setting account active flag", skip_all)]
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Account, AccountStoreError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "UPDATE accounts SET is_active = $1, updated_at = now() \
             WHERE id = $2 RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.ok_or(AccountStoreError::AccountNotFound)?.into_account()
    }

    #[tracing::instrument(name = "Updating account profile", skip_all)]
    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<AccountWithProfile, AccountStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(unexpected)?;

        let account = row.ok_or(AccountStoreError::AccountNotFound)?.into_account()?;

        if let Some(email) = &changes.email {
            if email != &account.email {
                sqlx::query("UPDATE accounts SET email = $1, updated_at = now() WHERE id = $2")
                    .bind(email.as_str())
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(constraint_or_unexpected)?;
            }
        }

        match account.role {
            Role::Patient => {
                sqlx::query(
                    "UPDATE patient_profiles SET \
                         name = COALESCE($2, name), \
                         date_of_birth = COALESCE($3, date_of_birth), \
                         diagnosis_date = COALESCE($4, diagnosis_date), \
                         diagnosis_type = COALESCE($5, diagnosis_type), \
                         profile_photo = COALESCE($6, profile_photo), \
                         updated_at = now() \
                     WHERE account_id = $1",
                )
                .bind(id)
                .bind(changes.name.as_ref().map(|name| name.as_str().to_owned()))
                .bind(changes.date_of_birth)
                .bind(changes.diagnosis_date)
                .bind(changes.diagnosis_type.clone())
                .bind(changes.profile_photo.clone())
                .execute(&mut *tx)
                .await
                .map_err(unexpected)?;
            }
            Role::Caregiver => {
                sqlx::query(
                    "UPDATE caregiver_profiles SET \
                         name = COALESCE($2, name), \
                         phone = COALESCE($3, phone), \
                         relationship = COALESCE($4, relationship), \
                         updated_at = now() \
                     WHERE account_id = $1",
                )
                .bind(id)
                .bind(changes.name.as_ref().map(|name| name.as_str().to_owned()))
                .bind(changes.phone.clone())
                .bind(changes.relationship.clone())
                .execute(&mut *tx)
                .await
                .map_err(unexpected)?;
            }
            Role::Admin => {}
        }

        tx.commit().await.map_err(unexpected)?;

        self.find_with_profile(id)
            .await?
            .ok_or(AccountStoreError::AccountNotFound)
    }

    #[tracing::instrument(name = "Listing accounts", skip_all)]
    async fn list_all(
        &self,
        filter: AccountFilter,
    ) -> Result<Vec<AccountWithProfile>, AccountStoreError> {
        let rows: Vec<AccountRow> = match (filter.role, filter.is_active) {
            (Some(role), Some(is_active)) => {
                sqlx::query_as(&format!(
                    "SELECT {ACCOUNT_COLUMNS} FROM accounts \
                     WHERE role = $1 AND is_active = $2 ORDER BY created_at DESC"
                ))
                .bind(role.as_str())
                .bind(is_active)
                .fetch_all(&self.pool)
                .await
            }
            (Some(role), None) => {
                sqlx::query_as(&format!(
                    "SELECT {ACCOUNT_COLUMNS} FROM accounts \
                     WHERE role = $1 ORDER BY created_at DESC"
                ))
                .bind(role.as_str())
                .fetch_all(&self.pool)
                .await
            }
            (None, Some(is_active)) => {
                sqlx::query_as(&format!(
                    "SELECT {ACCOUNT_COLUMNS} FROM accounts \
                     WHERE is_active = $1 ORDER BY created_at DESC"
                ))
                .bind(is_active)
                .fetch_all(&self.pool)
                .await
            }
            (None, None) => {
                sqlx::query_as(&format!(
                    "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(unexpected)?;

        let mut accounts = Vec::with_capacity(rows.len());
        for row in rows {
            let account = row.into_account()?;
            let profile = self.load_profile(account.role, account.id).await?;
            accounts.push(AccountWithProfile { account, profile });
        }
        Ok(accounts)
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> Result<Account, AccountStoreError> {
        let role = self
            .role
            .parse::<Role>()
            .map_err(|_| AccountStoreError::Unexpected(format!("unknown role {:?}", self.role)))?;
        let email = Email::try_from(self.email)
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;
        Ok(Account {
            id: self.id,
            email,
            role,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct CredentialsRow {
    id: Uuid,
    email: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    password_hash: String,
}

impl CredentialsRow {
    fn into_credentials(self) -> Result<StoredCredentials, AccountStoreError> {
        let password_hash = HashedPassword::new(self.password_hash);
        let account = AccountRow {
            id: self.id,
            email: self.email,
            role: self.role,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_account()?;
        Ok(StoredCredentials {
            account,
            password_hash,
        })
    }
}

#[derive(Debug, FromRow)]
struct PatientProfileRow {
    name: String,
    date_of_birth: Option<NaiveDate>,
    diagnosis_date: Option<NaiveDate>,
    diagnosis_type: Option<String>,
    profile_photo: Option<String>,
}

impl PatientProfileRow {
    fn into_profile(self) -> Result<RoleProfile, AccountStoreError> {
        let name = DisplayName::try_from(self.name)
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;
        Ok(RoleProfile::Patient(PatientProfile {
            name,
            date_of_birth: self.date_of_birth,
            diagnosis_date: self.diagnosis_date,
            diagnosis_type: self.diagnosis_type,
            profile_photo: self.profile_photo,
        }))
    }
}

#[derive(Debug, FromRow)]
struct CaregiverProfileRow {
    name: String,
    phone: Option<String>,
    relationship: Option<String>,
}

impl CaregiverProfileRow {
    fn into_profile(self) -> Result<RoleProfile, AccountStoreError> {
        let name = DisplayName::try_from(self.name)
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;
        Ok(RoleProfile::Caregiver(CaregiverProfile {
            name,
            phone: self.phone,
            relationship: self.relationship,
        }))
    }
}

fn unexpected(error: sqlx::Error) -> AccountStoreError {
    AccountStoreError::Unexpected(error.to_string())
}

/// Map unique-constraint violations to `DuplicateEmail`, the way a duplicate
/// insert or email change surfaces to callers.
fn constraint_or_unexpected(error: sqlx::Error) -> AccountStoreError {
    if let Some(db_err) = error.as_database_error() {
        if db_err.constraint().is_some() {
            return AccountStoreError::DuplicateEmail;
        }
    }
    AccountStoreError::Unexpected(error.to_string())
}

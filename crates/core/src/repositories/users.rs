//! User accounts and profile storage.
//!
//! Users follow the same sharded JSON layout as reports, under
//! `<data_dir>/users/`. Email uniqueness is enforced with a listing scan at
//! registration time; the store is flat files, not an indexed database, and
//! the account count this service is built for keeps that scan cheap.

use crate::config::CoreConfig;
use crate::constants::USER_FILE_NAME;
use crate::error::{ReportError, ReportResult};
use crate::repositories::shared::{collect_records, read_json_record, write_json_record};
use crate::uuid::ShardableUuid;
use cardioscan_types::{EmailAddress, NonEmptyText};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A stored user account.
///
/// `password_hash` is an argon2 PHC string; the plaintext password never
/// reaches this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: ShardableUuid,
    pub email: EmailAddress,
    pub password_hash: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for registering a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
    pub name: NonEmptyText,
}

/// A partial profile update; only present fields are touched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub hospital: Option<String>,
    pub phone: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.specialty.is_none()
            && self.hospital.is_none()
            && self.phone.is_none()
    }
}

/// Role granted to every registered account.
pub const DEFAULT_ROLE: &str = "clinician";

/// Pure user data operations - no API concerns.
#[derive(Clone)]
pub struct UserService {
    cfg: Arc<CoreConfig>,
}

impl UserService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::DuplicateEmail` if an account already exists for
    /// the (normalised) email address, or a storage error if the record
    /// cannot be written.
    pub fn create(&self, new_user: NewUser) -> ReportResult<User> {
        if self.find_by_email(&new_user.email).is_some() {
            return Err(ReportError::DuplicateEmail);
        }

        let id = ShardableUuid::new();
        let user = User {
            id: id.clone(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            name: new_user.name.into_inner(),
            specialty: None,
            hospital: None,
            phone: None,
            roles: vec![DEFAULT_ROLE.to_owned()],
            created_at: Utc::now(),
        };

        let record_dir = id.sharded_dir(&self.cfg.users_dir());
        write_json_record(&record_dir, USER_FILE_NAME, &user)?;

        tracing::info!("registered user {id}");
        Ok(user)
    }

    /// Looks an account up by normalised email address.
    pub fn find_by_email(&self, email: &EmailAddress) -> Option<User> {
        collect_records::<User>(&self.cfg.users_dir(), USER_FILE_NAME)
            .into_iter()
            .find(|user| user.email == *email)
    }

    /// Loads one account by its identifier.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::UserNotFound` if no document exists for `id`.
    pub fn get(&self, id: &ShardableUuid) -> ReportResult<User> {
        let path = id.sharded_dir(&self.cfg.users_dir()).join(USER_FILE_NAME);
        if !path.is_file() {
            return Err(ReportError::UserNotFound);
        }
        read_json_record(&path)
    }

    /// Applies a partial profile update and returns the stored result.
    ///
    /// Fields absent from `update` keep their current values; a present but
    /// empty string clears the optional field.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::UserNotFound` for an unknown id,
    /// `ReportError::InvalidInput` when the update would blank the display
    /// name, or a storage error if the record cannot be rewritten.
    pub fn update_profile(
        &self,
        id: &ShardableUuid,
        update: ProfileUpdate,
    ) -> ReportResult<User> {
        let mut user = self.get(id)?;

        if let Some(name) = update.name {
            let name = NonEmptyText::new(&name).map_err(|_| {
                ReportError::InvalidInput("profile name cannot be empty".into())
            })?;
            user.name = name.into_inner();
        }
        if let Some(specialty) = update.specialty {
            user.specialty = normalise_optional(specialty);
        }
        if let Some(hospital) = update.hospital {
            user.hospital = normalise_optional(hospital);
        }
        if let Some(phone) = update.phone {
            user.phone = normalise_optional(phone);
        }

        let record_dir = id.sharded_dir(&self.cfg.users_dir());
        write_json_record(&record_dir, USER_FILE_NAME, &user)?;
        Ok(user)
    }
}

fn normalise_optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

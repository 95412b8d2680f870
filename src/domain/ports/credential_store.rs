//! Credential store ports
//!
//! `CredentialStore` is the read-only query surface the policy providers use.
//! `CredentialRepository` adds the writes needed by the password change use case.
//! A password change is a single [`CredentialRepository::rotate`] call so a
//! failure can never leave a user without a current password.

use std::path::PathBuf;

use crate::domain::entities::CredentialRecord;
use crate::domain::value_objects::CredentialType;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("credential '{id}' already exists for user '{user_id}'")]
    DuplicateId { user_id: String, id: String },

    #[error("credential store {path} is corrupted: {message}")]
    Corrupted { path: PathBuf, message: String },

    #[error("failed to serialize credential store: {message}")]
    Serialization { message: String },

    #[error("credential store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait CredentialStore: Send + Sync {
    /// All records of `kind` for the user, in no particular order
    fn records_by_type(&self, user_id: &str, kind: CredentialType) -> Vec<CredentialRecord>;
}

pub trait CredentialRepository: CredentialStore {
    fn insert(&self, user_id: &str, record: CredentialRecord) -> StoreResult<()>;

    /// Make `record` the user's only current password in one step.
    ///
    /// Every existing `password` record becomes `password-history`, records
    /// whose id is in `prune_ids` are dropped (missing ids are ignored) and
    /// `record` is added. Either all of it happens or none of it does.
    /// Returns how many records were dropped.
    fn rotate(
        &self,
        user_id: &str,
        record: CredentialRecord,
        prune_ids: &[String],
    ) -> StoreResult<usize>;
}

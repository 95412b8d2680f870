//! Credential record entity
//!
//! A stored, hashed password owned by the credential store. The policy engine
//! only ever reads these.

use std::cmp::Ordering;

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::value_objects::CredentialType;

/// Output of a hash provider, ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword {
    pub algorithm: String,
    pub iterations: u32,
    /// Base64-encoded salt
    pub salt: String,
    /// Base64-encoded derived key
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: String,
    pub kind: CredentialType,
    /// Epoch milliseconds
    pub created_at: i64,
    pub algorithm: String,
    pub iterations: u32,
    pub salt: String,
    pub value: String,
}

impl CredentialRecord {
    /// A new active password record with a fresh id
    pub fn new_password(hashed: HashedPassword, created_at: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: CredentialType::Password,
            created_at,
            algorithm: hashed.algorithm,
            iterations: hashed.iterations,
            salt: hashed.salt,
            value: hashed.value,
        }
    }

    /// Demote to a history record; the creation timestamp is kept
    pub fn into_history(mut self) -> Self {
        self.kind = CredentialType::PasswordHistory;
        self
    }

    pub fn is_history(&self) -> bool {
        self.kind == CredentialType::PasswordHistory
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created_at).single()
    }
}

/// Newest first; equal timestamps fall back to ascending id
pub fn newest_first(a: &CredentialRecord, b: &CredentialRecord) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

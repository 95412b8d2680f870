//! In-memory credential store

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::domain::entities::CredentialRecord;
use crate::domain::ports::{CredentialRepository, CredentialStore, StoreError, StoreResult};
use crate::domain::value_objects::CredentialType;

/// Records grouped by user id
pub type CredentialTable = BTreeMap<String, Vec<CredentialRecord>>;

#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<CredentialTable>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: CredentialTable) -> Self {
        Self {
            users: RwLock::new(table),
        }
    }

    /// Copy of every record, for persistence
    pub fn snapshot(&self) -> CredentialTable {
        self.users.read().clone()
    }

    pub fn into_table(self) -> CredentialTable {
        self.users.into_inner()
    }

    /// Swap in a table loaded or written elsewhere
    pub fn replace(&self, table: CredentialTable) {
        *self.users.write() = table;
    }

    /// Every record of the user regardless of kind
    pub fn records(&self, user_id: &str) -> Vec<CredentialRecord> {
        self.users.read().get(user_id).cloned().unwrap_or_default()
    }

    pub fn user_ids(&self) -> Vec<String> {
        self.users.read().keys().cloned().collect()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn records_by_type(&self, user_id: &str, kind: CredentialType) -> Vec<CredentialRecord> {
        self.users
            .read()
            .get(user_id)
            .map(|records| records.iter().filter(|r| r.kind == kind).cloned().collect())
            .unwrap_or_default()
    }
}

impl CredentialRepository for InMemoryCredentialStore {
    fn insert(&self, user_id: &str, record: CredentialRecord) -> StoreResult<()> {
        let mut users = self.users.write();
        let records = users.entry(user_id.to_string()).or_default();
        if records.iter().any(|r| r.id == record.id) {
            return Err(StoreError::DuplicateId {
                user_id: user_id.to_string(),
                id: record.id,
            });
        }
        records.push(record);
        Ok(())
    }

    fn rotate(
        &self,
        user_id: &str,
        record: CredentialRecord,
        prune_ids: &[String],
    ) -> StoreResult<usize> {
        let mut users = self.users.write();
        let existing = users.get(user_id).map(Vec::as_slice).unwrap_or_default();
        if existing.iter().any(|r| r.id == record.id) {
            return Err(StoreError::DuplicateId {
                user_id: user_id.to_string(),
                id: record.id,
            });
        }

        let mut next: Vec<CredentialRecord> = existing
            .iter()
            .filter(|r| !prune_ids.contains(&r.id))
            .cloned()
            .map(|r| match r.kind {
                CredentialType::Password => r.into_history(),
                CredentialType::PasswordHistory => r,
            })
            .collect();
        let removed = existing.len() - next.len();
        next.push(record);

        users.insert(user_id.to_string(), next);
        Ok(removed)
    }
}

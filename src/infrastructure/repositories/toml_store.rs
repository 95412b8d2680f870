//! TOML Credential Repository
//!
//! Reads are served from the copy loaded at open (or after the last write).
//! Every mutation holds an exclusive lock on a sibling `.lock` file, reloads
//! the file, applies the change and writes the result through a temporary
//! file that is renamed into place. The in-memory copy is only replaced once
//! the write succeeded.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::memory::{CredentialTable, InMemoryCredentialStore};
use crate::domain::entities::CredentialRecord;
use crate::domain::ports::{CredentialRepository, CredentialStore, StoreError, StoreResult};
use crate::domain::value_objects::CredentialType;

const STORE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlCredential {
    id: String,
    kind: CredentialType,
    created_at: i64,
    algorithm: String,
    iterations: u32,
    salt: String,
    value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlStore {
    version: u32,
    #[serde(default)]
    users: BTreeMap<String, Vec<TomlCredential>>,
}

impl From<TomlCredential> for CredentialRecord {
    fn from(c: TomlCredential) -> Self {
        CredentialRecord {
            id: c.id,
            kind: c.kind,
            created_at: c.created_at,
            algorithm: c.algorithm,
            iterations: c.iterations,
            salt: c.salt,
            value: c.value,
        }
    }
}

impl From<&CredentialRecord> for TomlCredential {
    fn from(r: &CredentialRecord) -> Self {
        TomlCredential {
            id: r.id.clone(),
            kind: r.kind,
            created_at: r.created_at,
            algorithm: r.algorithm.clone(),
            iterations: r.iterations,
            salt: r.salt.clone(),
            value: r.value.clone(),
        }
    }
}

pub struct TomlCredentialRepository {
    path: PathBuf,
    records: InMemoryCredentialStore,
    write_guard: Mutex<()>,
}

impl TomlCredentialRepository {
    /// Load `path`, or start empty if it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let table = if path.exists() {
            load_table(&path)?
        } else {
            CredentialTable::new()
        };

        debug!(path = %path.display(), users = table.len(), "opened credential store");
        Ok(Self {
            path,
            records: InMemoryCredentialStore::from_table(table),
            write_guard: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn load_or_empty(&self) -> StoreResult<CredentialTable> {
        if self.path.exists() {
            load_table(&self.path)
        } else {
            Ok(CredentialTable::new())
        }
    }

    fn write_table(&self, table: &CredentialTable) -> StoreResult<()> {
        let users: BTreeMap<String, Vec<TomlCredential>> = table
            .iter()
            .map(|(user, records)| {
                (user.clone(), records.iter().map(TomlCredential::from).collect())
            })
            .collect();
        let store = TomlStore {
            version: STORE_VERSION,
            users,
        };
        let content = toml::to_string_pretty(&store).map_err(|e| StoreError::Serialization {
            message: e.to_string(),
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    fn mutate<T>(&self, op: impl FnOnce(&InMemoryCredentialStore) -> StoreResult<T>) -> StoreResult<T> {
        let _guard = self.write_guard.lock();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let lock_file = fs::File::create(self.lock_path())?;
        lock_file.lock_exclusive()?;

        let result = self.reload_apply_write(op);

        let _ = lock_file.unlock();
        result
    }

    /// Caller holds the file lock
    fn reload_apply_write<T>(
        &self,
        op: impl FnOnce(&InMemoryCredentialStore) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let staged = InMemoryCredentialStore::from_table(self.load_or_empty()?);
        let value = op(&staged)?;

        let table = staged.into_table();
        self.write_table(&table)?;
        self.records.replace(table);
        Ok(value)
    }
}

fn load_table(path: &Path) -> StoreResult<CredentialTable> {
    let content = fs::read_to_string(path)?;
    let store: TomlStore = toml::from_str(&content).map_err(|e| StoreError::Corrupted {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if store.version != STORE_VERSION {
        return Err(StoreError::Corrupted {
            path: path.to_path_buf(),
            message: format!(
                "unsupported version {} (expected {})",
                store.version, STORE_VERSION
            ),
        });
    }

    Ok(store
        .users
        .into_iter()
        .map(|(user, records)| (user, records.into_iter().map(CredentialRecord::from).collect()))
        .collect())
}

impl CredentialStore for TomlCredentialRepository {
    fn records_by_type(&self, user_id: &str, kind: CredentialType) -> Vec<CredentialRecord> {
        self.records.records_by_type(user_id, kind)
    }
}

impl CredentialRepository for TomlCredentialRepository {
    fn insert(&self, user_id: &str, record: CredentialRecord) -> StoreResult<()> {
        self.mutate(|records| records.insert(user_id, record))
    }

    fn rotate(
        &self,
        user_id: &str,
        record: CredentialRecord,
        prune_ids: &[String],
    ) -> StoreResult<usize> {
        self.mutate(|records| records.rotate(user_id, record, prune_ids))
    }
}

//! Policy provider registry
//!
//! Startup-time table of provider factories keyed by policy id. Populated once,
//! read concurrently afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::provider::{
    PasswordPolicyProvider, PasswordPolicyProviderFactory, PolicyProviderDescriptor, PolicySession,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("password policy provider '{0}' not found")]
    NotFound(String),

    #[error("password policy provider '{0}' is already registered")]
    DuplicateProvider(String),
}

#[derive(Default, Clone)]
pub struct PolicyProviderRegistry {
    factories: BTreeMap<String, Arc<dyn PasswordPolicyProviderFactory>>,
}

impl PolicyProviderRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in provider
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for factory in super::builtin_factories() {
            let id = factory.descriptor().id().to_string();
            registry.factories.insert(id, factory);
        }
        registry
    }

    pub fn register(
        &mut self,
        factory: Arc<dyn PasswordPolicyProviderFactory>,
    ) -> Result<(), RegistryError> {
        let id = factory.descriptor().id().to_string();
        if self.factories.contains_key(&id) {
            return Err(RegistryError::DuplicateProvider(id));
        }
        self.factories.insert(id, factory);
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_provider(
        mut self,
        factory: Arc<dyn PasswordPolicyProviderFactory>,
    ) -> Result<Self, RegistryError> {
        self.register(factory)?;
        Ok(self)
    }

    /// Instantiate the provider registered under `id`
    pub fn lookup(
        &self,
        id: &str,
        session: &PolicySession,
    ) -> Result<Box<dyn PasswordPolicyProvider>, RegistryError> {
        self.factory(id)
            .map(|f| f.create(session))
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn describe(&self, id: &str) -> Result<&PolicyProviderDescriptor, RegistryError> {
        self.factories
            .get(id)
            .map(|f| f.descriptor())
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn factory(&self, id: &str) -> Option<&Arc<dyn PasswordPolicyProviderFactory>> {
        self.factories.get(id)
    }

    /// Descriptors ordered by id
    pub fn descriptors(&self) -> impl Iterator<Item = &PolicyProviderDescriptor> {
        self.factories.values().map(|f| f.descriptor())
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for PolicyProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyProviderRegistry")
            .field("providers", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

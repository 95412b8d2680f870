//! Command handlers for the credpolicy binary

mod password;
mod policy;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use credpolicy::{
    Config, PasswordChangeService, PolicyError, PolicyProviderRegistry, Realm, SystemClock,
    TomlCredentialRepository,
};

use crate::cli::Cli;

pub use password::{cmd_check, cmd_expired, cmd_set_password};
pub use policy::{cmd_providers, cmd_validate_policy};

/// Exit status for a rejected password
pub const EXIT_POLICY_VIOLATION: u8 = 2;

/// Config from `--config` or the default hierarchy, then CLI flag overrides
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            for warning in warnings {
                eprintln!("warning: {warning}");
            }
            config.with_env_overrides()
        }
        None => Config::load_or_default(Some(Path::new("."))),
    };

    if let Some(policy) = &cli.policy {
        config.realm.password_policy = policy.clone();
    }
    if let Some(store) = &cli.store {
        config.store.path = store.clone();
    }
    Ok(config)
}

/// Everything a credential command needs
pub struct Workspace {
    pub realm: Realm,
    pub service: PasswordChangeService<TomlCredentialRepository>,
}

impl Workspace {
    pub fn open(config: &Config) -> Result<Self> {
        let registry = PolicyProviderRegistry::with_defaults();
        let realm = config
            .realm(&registry)
            .context("realm password policy is invalid")?;
        let repository = TomlCredentialRepository::open(&config.store.path)
            .with_context(|| format!("failed to open {}", config.store.path.display()))?;

        let service = PasswordChangeService::new(
            Arc::new(repository),
            Arc::new(SystemClock::global()),
            Arc::new(config.hash_registry()),
        )
        .with_default_algorithm(&config.hashing.algorithm);

        Ok(Self { realm, service })
    }
}

/// Print a violation and return the dedicated exit status
pub fn report_violation(error: &PolicyError, json: bool) -> Result<ExitCode> {
    let message = error.render(&credpolicy::MessageCatalog::english());
    if json {
        let mut value = serde_json::to_value(error)?;
        value["message"] = serde_json::Value::String(message);
        println!("{}", serde_json::to_string(&value)?);
    } else {
        eprintln!("{message}");
    }
    Ok(ExitCode::from(EXIT_POLICY_VIOLATION))
}

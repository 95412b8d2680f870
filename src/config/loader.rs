//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::value_objects::ConfigWarning;
use crate::error::{CredPolicyError, CredPolicyResult};

use super::types::Config;

pub const PROJECT_CONFIG_FILE: &str = "credpolicy.toml";

pub const ENV_PASSWORD_POLICY: &str = "CREDPOLICY_PASSWORD_POLICY";
pub const ENV_HASH_ALGORITHM: &str = "CREDPOLICY_HASH_ALGORITHM";
pub const ENV_HASH_ITERATIONS: &str = "CREDPOLICY_HASH_ITERATIONS";
pub const ENV_STORE: &str = "CREDPOLICY_STORE";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> CredPolicyResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| CredPolicyError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> Config {
    let candidates = project_root
        .map(|root| root.join(PROJECT_CONFIG_FILE))
        .into_iter()
        .chain(user_config_path());

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match Config::load(&path) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                return with_env_overrides(config);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "ignoring unreadable config"),
        }
    }

    with_env_overrides(Config::default())
}

/// `<config dir>/credpolicy/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("credpolicy").join("config.toml"))
}

/// Apply environment variable overrides (CREDPOLICY_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |name| std::env::var(name).ok())
}

/// Overrides read through `lookup` instead of the process environment
pub fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(policy) = lookup(ENV_PASSWORD_POLICY) {
        config.realm.password_policy = policy;
    }

    if let Some(algorithm) = lookup(ENV_HASH_ALGORITHM).filter(|a| !a.trim().is_empty()) {
        config.hashing.algorithm = algorithm.trim().to_string();
    }

    if let Some(raw) = lookup(ENV_HASH_ITERATIONS) {
        match raw.trim().parse::<u32>() {
            Ok(n) if n > 0 => config.hashing.iterations = n,
            _ => warn!(
                var = ENV_HASH_ITERATIONS,
                value = %raw,
                "expected a positive integer; keeping {}",
                config.hashing.iterations
            ),
        }
    }

    if let Some(path) = lookup(ENV_STORE).filter(|p| !p.is_empty()) {
        config.store.path = PathBuf::from(path);
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "realm",
        "name",
        "password_policy",
        "hashing",
        "algorithm",
        "iterations",
        "store",
        "path",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (*candidate, levenshtein(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

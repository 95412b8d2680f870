use std::process::ExitCode;

use anyhow::Result;
use credpolicy::{PasswordPolicy, PolicyProviderRegistry};

pub fn cmd_providers(json: bool) -> Result<ExitCode> {
    let registry = PolicyProviderRegistry::with_defaults();

    if json {
        let descriptors: Vec<_> = registry.descriptors().collect();
        println!("{}", serde_json::to_string_pretty(&descriptors)?);
        return Ok(ExitCode::SUCCESS);
    }

    print!("{}", render_provider_table(&registry));
    Ok(ExitCode::SUCCESS)
}

pub fn render_provider_table(registry: &PolicyProviderRegistry) -> String {
    let mut out = String::new();
    for d in registry.descriptors() {
        let default = d.default_config_value().unwrap_or("-");
        let multiple = if d.is_multiple_supported() { " (multiple)" } else { "" };
        out.push_str(&format!(
            "{:<28} {:<7} {:<16} {}{}\n",
            d.id(),
            format!("{:?}", d.config_type()),
            default,
            d.display_name(),
            multiple
        ));
    }
    out
}

pub fn cmd_validate_policy(spec: &str, json: bool) -> Result<ExitCode> {
    let registry = PolicyProviderRegistry::with_defaults();
    let policy = PasswordPolicy::parse(spec, &registry)?;

    if json {
        let entries: Vec<_> = policy
            .entries()
            .iter()
            .map(|e| serde_json::json!({ "id": e.id(), "config": e.raw_config() }))
            .collect();
        println!(
            "{}",
            serde_json::json!({ "policy": policy.to_spec_string(), "entries": entries })
        );
    } else {
        println!("{}", policy);
    }
    Ok(ExitCode::SUCCESS)
}

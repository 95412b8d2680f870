use std::process::ExitCode;

use anyhow::Result;
use credpolicy::PasswordChangeError;

use super::{report_violation, Workspace};
use crate::cli::UserArgs;

pub fn cmd_check(
    workspace: &Workspace,
    user: &UserArgs,
    password: &str,
    json: bool,
) -> Result<ExitCode> {
    let identity = user.identity();
    if let Err(violation) = workspace
        .service
        .validate(&workspace.realm, &identity, password)
    {
        return report_violation(&violation, json);
    }

    if json {
        println!("{}", serde_json::json!({ "status": "ok", "user": identity.id }));
    } else {
        println!("Password accepted for {}", identity.id);
    }
    Ok(ExitCode::SUCCESS)
}

pub fn cmd_set_password(
    workspace: &Workspace,
    user: &UserArgs,
    password: &str,
    json: bool,
) -> Result<ExitCode> {
    let identity = user.identity();
    let record = match workspace
        .service
        .update_password(&workspace.realm, &identity, password)
    {
        Ok(record) => record,
        Err(PasswordChangeError::Policy(violation)) => return report_violation(&violation, json),
        Err(e) => return Err(e.into()),
    };

    if json {
        println!(
            "{}",
            serde_json::json!({
                "status": "updated",
                "user": identity.id,
                "credentialId": record.id,
                "algorithm": record.algorithm,
                "createdAt": record.created_at,
            })
        );
    } else {
        println!("Password updated for {}", identity.id);
    }
    Ok(ExitCode::SUCCESS)
}

pub fn cmd_expired(workspace: &Workspace, user: &UserArgs, json: bool) -> Result<ExitCode> {
    let identity = user.identity();
    let expired = workspace
        .service
        .is_password_expired(&workspace.realm, &identity);

    if json {
        println!("{}", serde_json::json!({ "user": identity.id, "expired": expired }));
    } else if expired {
        println!("Password for {} has expired", identity.id);
    } else {
        println!("Password for {} is current", identity.id);
    }
    Ok(ExitCode::SUCCESS)
}

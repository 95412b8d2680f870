use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// credpolicy - password policy enforcement for identity realms
#[derive(Parser, Debug)]
#[command(name = "credpolicy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Machine-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./credpolicy.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Policy specification, overriding the config file
    #[arg(long, global = true)]
    pub policy: Option<String>,

    /// Credential store file, overriding the config file
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the registered policy providers
    Providers,

    /// Parse a policy specification and print its normalized form
    ValidatePolicy {
        /// e.g. "passwordAge(30) passwordHistory(3)"
        spec: String,
    },

    /// Evaluate a candidate password without storing it
    Check {
        #[command(flatten)]
        user: UserArgs,

        password: String,
    },

    /// Evaluate, hash and store a new password
    SetPassword {
        #[command(flatten)]
        user: UserArgs,

        password: String,
    },

    /// Report whether the current password has expired
    Expired {
        #[command(flatten)]
        user: UserArgs,
    },
}

#[derive(Args, Debug)]
pub struct UserArgs {
    /// User id in the credential store
    #[arg(long = "user")]
    pub id: String,

    /// Username (defaults to the user id)
    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub email: Option<String>,
}

impl UserArgs {
    pub fn identity(&self) -> credpolicy::UserIdentity {
        let username = self.username.as_deref().unwrap_or(&self.id);
        let user = credpolicy::UserIdentity::new(&self.id, username);
        match &self.email {
            Some(email) => user.with_email(email),
            None => user,
        }
    }
}

//! Application Layer
//!
//! Use cases that orchestrate the domain and infrastructure.
//!
//! ## Use Cases
//!
//! - `PasswordChangeService` - evaluate, hash, rotate and prune credentials

pub mod password_change;

pub use password_change::{PasswordChangeError, PasswordChangeService};

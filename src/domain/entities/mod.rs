//! Domain Entities
//!
//! Things with identity and lifecycle:
//! - `CredentialRecord` - A stored password hash (current or superseded)
//! - `UserIdentity` - The user whose password is being changed
//! - `Realm` - Owner of the active password policy

mod credential;
mod realm;
mod user;

pub use credential::{newest_first, CredentialRecord, HashedPassword};
pub use realm::Realm;
pub use user::UserIdentity;

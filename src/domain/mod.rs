//! Domain Layer
//!
//! The password policy engine without I/O.
//!
//! ## Structure
//!
//! - `entities/` - Credentials, users and realms
//! - `value_objects/` - Policy configs, errors, message catalog
//! - `policies/` - Providers, registry, specification parser, evaluator
//! - `ports/` - Clock, credential store and hash provider interfaces
//!
//! Infrastructure supplies the port implementations; nothing here touches the
//! file system except the blacklist loader, which runs at parse time.

pub mod entities;
pub mod policies;
pub mod ports;
pub mod value_objects;

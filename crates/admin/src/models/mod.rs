//! Domain models for admin.

pub mod resource;
pub mod session;

pub use resource::{Capabilities, Field, FieldKind, Resource};
pub use session::{CurrentAdmin, keys as session_keys};

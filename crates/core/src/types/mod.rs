//! Core types for Hadawi.
//!
//! This module provides type-safe wrappers for the concepts the admin shell
//! reasons about: who is signed in and which language the UI speaks.

pub mod email;
pub mod language;
pub mod role;

pub use email::{Email, EmailError};
pub use language::{Direction, Language, LanguageError};
pub use role::AdminRole;

//! Hadawi Core - Shared types library.
//!
//! This crate provides the domain types used by `admin`, the Hadawi
//! back-office web application.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no session
//! handling. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Login email, admin role, and language/direction types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

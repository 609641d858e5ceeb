//! Level-Up Core - Shared types library.
//!
//! This crate provides common types used across all Level-Up Gamer components:
//! - `storefront` - Client-side storefront core (cart, session, API client)
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, product entities, and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

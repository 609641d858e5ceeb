//! Core types for the Level-Up Gamer storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod product;
pub mod role;

pub use id::*;
pub use product::{Category, Product};
pub use role::Role;

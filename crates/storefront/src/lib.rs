//! Level-Up Gamer storefront core library.
//!
//! The browser-local state model of the storefront: a persistent key-value
//! store adapter, the shopping cart repository built on it, a bearer-token
//! claims decoder, the auth session manager derived from those claims, and
//! the route guards that consume it. The remote product/order/user REST API
//! is a collaborator, reached through [`api::ApiClient`].
//!
//! All core operations are synchronous and local; only the [`api`] module
//! performs network I/O.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod claims;
pub mod config;
pub mod guard;
pub mod session;
pub mod storage;

//! Core types and rules for the catdex catalogue.
//!
//! This crate is deliberately free of HTTP and database dependencies. It
//! defines the records, the [`store::CatalogStore`] abstraction, and the
//! managers that decide who may change what: every cat, list, and review
//! write goes through [`lifecycle::CatManager`] or
//! [`membership::ListManager`], which consult [`guard::check_permission`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod cat;
pub mod error;
pub mod guard;
pub mod id;
pub mod identity;
pub mod lifecycle;
pub mod list;
pub mod membership;
pub mod review;
pub mod store;
pub mod user;
pub mod validate;

pub use error::{Entity, Error, Result};
pub use identity::Identity;

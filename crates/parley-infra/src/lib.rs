//! Infrastructure implementations for Parley.
//!
//! Concrete HTTP clients for the three external collaborators (identity
//! service, bot runtime, transcript store), the on-disk token cache, and
//! the config loader. Everything here implements the traits defined in
//! `parley-core`.

pub mod bot;
pub mod config;
pub mod identity;
pub mod transcript;

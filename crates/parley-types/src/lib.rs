//! Shared domain types for Parley.
//!
//! This crate contains the core domain types used across the Parley client:
//! chat messages, credential sessions, bot turn shapes, configuration, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror,
//! and secrecy for credential wrapping.

pub mod auth;
pub mod bot;
pub mod chat;
pub mod config;
pub mod error;

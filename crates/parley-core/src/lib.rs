//! Conversation orchestration for Parley.
//!
//! This crate defines the traits for the three external collaborators
//! (credential provider, bot runtime, transcript store) and the thin
//! orchestration built on top of them: the session gate, the turn handler,
//! the transcript loader, and the multi-step auth flows.
//!
//! Implementations of the traits live in `parley-infra`; this crate never
//! touches HTTP or the filesystem.

pub mod auth;
pub mod bot;
pub mod session;
pub mod transcript;
pub mod turn;

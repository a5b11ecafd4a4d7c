//! Identity service client: user-pool operations plus the credential
//! exchange that turns a cached token triple into short-lived credentials.

mod client;
mod token_cache;
mod types;

pub use client::HttpCredentialProvider;
pub use token_cache::TokenCache;

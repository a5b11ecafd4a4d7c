//! GraphQL transcript store client.

mod client;

pub use client::GraphQlTranscriptStore;

//! Interactive chat view.
//!
//! The chat command is the guarded screen of the client: a session gate,
//! a history load, then a readline loop sending turns to the bot runtime.

mod banner;
mod commands;
mod input;
mod loop_runner;

pub use loop_runner::run_chat_loop;

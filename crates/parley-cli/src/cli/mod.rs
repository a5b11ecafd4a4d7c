//! CLI command definitions and dispatch for the `parley` binary.
//!
//! Uses clap derive macros. Each navigable screen of the client is a
//! command: auth forms are interactive prompts, the chat view is the
//! `chat` command. `chat` and `history` are guarded -- without a valid
//! session they print a sign-in hint instead of rendering.

pub mod auth;
pub mod chat;
pub mod history;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with your cloud assistant from the terminal.
#[derive(Parser)]
#[command(name = "parley", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account (interactive; continues into email confirmation).
    Signup,

    /// Sign in with username and password.
    #[command(alias = "signin")]
    Login,

    /// Submit an email confirmation code from an earlier signup.
    Confirm {
        /// The verification code from the confirmation email.
        code: String,
    },

    /// Reset a forgotten password (request a code, then set a new one).
    #[command(name = "reset-password")]
    ResetPassword,

    /// Sign out and clear the local session.
    Logout,

    /// Show the currently signed-in user.
    Whoami,

    /// Start an interactive chat session (requires sign-in).
    Chat,

    /// Show the persisted conversation history (requires sign-in).
    History,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

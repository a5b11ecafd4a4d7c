//! Auth commands: signup, login, confirm, reset-password, logout, whoami.
//!
//! Each command is one of the client's auth screens: a short interactive
//! form over the credential provider. Provider failures are displayed
//! verbatim and never abort the process; the user stays on the current
//! step and can retry or Ctrl+C out.

use anyhow::Result;
use console::style;
use dialoguer::{Input, Password};
use secrecy::SecretString;

use parley_core::auth::provider::CredentialProvider;
use parley_core::auth::{PasswordResetFlow, SignupFlow, sign_in_and_verify};
use parley_types::error::AuthError;

use crate::state::AppState;

fn print_error(message: &str) {
    eprintln!("\n  {} {}\n", style("!").red().bold(), message);
}

fn print_chat_hint() {
    println!(
        "  {} You're signed in. Start chatting with {}",
        style("*").green().bold(),
        style("parley chat").cyan()
    );
    println!();
}

/// Create an account, then confirm it in the same interactive flow.
///
/// The pending username/password live only inside this function's
/// [`SignupFlow`]; nothing is written to disk before the account is
/// confirmed and signed in.
pub async fn signup(state: &AppState) -> Result<()> {
    println!();
    println!("  {}", style("Create an account").bold());
    println!();

    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let mut flow = SignupFlow::new();
    let outcome = match flow
        .begin(&state.provider, &username, SecretString::from(password), &email)
        .await
    {
        Ok(outcome) => outcome,
        Err(err) => {
            print_error(&format!("Signup failed: {err}"));
            return Ok(());
        }
    };

    if outcome.confirmed {
        // Provider configured for automatic confirmation.
        println!();
        println!(
            "  {} Account created. Sign in with {}",
            style("*").green().bold(),
            style("parley login").cyan()
        );
        println!();
        return Ok(());
    }

    println!();
    println!(
        "  {} We emailed a confirmation code to {}.",
        style("i").blue().bold(),
        style(&email).bold()
    );
    println!();

    loop {
        let code: String = Input::new()
            .with_prompt("Confirmation code")
            .interact_text()?;

        match flow.confirm(&state.provider, &code).await {
            Ok(_session) => {
                println!();
                print_chat_hint();
                return Ok(());
            }
            Err(err) => {
                // Wrong code, not-yet-arrived email, and similar: stay on
                // the confirmation step.
                print_error(&format!("Confirmation failed: {err}"));
            }
        }
    }
}

/// Sign in and verify that a live credential session exists.
pub async fn login(state: &AppState) -> Result<()> {
    println!();
    println!("  {}", style("Welcome back").bold());
    println!();

    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;

    match sign_in_and_verify(&state.provider, &username, &SecretString::from(password)).await {
        Ok(_session) => {
            println!();
            print_chat_hint();
        }
        Err(err) => print_error(&format!("Login failed: {err}")),
    }
    Ok(())
}

/// Standalone confirmation attempt.
///
/// The signup stash lives only inside the interactive signup flow, so a
/// separate invocation has nothing to bind the code to: the flow reports
/// the signup session as expired and the user starts over.
pub async fn confirm(state: &AppState, code: &str) -> Result<()> {
    let mut flow = SignupFlow::new();
    match flow.confirm(&state.provider, code).await {
        Ok(_session) => {
            println!();
            print_chat_hint();
        }
        Err(AuthError::SignupSessionExpired) => {
            print_error("Signup session expired. Please sign up again.");
            println!(
                "  Run {} to restart.",
                style("parley signup").cyan()
            );
            println!();
        }
        Err(err) => print_error(&format!("Confirmation failed: {err}")),
    }
    Ok(())
}

/// Two-stage password reset: request a code, then set the new password.
///
/// A failure at either stage keeps the user on that stage.
pub async fn reset_password(state: &AppState) -> Result<()> {
    println!();
    println!("  {}", style("Reset your password").bold());
    println!();

    let mut flow = PasswordResetFlow::new();

    loop {
        let username: String = Input::new()
            .with_prompt("Email or username")
            .interact_text()?;
        match flow.request_code(&state.provider, &username).await {
            Ok(()) => break,
            Err(err) => print_error(&format!("Failed to send code: {err}")),
        }
    }

    println!();
    println!(
        "  {} Code sent. Check your email.",
        style("i").blue().bold()
    );
    println!();

    loop {
        let code: String = Input::new()
            .with_prompt("Verification code")
            .interact_text()?;
        let new_password = Password::new()
            .with_prompt("New password")
            .with_confirmation("Confirm new password", "Passwords do not match")
            .interact()?;

        match flow
            .confirm(&state.provider, &code, &SecretString::from(new_password))
            .await
        {
            Ok(()) => {
                println!();
                println!(
                    "  {} Password reset successful. Sign in with {}",
                    style("*").green().bold(),
                    style("parley login").cyan()
                );
                println!();
                return Ok(());
            }
            Err(err) => print_error(&format!("Failed to reset password: {err}")),
        }
    }
}

/// Sign out and clear the local session.
pub async fn logout(state: &AppState) -> Result<()> {
    match state.provider.sign_out().await {
        Ok(()) => {
            println!();
            println!("  {} Signed out.", style("*").green().bold());
            println!();
        }
        Err(err) => print_error(&format!("Sign-out failed: {err}")),
    }
    Ok(())
}

/// Show the currently signed-in user.
pub async fn whoami(state: &AppState, json: bool) -> Result<()> {
    match state.provider.current_user().await {
        Ok(profile) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                println!();
                println!("  {}", style(&profile.username).cyan().bold());
                if let Some(email) = profile.attribute("email") {
                    println!("  {}", style(email).dim());
                }
                println!();
            }
        }
        Err(AuthError::SessionMissing) => {
            println!();
            println!(
                "  {} Not signed in. Run {} first.",
                style("!").yellow().bold(),
                style("parley login").cyan()
            );
            println!();
        }
        Err(err) => print_error(&format!("Could not fetch user: {err}")),
    }
    Ok(())
}

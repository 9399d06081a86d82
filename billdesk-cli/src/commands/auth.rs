//! Auth commands - login, register, logout, whoami

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use dialoguer::{Input, Password};

use billdesk_core::ports::Role;
use billdesk_core::services::{Route, MSG_LOGIN_FAILED, MSG_REGISTRATION_FAILED};
use billdesk_core::services::logging::record;
use billdesk_core::LogEvent;

use super::{enter_view, get_context, spinner};

/// Role flag for `billdesk register`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Client,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Client => Role::Client,
            RoleArg::Admin => Role::Admin,
        }
    }
}

/// Use the flag, otherwise prompt
fn text_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new().with_prompt(prompt).allow_empty(true).interact_text()?),
    }
}

/// Password from the flag, `BILLDESK_PASSWORD`, or a hidden prompt
fn password_or_prompt(value: Option<String>) -> Result<String> {
    if let Some(p) = value {
        return Ok(p);
    }
    if let Ok(p) = std::env::var("BILLDESK_PASSWORD") {
        return Ok(p);
    }
    Ok(Password::new().with_prompt("Password").allow_empty_password(true).interact()?)
}

pub async fn run_login(email: Option<String>, password: Option<String>) -> Result<()> {
    let ctx = get_context()?;
    if !enter_view(&ctx, Route::Login)? {
        return Ok(());
    }

    let email = text_or_prompt(email, "Email")?;
    let password = password_or_prompt(password)?;

    let bar = spinner("Signing in...");
    let result = ctx.session.login(&email, &password).await;
    bar.finish_and_clear();

    match result {
        Ok(session) => {
            record(&ctx.logger, LogEvent::new("command_executed").with_command("login"));
            println!("{} {}", "Signed in as".green(), session.email().bold());
            Ok(())
        }
        Err(e) => anyhow::bail!(e.user_message(MSG_LOGIN_FAILED)),
    }
}

pub async fn run_register(
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: RoleArg,
) -> Result<()> {
    let ctx = get_context()?;
    if !enter_view(&ctx, Route::Register)? {
        return Ok(());
    }

    let name = text_or_prompt(name, "Full name")?;
    let email = text_or_prompt(email, "Email")?;
    let password = password_or_prompt(password)?;

    let bar = spinner("Creating account...");
    let result = ctx.session.register(&name, &email, &password, role.into()).await;
    bar.finish_and_clear();

    match result {
        Ok(session) => {
            record(&ctx.logger, LogEvent::new("command_executed").with_command("register"));
            println!("{} {}", "Account created. Signed in as".green(), session.email().bold());
            Ok(())
        }
        Err(e) => anyhow::bail!(e.user_message(MSG_REGISTRATION_FAILED)),
    }
}

pub fn run_logout() -> Result<()> {
    let ctx = get_context()?;
    if !ctx.session.state().is_authenticated() {
        println!("Not signed in.");
        return Ok(());
    }
    ctx.session.logout();
    println!("{}", "Signed out".green());
    Ok(())
}

pub fn run_whoami(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let state = ctx.session.state();
    let email = state.session().map(|s| s.email().to_string());

    if json {
        println!(
            "{}",
            serde_json::json!({
                "authenticated": email.is_some(),
                "email": email,
                "apiBaseUrl": ctx.config.api_base_url,
            })
        );
        return Ok(());
    }

    match email {
        Some(email) => println!("Signed in as {}", email.bold()),
        None => println!("Not signed in. Run `billdesk login` to sign in."),
    }
    println!("Backend: {}", ctx.config.api_base_url.dimmed());
    Ok(())
}

//! Sign-in against the hosted backend

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use colored::*;
use sqlx::SqlitePool;

use crate::auth::{AuthClient, SignUpOutcome, build_http_client};
use crate::cli::ui::{self, with_spinner};
use crate::config::repository::sessions;
use crate::config::{Config, ENV_REMOTE_ANON_KEY, ENV_REMOTE_URL, db};
use crate::storage::BackendMode;

#[derive(Args, Debug)]
pub struct AuthCommands {
    #[command(subcommand)]
    pub command: AuthSubcommands,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommands {
    /// Sign in with email and password
    SignIn {
        email: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account
    SignUp {
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// End the current session
    SignOut,
    /// Show the backend and who is signed in
    Status,
}

pub async fn run(args: AuthCommands, config: &Config) -> Result<()> {
    let Some((url, _)) = config.remote.credentials() else {
        if let AuthSubcommands::Status = args.command {
            local_status(config);
            return Ok(());
        }
        bail!(
            "No remote backend configured. Set {} and {} or fill [remote] in {:?}",
            ENV_REMOTE_URL,
            ENV_REMOTE_ANON_KEY,
            Config::config_path()?
        );
    };
    let pool = db::open(&config.db_path()?).await?;
    let client = AuthClient::new(build_http_client(&config.remote)?, &config.remote)?;

    match args.command {
        AuthSubcommands::SignIn { email, password } => {
            let (email, password) = credentials(email, password)?;
            let session = with_spinner("Signing in...", client.sign_in(&email, &password)).await?;
            sessions::save(&pool, url, &session).await?;
            ui::success(&format!("Signed in as {}", session.email.bright_yellow().bold()));
        }
        AuthSubcommands::SignUp { email, password } => {
            let (email, password) = credentials(email, password)?;
            match with_spinner("Creating account...", client.sign_up(&email, &password)).await? {
                SignUpOutcome::SignedIn(session) => {
                    sessions::save(&pool, url, &session).await?;
                    ui::success(&format!(
                        "Account created, signed in as {}",
                        session.email.bright_yellow().bold()
                    ));
                }
                SignUpOutcome::ConfirmationRequired { email } => {
                    ui::success(&format!(
                        "Account created for {}. Check email if confirmation is enabled.",
                        email.bright_yellow().bold()
                    ));
                }
            }
        }
        AuthSubcommands::SignOut => match sessions::get(&pool, url).await? {
            Some(session) => {
                if let Err(e) = with_spinner("Signing out...", client.sign_out(&session)).await {
                    log::warn!("Remote sign-out failed, dropping local session anyway: {:#}", e);
                }
                sessions::delete(&pool, url).await?;
                ui::success(&format!("Signed out {}", session.email));
            }
            None => ui::warning("Not signed in"),
        },
        AuthSubcommands::Status => remote_status(&pool, url).await?,
    }

    pool.close().await;
    Ok(())
}

fn credentials(email: String, password: Option<String>) -> Result<(String, String)> {
    let email = email.trim().to_string();
    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ").context("Failed to read password")?,
    };
    if email.is_empty() || password.is_empty() {
        bail!("Enter email and password.");
    }
    Ok((email, password))
}

fn local_status(config: &Config) {
    println!();
    println!("  {} {}", "Backend:".bright_white().bold(), BackendMode::Local);
    println!(
        "  {} {}",
        "Acting as:".bright_white().bold(),
        config.session.local_actor.bright_yellow()
    );
    println!();
}

async fn remote_status(pool: &SqlitePool, url: &str) -> Result<()> {
    println!();
    println!("  {} {}", "Backend:".bright_white().bold(), BackendMode::Remote);
    println!("  {} {}", "URL:".bright_white().bold(), url);

    match sessions::get(pool, url).await? {
        Some(session) => {
            println!(
                "  {} {}",
                "Signed in:".bright_white().bold(),
                session.email.bright_yellow().bold()
            );
            let expiry = session.expires_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();
            if session.is_expired() {
                println!("  {} {} (refreshed on next use)", "Expires:".bright_white().bold(), expiry.red());
            } else {
                println!("  {} {}", "Expires:".bright_white().bold(), expiry);
            }
        }
        None => println!("  {}", "Not signed in".dimmed()),
    }
    println!();
    Ok(())
}

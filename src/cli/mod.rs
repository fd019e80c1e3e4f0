pub mod app;
pub mod commands;
pub mod context;
pub mod shell;
pub mod ui;

pub use app::{Cli, Commands};
pub use context::Session;

use anyhow::Result;

use crate::config::Config;

pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Auth(args) => commands::auth::run(args, &config).await,
        Commands::Shell => shell::run(config, cli.actor).await,
        command => {
            let mut session = Session::open(config, cli.actor).await?;
            let result = commands::execute(&mut session, command);
            // Persist even when the command failed; earlier notifications may be pending
            let closed = session.close().await;
            result.and(closed)
        }
    }
}

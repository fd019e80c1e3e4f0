use anyhow::Result;
use clap::Parser;
use log::info;

use agri_erp::cli::{self, Cli, ui};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("agri-erp.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting agri-erp");

    if let Err(e) = cli::run(cli).await {
        log::error!("{:#}", e);
        ui::failure(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}

pub mod admin;
pub mod auth;
pub mod master;
pub mod outbound;
pub mod plant;
pub mod purchase;
pub mod sales;
pub mod view;

use anyhow::{Result, bail};
use chrono::NaiveDate;

use super::app::Commands;
use super::context::Session;

/// Accepts `YYYY-MM-DD` dates only
pub(crate) fn date_arg(value: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| format!("expected a date like 2026-03-02, got '{}'", value))
}

/// Runs one command against an open session and queues the result for saving
pub fn execute(session: &mut Session, command: Commands) -> Result<()> {
    let result = match command {
        Commands::Seed => view::seed(session),
        Commands::Nav { module, page } => view::nav(session, module, page),
        Commands::Render { module, page, out } => {
            view::render(session, module, page, out.as_deref())
        }
        Commands::Dashboard => view::dashboard(session),
        Commands::List { page } => view::list(session, page),
        Commands::Export { quotation_id, dir } => view::export(session, &quotation_id, &dir),
        Commands::Sales(cmd) => sales::run(session, cmd),
        Commands::Purchase(cmd) => purchase::run(session, cmd),
        Commands::Master(cmd) => master::run(session, cmd),
        Commands::PreProcessing(cmd) => plant::run_pre_processing(session, cmd),
        Commands::Inspection(cmd) => plant::run_inspection(session, cmd),
        Commands::Production(cmd) => plant::run_production(session, cmd),
        Commands::Invoicing(cmd) => outbound::run_invoicing(session, cmd),
        Commands::Packaging(cmd) => outbound::run_packaging(session, cmd),
        Commands::Dispatch(cmd) => outbound::run_dispatch(session, cmd),
        Commands::Admin(cmd) => admin::run(session, cmd),
        Commands::Auth(_) | Commands::Shell => {
            bail!("This command is not available inside a session")
        }
    };
    session.commit();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_arg() {
        assert_eq!(date_arg("2026-03-02").unwrap(), "2026-03-02");
        assert_eq!(date_arg(" 2026-03-02 ").unwrap(), "2026-03-02");
        assert!(date_arg("02/03/2026").is_err());
    }
}

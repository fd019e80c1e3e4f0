use super::commands::admin::AdminCommands;
use super::commands::auth::AuthCommands;
use super::commands::master::MasterCommands;
use super::commands::outbound::{DispatchCommands, InvoicingCommands, PackagingCommands};
use super::commands::plant::{InspectionCommands, PreProcessingCommands, ProductionCommands};
use super::commands::purchase::PurchaseCommands;
use super::commands::sales::SalesCommands;
use crate::domain::{ModuleKey, Page};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "agri-erp")]
#[command(about = "Enquiry-to-cash and procurement-to-dispatch ERP for agro-processing plants")]
#[command(version)]
pub struct Cli {
    /// Act as this email in local mode
    #[arg(long = "as", global = true, value_name = "EMAIL")]
    pub actor: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replace all data with the demo plant
    Seed,
    /// Sign in to the hosted backend
    Auth(AuthCommands),
    /// Move to a module page
    Nav {
        module: ModuleKey,
        /// Defaults to the first page you may open
        page: Option<Page>,
    },
    /// Write the application screen as HTML
    Render {
        #[arg(long)]
        module: Option<ModuleKey>,
        #[arg(long)]
        page: Option<Page>,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// KPIs, analytics and recent notifications
    Dashboard,
    /// Print the records shown on a page
    List { page: Page },
    /// Download the work order of a quotation as PDF
    Export {
        quotation_id: String,
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
    /// Enquiries, quotations and sales orders
    #[command(subcommand)]
    Sales(SalesCommands),
    /// Requisitions, vendors and goods receipts
    #[command(subcommand)]
    Purchase(PurchaseCommands),
    /// Products, customers and bills of material
    #[command(subcommand)]
    Master(MasterCommands),
    /// Batch intake and wash & sort
    #[command(subcommand)]
    PreProcessing(PreProcessingCommands),
    /// Quality control entries
    #[command(subcommand)]
    Inspection(InspectionCommands),
    /// Job cards and machine logs
    #[command(subcommand)]
    Production(ProductionCommands),
    /// Invoices and payments
    #[command(subcommand)]
    Invoicing(InvoicingCommands),
    /// Packing slips and labels
    #[command(subcommand)]
    Packaging(PackagingCommands),
    /// Dispatch orders and tracking
    #[command(subcommand)]
    Dispatch(DispatchCommands),
    /// Users and access control
    #[command(subcommand)]
    Admin(AdminCommands),
    /// Run many commands in one session
    Shell,
}

use anyhow::Result;
use clap::Subcommand;

use crate::cli::context::Session;
use crate::cli::ui;
use crate::domain::{ModuleKey, Page};
use crate::workflow::master_data::{BomForm, CustomerForm, ProductForm};

#[derive(Subcommand, Debug)]
pub enum MasterCommands {
    /// Add a product
    Product {
        #[arg(long)]
        sku: String,
        #[arg(long)]
        name: String,
        /// Unit of measure, defaults to kg
        #[arg(long)]
        uom: Option<String>,
    },
    /// Add a customer
    Customer {
        #[arg(long)]
        name: String,
        /// Defaults to INR
        #[arg(long)]
        currency: Option<String>,
    },
    /// Add a bill of material
    Bom {
        #[arg(long)]
        product: String,
        #[arg(long)]
        version: Option<u32>,
    },
}

pub fn run(session: &mut Session, command: MasterCommands) -> Result<()> {
    let erp = &mut session.erp;
    match command {
        MasterCommands::Product { sku, name, uom } => {
            erp.require_access(ModuleKey::MasterData, Page::Products)?;
            let id = erp.add_product(ProductForm { sku, name, uom })?;
            ui::created("Product", &id);
        }
        MasterCommands::Customer { name, currency } => {
            erp.require_access(ModuleKey::MasterData, Page::Customers)?;
            let id = erp.add_customer(CustomerForm { name, currency })?;
            ui::created("Customer", &id);
        }
        MasterCommands::Bom { product, version } => {
            erp.require_access(ModuleKey::MasterData, Page::Bom)?;
            let id = erp.add_bom(BomForm { product, version })?;
            ui::created("BOM", &id);
        }
    }
    Ok(())
}

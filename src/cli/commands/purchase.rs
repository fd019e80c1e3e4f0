use anyhow::Result;
use clap::Subcommand;

use super::date_arg;
use crate::cli::context::Session;
use crate::cli::ui;
use crate::domain::{ModuleKey, Page};
use crate::workflow::purchase::{GrnForm, RequisitionForm, VendorForm};

#[derive(Subcommand, Debug)]
pub enum PurchaseCommands {
    /// Raise a purchase requisition
    Requisition {
        #[arg(long)]
        material: String,
        #[arg(long)]
        qty: f64,
        #[arg(long, value_parser = date_arg)]
        required_by: String,
    },
    /// Add a vendor
    Vendor {
        #[arg(long)]
        name: String,
        /// 0 to 5, defaults to 4
        #[arg(long)]
        rating: Option<f64>,
    },
    /// Post a goods receipt
    Grn {
        #[arg(long)]
        vendor: String,
        #[arg(long)]
        material: String,
        #[arg(long)]
        batch_tag: String,
        /// Hold the batch for quality control
        #[arg(long)]
        qc_hold: bool,
    },
}

pub fn run(session: &mut Session, command: PurchaseCommands) -> Result<()> {
    let erp = &mut session.erp;
    match command {
        PurchaseCommands::Requisition {
            material,
            qty,
            required_by,
        } => {
            erp.require_access(ModuleKey::Purchase, Page::Requisitions)?;
            let id = erp.add_purchase_requisition(RequisitionForm {
                material,
                qty,
                required_by,
            })?;
            ui::created("Requisition", &id);
        }
        PurchaseCommands::Vendor { name, rating } => {
            erp.require_access(ModuleKey::Purchase, Page::Vendors)?;
            let id = erp.add_vendor(VendorForm { name, rating })?;
            ui::created("Vendor", &id);
        }
        PurchaseCommands::Grn {
            vendor,
            material,
            batch_tag,
            qc_hold,
        } => {
            erp.require_access(ModuleKey::Purchase, Page::Grn)?;
            let id = erp.add_grn(GrnForm {
                vendor,
                material,
                batch_tag,
                qc_hold,
            })?;
            ui::created("GRN", &id);
        }
    }
    Ok(())
}

use anyhow::Result;
use clap::Subcommand;

use super::date_arg;
use crate::cli::context::Session;
use crate::cli::ui;
use crate::domain::{ModuleKey, Page};
use crate::workflow::sales::EnquiryForm;

#[derive(Subcommand, Debug)]
pub enum SalesCommands {
    /// Create an enquiry
    Enquiry {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        product: String,
        #[arg(long)]
        qty: f64,
        #[arg(long, value_parser = date_arg)]
        delivery_date: String,
        #[arg(long)]
        ai_score: Option<u32>,
    },
    /// Quote an enquiry; also creates its work order
    Quote {
        enquiry_id: String,
        /// Margin percentage; random when omitted
        #[arg(long)]
        margin: Option<u32>,
    },
    /// Approve a pending quotation
    Approve { quotation_id: String },
    /// Reject a pending quotation
    Reject { quotation_id: String },
    /// Turn an approved quotation into a sales order
    Order { quotation_id: String },
}

pub fn run(session: &mut Session, command: SalesCommands) -> Result<()> {
    let erp = &mut session.erp;
    match command {
        SalesCommands::Enquiry {
            customer,
            product,
            qty,
            delivery_date,
            ai_score,
        } => {
            erp.require_access(ModuleKey::Sales, Page::Enquiries)?;
            let id = erp.create_enquiry(EnquiryForm {
                customer,
                product,
                qty,
                delivery_date,
                ai_score,
            })?;
            ui::created("Enquiry", &id);
        }
        SalesCommands::Quote { enquiry_id, margin } => {
            erp.require_access(ModuleKey::Sales, Page::Enquiries)?;
            let id = erp.create_quotation(&enquiry_id, margin)?;
            if let Some(q) = erp.state().quotations.iter().find(|q| q.id == id) {
                ui::created("Quotation", &id);
                println!("  margin {}%, status {}, expires {}", q.margin, q.status, q.expires_on);
            }
            if let Some(wo) = erp.state().work_order_for(&id) {
                println!("  work order {}", wo.work_order_no);
            }
        }
        SalesCommands::Approve { quotation_id } => {
            erp.require_access(ModuleKey::Sales, Page::Quotations)?;
            erp.approve_quotation(&quotation_id)?;
            ui::success(&format!("Quotation {} approved", quotation_id));
        }
        SalesCommands::Reject { quotation_id } => {
            erp.require_access(ModuleKey::Sales, Page::Quotations)?;
            erp.reject_quotation(&quotation_id)?;
            ui::success(&format!("Quotation {} rejected", quotation_id));
        }
        SalesCommands::Order { quotation_id } => {
            erp.require_access(ModuleKey::Sales, Page::Quotations)?;
            let id = erp.create_sales_order(&quotation_id)?;
            ui::created("Sales order", &id);
            if let Some(so) = erp.state().sales_orders.iter().find(|so| so.id == id) {
                println!("  credit {}", so.credit_status);
            }
        }
    }
    Ok(())
}

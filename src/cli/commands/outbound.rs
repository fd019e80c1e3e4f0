//! Invoicing, packaging and dispatch commands

use anyhow::Result;
use clap::Subcommand;

use super::date_arg;
use crate::cli::context::Session;
use crate::cli::ui;
use crate::domain::{DispatchStatus, ModuleKey, Page};
use crate::workflow::finance::{InvoiceForm, PaymentForm};
use crate::workflow::logistics::{DispatchForm, LabelForm, PackingSlipForm};

#[derive(Subcommand, Debug)]
pub enum InvoicingCommands {
    /// Raise an invoice
    Invoice {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        amount: f64,
        #[arg(long, value_parser = date_arg)]
        due_date: String,
    },
    /// Post a payment against an invoice
    Payment {
        #[arg(long)]
        invoice_id: String,
        #[arg(long)]
        amount: f64,
        #[arg(long, default_value = "Bank Transfer")]
        mode: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PackagingCommands {
    /// Create a packing slip
    Slip {
        #[arg(long)]
        batch: String,
        #[arg(long)]
        customer: String,
        #[arg(long)]
        weight: f64,
    },
    /// Generate a label
    Label {
        #[arg(long)]
        batch: String,
        #[arg(long)]
        spec: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DispatchCommands {
    /// Create a dispatch order
    Order {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        vehicle: String,
        #[arg(long, value_parser = date_arg)]
        eta: String,
    },
    /// Update the status of a dispatch
    Track {
        dispatch_id: String,
        /// OPEN, IN_TRANSIT or DELIVERED
        #[arg(long)]
        status: DispatchStatus,
        #[arg(long)]
        note: Option<String>,
    },
}

pub fn run_invoicing(session: &mut Session, command: InvoicingCommands) -> Result<()> {
    let erp = &mut session.erp;
    match command {
        InvoicingCommands::Invoice {
            customer,
            amount,
            due_date,
        } => {
            erp.require_access(ModuleKey::Invoicing, Page::Invoices)?;
            let id = erp.add_invoice(InvoiceForm {
                customer,
                amount,
                due_date,
            })?;
            ui::created("Invoice", &id);
        }
        InvoicingCommands::Payment {
            invoice_id,
            amount,
            mode,
        } => {
            erp.require_access(ModuleKey::Invoicing, Page::Payments)?;
            let id = erp.add_payment(PaymentForm {
                invoice_id,
                amount,
                mode,
            })?;
            ui::created("Payment", &id);
        }
    }
    Ok(())
}

pub fn run_packaging(session: &mut Session, command: PackagingCommands) -> Result<()> {
    let erp = &mut session.erp;
    match command {
        PackagingCommands::Slip {
            batch,
            customer,
            weight,
        } => {
            erp.require_access(ModuleKey::Packaging, Page::PackingSlips)?;
            let id = erp.add_packing_slip(PackingSlipForm {
                batch,
                customer,
                weight,
            })?;
            ui::created("Packing slip", &id);
        }
        PackagingCommands::Label { batch, spec } => {
            erp.require_access(ModuleKey::Packaging, Page::Labels)?;
            let id = erp.add_label(LabelForm { batch, spec })?;
            ui::created("Label", &id);
        }
    }
    Ok(())
}

pub fn run_dispatch(session: &mut Session, command: DispatchCommands) -> Result<()> {
    let erp = &mut session.erp;
    match command {
        DispatchCommands::Order {
            customer,
            vehicle,
            eta,
        } => {
            erp.require_access(ModuleKey::Dispatch, Page::DispatchOrders)?;
            let id = erp.add_dispatch_order(DispatchForm {
                customer,
                vehicle,
                eta,
            })?;
            ui::created("Dispatch order", &id);
        }
        DispatchCommands::Track {
            dispatch_id,
            status,
            note,
        } => {
            erp.require_access(ModuleKey::Dispatch, Page::Tracking)?;
            erp.update_tracking(&dispatch_id, status, note)?;
            ui::success(&format!("Dispatch {} is now {}", dispatch_id, status));
        }
    }
    Ok(())
}

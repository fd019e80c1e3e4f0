//! Pre-processing, inspection and size-reduction commands

use anyhow::Result;
use clap::Subcommand;

use crate::cli::context::Session;
use crate::cli::ui;
use crate::domain::{ModuleKey, Page, QcStatus};
use crate::workflow::inspection::QcForm;
use crate::workflow::production::{BatchIntakeForm, JobCardForm, MachineLogForm, WashSortForm};

#[derive(Subcommand, Debug)]
pub enum PreProcessingCommands {
    /// Record a raw material batch
    Intake {
        #[arg(long)]
        batch: String,
        #[arg(long)]
        input_qty: f64,
    },
    /// Record the wash and sort stage of a batch
    WashSort {
        #[arg(long)]
        batch: String,
        #[arg(long)]
        sorted_qty: f64,
        #[arg(long)]
        rejected_qty: f64,
    },
}

#[derive(Subcommand, Debug)]
pub enum InspectionCommands {
    /// Submit a QC report; a FAILED report raises an NCR
    Qc {
        #[arg(long)]
        batch: String,
        #[arg(long)]
        moisture: f64,
        #[arg(long)]
        color: String,
        /// PASSED or FAILED
        #[arg(long)]
        status: QcStatus,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProductionCommands {
    /// Create a size-reduction job card
    JobCard {
        #[arg(long)]
        batch: String,
        #[arg(long)]
        machine: String,
        #[arg(long)]
        input_qty: f64,
        #[arg(long)]
        output_qty: f64,
        /// Sales order the batch is produced for
        #[arg(long)]
        sales_order: Option<String>,
    },
    /// Log machine downtime
    MachineLog {
        #[arg(long)]
        machine: String,
        #[arg(long)]
        downtime_mins: u32,
        #[arg(long)]
        reason: String,
    },
}

pub fn run_pre_processing(session: &mut Session, command: PreProcessingCommands) -> Result<()> {
    let erp = &mut session.erp;
    match command {
        PreProcessingCommands::Intake { batch, input_qty } => {
            erp.require_access(ModuleKey::PreProcessing, Page::BatchIntake)?;
            let id = erp.add_batch_intake(BatchIntakeForm { batch, input_qty })?;
            ui::created("Batch intake", &id);
        }
        PreProcessingCommands::WashSort {
            batch,
            sorted_qty,
            rejected_qty,
        } => {
            erp.require_access(ModuleKey::PreProcessing, Page::WashSort)?;
            let id = erp.add_wash_sort(WashSortForm {
                batch,
                sorted_qty,
                rejected_qty,
            })?;
            ui::created("Wash & sort record", &id);
        }
    }
    Ok(())
}

pub fn run_inspection(session: &mut Session, command: InspectionCommands) -> Result<()> {
    let erp = &mut session.erp;
    match command {
        InspectionCommands::Qc {
            batch,
            moisture,
            color,
            status,
        } => {
            erp.require_access(ModuleKey::Inspection, Page::QcEntry)?;
            let id = erp.add_qc_report(QcForm {
                batch,
                moisture,
                color,
                status,
            })?;
            ui::created("QC report", &id);
            if let Some(ncr) = erp.state().ncr.iter().find(|n| n.qc_id == id) {
                ui::warning(&format!("NCR {} raised: {}", ncr.id, ncr.root_cause));
            }
        }
    }
    Ok(())
}

pub fn run_production(session: &mut Session, command: ProductionCommands) -> Result<()> {
    let erp = &mut session.erp;
    match command {
        ProductionCommands::JobCard {
            batch,
            machine,
            input_qty,
            output_qty,
            sales_order,
        } => {
            erp.require_access(ModuleKey::SizeReduction, Page::JobCards)?;
            let id = erp.add_job_card(JobCardForm {
                batch,
                machine,
                input_qty,
                output_qty,
                sales_order_id: sales_order,
            })?;
            ui::created("Job card", &id);
        }
        ProductionCommands::MachineLog {
            machine,
            downtime_mins,
            reason,
        } => {
            erp.require_access(ModuleKey::SizeReduction, Page::MachineLogs)?;
            let id = erp.add_machine_log(MachineLogForm {
                machine,
                downtime_mins,
                reason,
            })?;
            ui::created("Machine log", &id);
        }
    }
    Ok(())
}

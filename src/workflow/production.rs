//! Pre-processing and size-reduction shop floor entries

use crate::domain::*;

use super::{Erp, WorkflowError, WorkflowResult, non_negative, required, snapshot};

const INTAKE_STAGE: &str = "Batch Intake";

#[derive(Debug, Clone)]
pub struct BatchIntakeForm {
    pub batch: String,
    pub input_qty: f64,
}

#[derive(Debug, Clone)]
pub struct WashSortForm {
    pub batch: String,
    pub sorted_qty: f64,
    pub rejected_qty: f64,
}

#[derive(Debug, Clone)]
pub struct JobCardForm {
    pub batch: String,
    pub machine: String,
    pub input_qty: f64,
    pub output_qty: f64,
    pub sales_order_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MachineLogForm {
    pub machine: String,
    pub downtime_mins: u32,
    pub reason: String,
}

impl Erp {
    pub fn add_batch_intake(&mut self, form: BatchIntakeForm) -> WorkflowResult<String> {
        let intake = BatchIntake {
            id: self.next_id("PRE"),
            batch: required("batch", &form.batch)?,
            stage: INTAKE_STAGE.to_string(),
            input_qty: non_negative("input qty", form.input_qty)?,
            status: StageStatus::Open,
        };
        let id = intake.id.clone();
        let new_value = snapshot(&intake);
        self.state.pre_processing.insert(0, intake);
        self.audit(AuditAction::Create, "pre_processing", &id, None, new_value);
        Ok(id)
    }

    pub fn add_wash_sort(&mut self, form: WashSortForm) -> WorkflowResult<String> {
        let record = WashSort {
            id: self.next_id("WS"),
            batch: required("batch", &form.batch)?,
            sorted_qty: non_negative("sorted qty", form.sorted_qty)?,
            rejected_qty: non_negative("rejected qty", form.rejected_qty)?,
            status: StageStatus::Completed,
        };
        let id = record.id.clone();
        let new_value = snapshot(&record);
        self.state.wash_sort.insert(0, record);
        self.audit(AuditAction::Create, "wash_sort", &id, None, new_value);
        Ok(id)
    }

    /// Records a machine run; an optional sales order ties it back to the order book
    pub fn add_job_card(&mut self, form: JobCardForm) -> WorkflowResult<String> {
        let sales_order_id = form
            .sales_order_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if let Some(so) = sales_order_id.as_deref() {
            if !self.state.sales_orders.iter().any(|o| o.id == so) {
                return Err(WorkflowError::not_found("sales order", so));
            }
        }

        let card = JobCard {
            id: self.next_id("JOB"),
            batch: required("batch", &form.batch)?,
            machine: required("machine", &form.machine)?,
            input_qty: non_negative("input qty", form.input_qty)?,
            output_qty: non_negative("output qty", form.output_qty)?,
            sales_order_id,
            status: StageStatus::Open,
        };
        let id = card.id.clone();
        let new_value = snapshot(&card);
        self.state.job_cards.insert(0, card);
        self.audit(AuditAction::Create, "job_card", &id, None, new_value);
        Ok(id)
    }

    pub fn add_machine_log(&mut self, form: MachineLogForm) -> WorkflowResult<String> {
        let log_entry = MachineLog {
            id: self.next_id("MLOG"),
            machine: required("machine", &form.machine)?,
            downtime_mins: form.downtime_mins,
            reason: required("reason", &form.reason)?,
            status: MachineLogStatus::Recorded,
        };
        let id = log_entry.id.clone();
        let new_value = snapshot(&log_entry);
        self.state.machine_logs.insert(0, log_entry);
        self.audit(AuditAction::Create, "machine_log", &id, None, new_value);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::workflow::{Actor, WorkflowPolicy};

    fn erp() -> Erp {
        Erp::with_seed(AppState::default(), Actor::guest(), WorkflowPolicy::default(), 8)
    }

    #[test]
    fn test_batch_intake_stage_and_status() {
        let mut erp = erp();
        let id = erp
            .add_batch_intake(BatchIntakeForm {
                batch: "B-201".to_string(),
                input_qty: 800.0,
            })
            .unwrap();
        let intake = &erp.state().pre_processing[0];
        assert_eq!(intake.id, id);
        assert!(id.starts_with("PRE-"));
        assert_eq!(intake.stage, "Batch Intake");
        assert_eq!(intake.status, StageStatus::Open);
    }

    #[test]
    fn test_job_card_unknown_sales_order() {
        let mut erp = erp();
        let err = erp
            .add_job_card(JobCardForm {
                batch: "B-1".to_string(),
                machine: "Pulverizer-2".to_string(),
                input_qty: 100.0,
                output_qty: 92.0,
                sales_order_id: Some("SO-MISSING".to_string()),
            })
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound { .. }));

        let id = erp
            .add_job_card(JobCardForm {
                batch: "B-1".to_string(),
                machine: "Pulverizer-2".to_string(),
                input_qty: 100.0,
                output_qty: 92.0,
                sales_order_id: Some(String::new()),
            })
            .unwrap();
        assert_eq!(erp.state().job_cards[0].id, id);
        assert_eq!(erp.state().job_cards[0].sales_order_id, None);
    }
}

use crate::domain::*;

use super::{Erp, WorkflowResult, non_negative, required, snapshot};

const NCR_ROOT_CAUSE: &str = "Parameter out of range";

#[derive(Debug, Clone)]
pub struct QcForm {
    pub batch: String,
    pub moisture: f64,
    pub color: String,
    pub status: QcStatus,
}

impl Erp {
    /// Records a QC result; a failure raises exactly one NCR against it
    pub fn add_qc_report(&mut self, form: QcForm) -> WorkflowResult<String> {
        let report = QcReport {
            id: self.next_id("QC"),
            batch: required("batch", &form.batch)?,
            moisture: non_negative("moisture", form.moisture)?,
            color: required("color", &form.color)?,
            status: form.status,
        };
        let id = report.id.clone();
        let new_value = snapshot(&report);
        self.state.qc_reports.insert(0, report);
        self.audit(AuditAction::Create, "qc", &id, None, new_value);

        if form.status == QcStatus::Failed {
            self.raise_ncr(&id);
        }
        Ok(id)
    }

    fn raise_ncr(&mut self, qc_id: &str) {
        let ncr = Ncr {
            id: self.next_id("NCR"),
            qc_id: qc_id.to_string(),
            root_cause: NCR_ROOT_CAUSE.to_string(),
            status: NcrStatus::Open,
        };
        let id = ncr.id.clone();
        log::warn!("QC {} failed, raised {}", qc_id, id);
        let new_value = snapshot(&ncr);
        self.state.ncr.insert(0, ncr);
        self.audit(AuditAction::Create, "ncr", &id, None, new_value);
    }
}

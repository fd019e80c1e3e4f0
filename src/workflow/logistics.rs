//! Packaging and dispatch actions

use crate::domain::*;

use super::{Erp, WorkflowError, WorkflowResult, non_negative, required, snapshot};

#[derive(Debug, Clone)]
pub struct PackingSlipForm {
    pub batch: String,
    pub customer: String,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct LabelForm {
    pub batch: String,
    pub spec: String,
}

#[derive(Debug, Clone)]
pub struct DispatchForm {
    pub customer: String,
    pub vehicle: String,
    pub eta: String,
}

impl Erp {
    pub fn add_packing_slip(&mut self, form: PackingSlipForm) -> WorkflowResult<String> {
        let slip = PackingSlip {
            id: self.next_id("PKG"),
            batch: required("batch", &form.batch)?,
            customer: required("customer", &form.customer)?,
            weight: non_negative("weight", form.weight)?,
            status: PackingSlipStatus::Ready,
        };
        let id = slip.id.clone();
        let new_value = snapshot(&slip);
        self.state.packing_slips.insert(0, slip);
        self.audit(AuditAction::Create, "packing_slip", &id, None, new_value.clone());
        self.generate_document(DocumentType::PackingSlip, "packing_slip", &id, new_value.as_ref());
        Ok(id)
    }

    pub fn add_label(&mut self, form: LabelForm) -> WorkflowResult<String> {
        let label = Label {
            id: self.next_id("LBL"),
            batch: required("batch", &form.batch)?,
            spec: required("label spec", &form.spec)?,
            status: LabelStatus::Generated,
        };
        let id = label.id.clone();
        let new_value = snapshot(&label);
        self.state.labels.insert(0, label);
        self.audit(AuditAction::Create, "label", &id, None, new_value);
        Ok(id)
    }

    pub fn add_dispatch_order(&mut self, form: DispatchForm) -> WorkflowResult<String> {
        let order = DispatchOrder {
            id: self.next_id("DSP"),
            customer: required("customer", &form.customer)?,
            vehicle: required("vehicle", &form.vehicle)?,
            eta: required("eta", &form.eta)?,
            status: DispatchStatus::Open,
            tracking_note: None,
        };
        let id = order.id.clone();
        let new_value = snapshot(&order);
        self.state.dispatch_orders.insert(0, order);
        self.audit(AuditAction::Create, "dispatch", &id, None, new_value);
        Ok(id)
    }

    /// Moves a dispatch along and stores the latest tracking note
    pub fn update_tracking(
        &mut self,
        dispatch_id: &str,
        status: DispatchStatus,
        note: Option<String>,
    ) -> WorkflowResult<()> {
        let order = self
            .state
            .dispatch_orders
            .iter_mut()
            .find(|d| d.id == dispatch_id)
            .ok_or_else(|| WorkflowError::not_found("dispatch order", dispatch_id))?;

        let old_value = snapshot(&*order);
        order.status = status;
        order.tracking_note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let new_value = snapshot(&*order);
        self.audit(AuditAction::Update, "dispatch", dispatch_id, old_value, new_value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::workflow::{Actor, WorkflowPolicy};

    fn erp() -> Erp {
        Erp::with_seed(AppState::default(), Actor::guest(), WorkflowPolicy::default(), 21)
    }

    #[test]
    fn test_tracking_update_is_audited() {
        let mut erp = erp();
        let id = erp
            .add_dispatch_order(DispatchForm {
                customer: "AgriNova Exports".to_string(),
                vehicle: "MH-12-AB-1234".to_string(),
                eta: "2026-03-10".to_string(),
            })
            .unwrap();
        erp.update_tracking(&id, DispatchStatus::InTransit, Some("Left Nashik".to_string()))
            .unwrap();

        let order = &erp.state().dispatch_orders[0];
        assert_eq!(order.status, DispatchStatus::InTransit);
        assert_eq!(order.tracking_note.as_deref(), Some("Left Nashik"));

        let entry = &erp.state().audit_logs[0];
        assert_eq!(entry.action, AuditAction::Update);
        assert_eq!(entry.entity_id, id);
        assert_eq!(entry.old_value.as_ref().unwrap()["status"], "OPEN");
        assert_eq!(entry.new_value.as_ref().unwrap()["status"], "IN_TRANSIT");
    }

    #[test]
    fn test_tracking_unknown_dispatch() {
        let mut erp = erp();
        let err = erp
            .update_tracking("DSP-XXXXXX", DispatchStatus::Delivered, None)
            .unwrap_err();
        assert_eq!(err, WorkflowError::not_found("dispatch order", "DSP-XXXXXX"));
    }

    #[test]
    fn test_packing_slip_generates_document() {
        let mut erp = erp();
        let id = erp
            .add_packing_slip(PackingSlipForm {
                batch: "B-9".to_string(),
                customer: "SunDry Foods".to_string(),
                weight: 480.5,
            })
            .unwrap();
        let doc = &erp.state().documents[0];
        assert_eq!(doc.doc_type, DocumentType::PackingSlip);
        assert_eq!(doc.reference_id, id);
        assert_eq!(doc.hash.len(), 12);
    }
}

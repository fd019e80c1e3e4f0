use crate::domain::*;

use super::{Erp, WorkflowError, WorkflowResult, non_negative, required, snapshot};

const DEFAULT_VENDOR_RATING: f64 = 4.0;

#[derive(Debug, Clone)]
pub struct RequisitionForm {
    pub material: String,
    pub qty: f64,
    pub required_by: String,
}

#[derive(Debug, Clone)]
pub struct VendorForm {
    pub name: String,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct GrnForm {
    pub vendor: String,
    pub material: String,
    pub batch_tag: String,
    /// Received material waits for QC release
    pub qc_hold: bool,
}

impl Erp {
    pub fn add_purchase_requisition(&mut self, form: RequisitionForm) -> WorkflowResult<String> {
        let requisition = PurchaseRequisition {
            id: self.next_id("PRQ"),
            material: required("material", &form.material)?,
            qty: non_negative("qty", form.qty)?,
            required_by: required("required by", &form.required_by)?,
            status: RequisitionStatus::Pending,
        };
        let id = requisition.id.clone();
        let new_value = snapshot(&requisition);
        self.state.purchase_requisitions.insert(0, requisition);
        self.audit(AuditAction::Create, "purchase_requisition", &id, None, new_value);
        Ok(id)
    }

    pub fn add_vendor(&mut self, form: VendorForm) -> WorkflowResult<String> {
        let rating = form.rating.unwrap_or(DEFAULT_VENDOR_RATING);
        if !(0.0..=5.0).contains(&rating) {
            return Err(WorkflowError::InvalidInput(format!(
                "vendor rating {} is outside 0-5",
                rating
            )));
        }
        let vendor = Vendor {
            id: self.next_id("VND"),
            name: required("vendor name", &form.name)?,
            rating,
            status: ActiveStatus::Active,
        };
        let id = vendor.id.clone();
        let new_value = snapshot(&vendor);
        self.state.vendors.insert(0, vendor);
        self.audit(AuditAction::Create, "vendor", &id, None, new_value);
        Ok(id)
    }

    pub fn add_grn(&mut self, form: GrnForm) -> WorkflowResult<String> {
        let grn = Grn {
            id: self.next_id("GRN"),
            vendor: required("vendor", &form.vendor)?,
            material: required("material", &form.material)?,
            batch_tag: required("batch tag", &form.batch_tag)?,
            status: if form.qc_hold {
                GrnStatus::Hold
            } else {
                GrnStatus::Released
            },
        };
        let id = grn.id.clone();
        let new_value = snapshot(&grn);
        self.state.grn.insert(0, grn);
        self.audit(AuditAction::Create, "grn", &id, None, new_value);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::workflow::{Actor, WorkflowPolicy};

    fn erp() -> Erp {
        Erp::with_seed(AppState::default(), Actor::guest(), WorkflowPolicy::default(), 2)
    }

    #[test]
    fn test_grn_qc_hold() {
        let mut erp = erp();
        let held = erp
            .add_grn(GrnForm {
                vendor: "FreshFarm Inputs".to_string(),
                material: "Raw Onion".to_string(),
                batch_tag: "B-101".to_string(),
                qc_hold: true,
            })
            .unwrap();
        let released = erp
            .add_grn(GrnForm {
                vendor: "HarvestLink".to_string(),
                material: "Raw Garlic".to_string(),
                batch_tag: "B-102".to_string(),
                qc_hold: false,
            })
            .unwrap();

        let grn = &erp.state().grn;
        assert_eq!(grn[0].id, released);
        assert_eq!(grn[0].status, GrnStatus::Released);
        assert_eq!(grn[1].id, held);
        assert_eq!(grn[1].status, GrnStatus::Hold);
        assert_eq!(erp.state().audit_logs[0].actor, "guest");
        assert_eq!(erp.state().audit_logs[0].role, "Unknown");
    }

    #[test]
    fn test_vendor_rating_defaults_to_four() {
        let mut erp = erp();
        erp.add_vendor(VendorForm {
            name: "Valley Agro".to_string(),
            rating: None,
        })
        .unwrap();
        assert_eq!(erp.state().vendors[0].rating, 4.0);

        let err = erp
            .add_vendor(VendorForm {
                name: "Bad".to_string(),
                rating: Some(9.0),
            })
            .unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidInput(_)));
    }

    #[test]
    fn test_requisition_rejects_negative_qty() {
        let mut erp = erp();
        let err = erp
            .add_purchase_requisition(RequisitionForm {
                material: "Raw Onion".to_string(),
                qty: -5.0,
                required_by: "2026-04-01".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidInput(_)));
        assert!(erp.state().audit_logs.is_empty());
    }
}

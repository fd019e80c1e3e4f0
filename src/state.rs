//! The application aggregate
//!
//! One owned value holds every record sequence plus the UI cursor. The
//! whole aggregate is what gets persisted; missing fields in a stored
//! snapshot fall back to empty so older documents still load.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::*;

/// Cursor of the rendered screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub active_module: ModuleKey,
    pub active_page: Page,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_user_id: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_module: ModuleKey::SuperAdmin,
            active_page: Page::Dashboard,
            selected_user_id: None,
        }
    }
}

/// Sequences are kept newest first, matching the stored document layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub ui: UiState,
    pub app_users: Vec<AppUser>,
    pub enquiries: Vec<Enquiry>,
    pub quotations: Vec<Quotation>,
    pub work_orders: Vec<WorkOrder>,
    pub sales_orders: Vec<SalesOrder>,
    pub purchase_requisitions: Vec<PurchaseRequisition>,
    pub vendors: Vec<Vendor>,
    pub grn: Vec<Grn>,
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub bom: Vec<Bom>,
    pub pre_processing: Vec<BatchIntake>,
    pub wash_sort: Vec<WashSort>,
    pub qc_reports: Vec<QcReport>,
    pub ncr: Vec<Ncr>,
    pub job_cards: Vec<JobCard>,
    pub machine_logs: Vec<MachineLog>,
    pub invoices: Vec<Invoice>,
    pub payments: Vec<Payment>,
    pub packing_slips: Vec<PackingSlip>,
    pub labels: Vec<Label>,
    pub dispatch_orders: Vec<DispatchOrder>,
    pub notifications: Vec<Notification>,
    pub audit_logs: Vec<AuditEntry>,
    pub documents: Vec<Document>,
}

impl AppState {
    pub fn from_json(raw: &str) -> Result<Self> {
        let mut state: AppState =
            serde_json::from_str(raw).context("Failed to parse stored ERP state")?;
        state.normalize();
        Ok(state)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let mut state: AppState =
            serde_json::from_value(value).context("Failed to parse stored ERP state")?;
        state.normalize();
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize ERP state")
    }

    /// Repairs invariants a hand-edited or older snapshot may violate
    pub fn normalize(&mut self) {
        for user in &mut self.app_users {
            user.permissions.normalize();
        }
        if !self.ui.active_module.pages().contains(&self.ui.active_page) {
            self.ui.active_page = self.ui.active_module.first_page();
        }
    }

    pub fn find_user(&self, id: &str) -> Option<&AppUser> {
        self.app_users.iter().find(|u| u.id == id)
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<&AppUser> {
        self.app_users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }

    pub fn work_order_for(&self, quotation_id: &str) -> Option<&WorkOrder> {
        self.work_orders
            .iter()
            .find(|w| w.quotation_id == quotation_id)
    }

    /// Whether any record sequence already uses this id
    pub fn id_taken(&self, id: &str) -> bool {
        fn has<T>(items: &[T], id: &str, key: impl Fn(&T) -> &str) -> bool {
            items.iter().any(|item| key(item) == id)
        }

        has(&self.app_users, id, |x| x.id.as_str())
            || has(&self.enquiries, id, |x| x.id.as_str())
            || has(&self.quotations, id, |x| x.id.as_str())
            || has(&self.work_orders, id, |x| x.id.as_str())
            || has(&self.sales_orders, id, |x| x.id.as_str())
            || has(&self.purchase_requisitions, id, |x| x.id.as_str())
            || has(&self.vendors, id, |x| x.id.as_str())
            || has(&self.grn, id, |x| x.id.as_str())
            || has(&self.products, id, |x| x.id.as_str())
            || has(&self.customers, id, |x| x.id.as_str())
            || has(&self.bom, id, |x| x.id.as_str())
            || has(&self.pre_processing, id, |x| x.id.as_str())
            || has(&self.wash_sort, id, |x| x.id.as_str())
            || has(&self.qc_reports, id, |x| x.id.as_str())
            || has(&self.ncr, id, |x| x.id.as_str())
            || has(&self.job_cards, id, |x| x.id.as_str())
            || has(&self.machine_logs, id, |x| x.id.as_str())
            || has(&self.invoices, id, |x| x.id.as_str())
            || has(&self.payments, id, |x| x.id.as_str())
            || has(&self.packing_slips, id, |x| x.id.as_str())
            || has(&self.labels, id, |x| x.id.as_str())
            || has(&self.dispatch_orders, id, |x| x.id.as_str())
            || has(&self.notifications, id, |x| x.id.as_str())
            || has(&self.audit_logs, id, |x| x.id.as_str())
            || has(&self.documents, id, |x| x.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let state = AppState::from_json(r#"{"enquiries": []}"#).unwrap();
        assert!(state.quotations.is_empty());
        assert_eq!(state.ui, UiState::default());
    }

    #[test]
    fn test_loads_document_written_by_web_front_end() {
        let raw = r#"{
            "ui": { "activeModule": "sales", "activePage": "Quotations" },
            "appUsers": [{
                "id": "USR-AB12CD", "name": "Sales Lead", "email": "sales@factory.com",
                "role": "Sales Manager", "status": "ACTIVE",
                "permissions": { "sales": { "enabled": true, "pages": { "Enquiries": true, "Quotations": true, "Sales Orders": true } } }
            }],
            "currentRole": "Super Admin",
            "enquiries": [{
                "id": "ENQ-1001", "customer": "SunDry Foods", "product": "Dehydrated Onion Flakes",
                "qty": 5000, "deliveryDate": "2026-03-02", "aiScore": 81, "status": "OPEN"
            }],
            "dispatchOrders": [{ "id": "DSP-X1", "customer": "SunDry Foods", "vehicle": "Pending", "eta": "2026-03-03", "status": "OPEN" }]
        }"#;
        let state = AppState::from_json(raw).unwrap();
        assert_eq!(state.ui.active_module, ModuleKey::Sales);
        assert_eq!(state.enquiries[0].qty, 5000.0);
        assert_eq!(state.enquiries[0].status, EnquiryStatus::Open);
        assert!(state.app_users[0].permissions.module(ModuleKey::Dispatch).is_some());
        assert!(state.dispatch_orders[0].tracking_note.is_none());
        assert!(state.id_taken("ENQ-1001"));
        assert!(!state.id_taken("ENQ-9999"));
    }

    #[test]
    fn test_normalize_repairs_mismatched_cursor() {
        let mut state = AppState::default();
        state.ui.active_module = ModuleKey::Inspection;
        state.ui.active_page = Page::Invoices;
        state.normalize();
        assert_eq!(state.ui.active_page, Page::QcEntry);
    }
}

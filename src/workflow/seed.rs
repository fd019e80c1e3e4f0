//! Demo data for a fresh plant

use serde_json::json;

use crate::domain::*;
use crate::state::AppState;

use super::Erp;

impl Erp {
    /// Replaces everything with the sample plant data set
    pub fn seed(&mut self) {
        log::info!("Seeding demo data");
        self.state = AppState::default();

        let admin = self.seed_user("Primary Admin", "admin@factory.com", Role::SuperAdmin);
        let sales = self.seed_user("Sales Lead", "sales@factory.com", Role::SalesManager);
        self.state.app_users = vec![admin, sales];

        self.state.products = vec![
            Product {
                id: self.next_id("PRD"),
                sku: "ONION-001".to_string(),
                name: "Dehydrated Onion Flakes".to_string(),
                uom: "kg".to_string(),
                status: ActiveStatus::Active,
            },
            Product {
                id: self.next_id("PRD"),
                sku: "GARLIC-001".to_string(),
                name: "Dehydrated Garlic Powder".to_string(),
                uom: "kg".to_string(),
                status: ActiveStatus::Active,
            },
        ];

        self.state.customers = vec![
            Customer {
                id: self.next_id("CUS"),
                name: "SunDry Foods".to_string(),
                currency: "INR".to_string(),
                status: ActiveStatus::Active,
            },
            Customer {
                id: self.next_id("CUS"),
                name: "AgriNova Exports".to_string(),
                currency: "USD".to_string(),
                status: ActiveStatus::Active,
            },
        ];

        self.state.vendors = vec![
            Vendor {
                id: self.next_id("VND"),
                name: "FreshFarm Inputs".to_string(),
                rating: 4.2,
                status: ActiveStatus::Active,
            },
            Vendor {
                id: self.next_id("VND"),
                name: "HarvestLink".to_string(),
                rating: 3.9,
                status: ActiveStatus::Active,
            },
        ];

        self.state.enquiries = vec![
            Enquiry {
                id: "ENQ-1001".to_string(),
                customer: "SunDry Foods".to_string(),
                product: "Dehydrated Onion Flakes".to_string(),
                qty: 5000.0,
                delivery_date: "2026-03-02".to_string(),
                ai_score: 81,
                status: EnquiryStatus::Open,
            },
            Enquiry {
                id: "ENQ-1002".to_string(),
                customer: "AgriNova Exports".to_string(),
                product: "Dehydrated Garlic Powder".to_string(),
                qty: 3200.0,
                delivery_date: "2026-02-27".to_string(),
                ai_score: 73,
                status: EnquiryStatus::FollowUp,
            },
        ];

        self.state.purchase_requisitions = vec![PurchaseRequisition {
            id: self.next_id("PRQ"),
            material: "Raw Onion".to_string(),
            qty: 12000.0,
            required_by: "2026-02-22".to_string(),
            status: RequisitionStatus::Pending,
        }];

        self.state.dispatch_orders = vec![DispatchOrder {
            id: self.next_id("DSP"),
            customer: "SunDry Foods".to_string(),
            vehicle: "Pending".to_string(),
            eta: "2026-03-03".to_string(),
            status: DispatchStatus::Open,
            tracking_note: None,
        }];

        let (module, page) = self.first_accessible();
        self.state.ui.active_module = module;
        self.state.ui.active_page = page;

        self.notify(
            "System Ready",
            "Modern module-based ERP initialized",
            Severity::Neutral,
        );
        self.audit(
            AuditAction::Seed,
            "system",
            "seed",
            None,
            Some(json!({ "ok": true })),
        );
    }

    fn seed_user(&mut self, name: &str, email: &str, role: Role) -> AppUser {
        AppUser {
            id: self.next_id("USR"),
            name: name.to_string(),
            email: email.to_string(),
            role,
            permissions: PermissionMatrix::for_role(role),
            status: UserStatus::Active,
        }
    }
}

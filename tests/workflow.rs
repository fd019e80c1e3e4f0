//! End-to-end flows through the workflow engine on seeded demo data

use agri_erp::analytics::{Analytics, Kpis};
use agri_erp::domain::*;
use agri_erp::state::AppState;
use agri_erp::workflow::admin::UserForm;
use agri_erp::workflow::finance::{InvoiceForm, PaymentForm};
use agri_erp::workflow::inspection::QcForm;
use agri_erp::workflow::logistics::{DispatchForm, LabelForm, PackingSlipForm};
use agri_erp::workflow::production::{BatchIntakeForm, JobCardForm, MachineLogForm, WashSortForm};
use agri_erp::workflow::purchase::{GrnForm, RequisitionForm, VendorForm};
use agri_erp::workflow::sales::EnquiryForm;
use agri_erp::workflow::{Actor, Erp, WorkflowError, WorkflowPolicy};

fn seeded(actor: &str, seed: u64) -> Erp {
    let mut erp = Erp::with_seed(
        AppState::default(),
        Actor::new(actor),
        WorkflowPolicy::default(),
        seed,
    );
    erp.seed();
    erp
}

fn enquiry(erp: &mut Erp) -> String {
    erp.create_enquiry(EnquiryForm {
        customer: "AgriNova Exports".to_string(),
        product: "Dehydrated Garlic Powder".to_string(),
        qty: 1200.0,
        delivery_date: "2026-11-30".to_string(),
        ai_score: Some(82),
    })
    .unwrap()
}

#[test]
fn test_enquiry_to_cash() {
    let policy = WorkflowPolicy {
        credit_hold_probability: 0.0,
        ..WorkflowPolicy::default()
    };
    let mut erp = Erp::with_seed(AppState::default(), Actor::new("admin@factory.com"), policy, 21);
    erp.seed();

    let enq = enquiry(&mut erp);
    let quo = erp.create_quotation(&enq, Some(8)).unwrap();
    assert_eq!(erp.state().quotations[0].status, QuotationStatus::Pending);
    assert!(matches!(
        erp.create_sales_order(&quo),
        Err(WorkflowError::NotApproved(_))
    ));

    erp.approve_quotation(&quo).unwrap();
    let so = erp.create_sales_order(&quo).unwrap();
    let order = &erp.state().sales_orders[0];
    assert_eq!(order.id, so);
    assert_eq!(order.credit_status, CreditStatus::Cleared);
    assert_eq!(order.qty, 1200.0);

    let job = erp
        .add_job_card(JobCardForm {
            batch: "B-2026-11".to_string(),
            machine: "Pulverizer-2".to_string(),
            input_qty: 1500.0,
            output_qty: 1200.0,
            sales_order_id: Some(so.clone()),
        })
        .unwrap();
    assert_eq!(erp.state().job_cards[0].id, job);

    let inv = erp
        .add_invoice(InvoiceForm {
            customer: "AgriNova Exports".to_string(),
            amount: 96000.0,
            due_date: "2026-12-15".to_string(),
        })
        .unwrap();
    erp.add_payment(PaymentForm {
        invoice_id: inv.clone(),
        amount: 96000.0,
        mode: "Bank Transfer".to_string(),
    })
    .unwrap();

    let dispatch = erp
        .add_dispatch_order(DispatchForm {
            customer: "AgriNova Exports".to_string(),
            vehicle: "MH12-AB-4410".to_string(),
            eta: "2026-12-01".to_string(),
        })
        .unwrap();
    erp.update_tracking(&dispatch, DispatchStatus::Delivered, Some("Signed by stores".to_string()))
        .unwrap();

    let state = erp.state();
    let delivered = state.dispatch_orders.iter().find(|d| d.id == dispatch).unwrap();
    assert_eq!(delivered.status, DispatchStatus::Delivered);
    assert_eq!(delivered.tracking_note.as_deref(), Some("Signed by stores"));

    // Every touched record leaves an audit trail under the acting user
    for id in [&enq, &quo, &so, &job, &inv, &dispatch] {
        assert!(
            state.audit_logs.iter().any(|a| &a.entity_id == id),
            "no audit entry for {}",
            id
        );
    }
    assert!(state.audit_logs.iter().all(|a| a.actor == "admin@factory.com"));
    assert!(state.audit_logs.iter().any(|a| a.action == AuditAction::Approve));

    let analytics = Analytics::compute(state);
    assert!(analytics.sales_billed >= 96000.0);
    assert!(analytics.collections >= 96000.0);
}

#[test]
fn test_quotation_margin_drives_approval() {
    let mut erp = seeded("admin@factory.com", 3);
    let enq = enquiry(&mut erp);

    let at_threshold = erp.create_quotation(&enq, Some(10)).unwrap();
    let below = erp.create_quotation(&enq, Some(9)).unwrap();
    let state = erp.state();
    let status = |id: &str| state.quotations.iter().find(|q| q.id == id).unwrap().status;
    assert_eq!(status(&at_threshold), QuotationStatus::Approved);
    assert_eq!(status(&below), QuotationStatus::Pending);

    // Requoting keeps the enquiry quoted and gives each quotation its own work order
    let quoted = state.enquiries.iter().find(|e| e.id == enq).unwrap();
    assert_eq!(quoted.status, EnquiryStatus::Quoted);
    assert!(state.work_order_for(&at_threshold).is_some());
    assert!(state.work_order_for(&below).is_some());

    erp.reject_quotation(&below).unwrap();
    assert!(erp.reject_quotation(&at_threshold).is_err());
    assert!(matches!(
        erp.create_sales_order(&below),
        Err(WorkflowError::NotApproved(_))
    ));
}

#[test]
fn test_failed_qc_raises_one_ncr_and_counts_on_dashboard() {
    let mut erp = seeded("admin@factory.com", 8);
    let before = Kpis::compute(erp.state());

    let passed = erp
        .add_qc_report(QcForm {
            batch: "B-77".to_string(),
            moisture: 6.1,
            color: "Cream".to_string(),
            status: QcStatus::Passed,
        })
        .unwrap();
    let failed = erp
        .add_qc_report(QcForm {
            batch: "B-78".to_string(),
            moisture: 11.4,
            color: "Brown".to_string(),
            status: QcStatus::Failed,
        })
        .unwrap();

    let state = erp.state();
    assert!(!state.ncr.iter().any(|n| n.qc_id == passed));
    assert_eq!(state.ncr.iter().filter(|n| n.qc_id == failed).count(), 1);

    let after = Kpis::compute(state);
    assert_eq!(after.qc_failures, before.qc_failures + 1);
}

#[test]
fn test_role_scopes_navigation() {
    let mut erp = seeded("sales@factory.com", 4);
    assert_eq!(erp.visible_modules(), vec![ModuleKey::Sales]);
    assert!(erp.can_access(ModuleKey::Sales, Page::Quotations));
    assert!(!erp.can_access(ModuleKey::SuperAdmin, Page::Users));
    assert!(matches!(
        erp.require_access(ModuleKey::Invoicing, Page::Invoices),
        Err(WorkflowError::AccessDenied { .. })
    ));
    assert!(erp.navigate(ModuleKey::SuperAdmin, Page::Dashboard).is_err());

    erp.fix_cursor();
    assert_eq!(erp.state().ui.active_module, ModuleKey::Sales);
    erp.navigate(ModuleKey::Sales, Page::SalesOrders).unwrap();
    assert_eq!(erp.state().ui.active_page, Page::SalesOrders);
}

#[test]
fn test_access_changes_apply_to_the_user() {
    let mut admin = seeded("admin@factory.com", 6);
    let sales_id = admin
        .state()
        .find_user_by_email("sales@factory.com")
        .unwrap()
        .id
        .clone();

    admin
        .set_page_access(&sales_id, ModuleKey::Sales, Page::Quotations, false)
        .unwrap();
    admin
        .set_module_access(&sales_id, ModuleKey::Dispatch, true)
        .unwrap();

    let mut sales = Erp::new(
        admin.state().clone(),
        Actor::new("sales@factory.com"),
        WorkflowPolicy::default(),
    );
    assert!(!sales.can_access(ModuleKey::Sales, Page::Quotations));
    assert!(sales.can_access(ModuleKey::Sales, Page::Enquiries));
    assert!(sales.visible_modules().contains(&ModuleKey::Dispatch));

    // A role change resets the matrix to the role default
    admin.update_user_role(&sales_id, Role::SalesManager).unwrap();
    sales.replace_state(admin.state().clone());
    assert!(sales.can_access(ModuleKey::Sales, Page::Quotations));
    assert!(!sales.visible_modules().contains(&ModuleKey::Dispatch));
}

#[test]
fn test_work_order_export_is_a_pdf() {
    let mut erp = seeded("admin@factory.com", 9);
    let enq = enquiry(&mut erp);
    let quo = erp.create_quotation(&enq, Some(15)).unwrap();

    let file = erp.download_work_order_pdf(&quo).unwrap();
    let wo = erp.state().work_order_for(&quo).unwrap();
    assert!(file.file_name.contains(&wo.work_order_no));
    assert!(file.file_name.ends_with(".pdf"));
    assert!(file.bytes.starts_with(b"%PDF-1.4"));
    assert!(file.bytes.ends_with(b"%%EOF\n") || file.bytes.ends_with(b"%%EOF"));

    assert!(erp.download_work_order_pdf("QUO-NOPE00").is_err());
}

/// Entries appended since `before`, newest first
fn new_entries(erp: &Erp, before: usize) -> &[AuditEntry] {
    let logs = &erp.state().audit_logs;
    &logs[..logs.len() - before]
}

fn assert_audited_once(erp: &Erp, before: usize, entity_id: &str) {
    let matching = new_entries(erp, before)
        .iter()
        .filter(|a| a.entity_id == entity_id)
        .count();
    assert_eq!(matching, 1, "expected one audit entry for {}", entity_id);
}

#[test]
fn test_every_action_audits_its_record_once() {
    let mut erp = seeded("admin@factory.com", 11);

    macro_rules! audited {
        ($action:expr) => {{
            let before = erp.state().audit_logs.len();
            let id = $action.unwrap();
            assert_audited_once(&erp, before, &id);
            id
        }};
        ($action:expr, $entity_id:expr) => {{
            let before = erp.state().audit_logs.len();
            $action.unwrap();
            assert_audited_once(&erp, before, &$entity_id);
        }};
    }

    // Sales
    let enq = audited!(erp.create_enquiry(EnquiryForm {
        customer: "AgriNova Exports".to_string(),
        product: "Dehydrated Onion Flakes".to_string(),
        qty: 800.0,
        delivery_date: "2026-12-10".to_string(),
        ai_score: None,
    }));
    let pending = audited!(erp.create_quotation(&enq, Some(4)));
    let rejected = audited!(erp.create_quotation(&enq, Some(3)));
    audited!(erp.approve_quotation(&pending), pending);
    audited!(erp.reject_quotation(&rejected), rejected);
    let so = audited!(erp.create_sales_order(&pending));

    // Approving again changes nothing and records nothing
    let before = erp.state().audit_logs.len();
    erp.approve_quotation(&pending).unwrap();
    assert_eq!(erp.state().audit_logs.len(), before);

    // Purchase
    audited!(erp.add_purchase_requisition(RequisitionForm {
        material: "Raw Onion".to_string(),
        qty: 2000.0,
        required_by: "2026-11-20".to_string(),
    }));
    audited!(erp.add_vendor(VendorForm {
        name: "Deccan Farms".to_string(),
        rating: Some(4.2),
    }));
    audited!(erp.add_grn(GrnForm {
        vendor: "Deccan Farms".to_string(),
        material: "Raw Onion".to_string(),
        batch_tag: "B-2026-40".to_string(),
        qc_hold: true,
    }));

    // Plant
    audited!(erp.add_batch_intake(BatchIntakeForm {
        batch: "B-2026-40".to_string(),
        input_qty: 2000.0,
    }));
    audited!(erp.add_wash_sort(WashSortForm {
        batch: "B-2026-40".to_string(),
        sorted_qty: 1900.0,
        rejected_qty: 100.0,
    }));
    audited!(erp.add_qc_report(QcForm {
        batch: "B-2026-40".to_string(),
        moisture: 12.8,
        color: "Brown".to_string(),
        status: QcStatus::Failed,
    }));
    audited!(erp.add_job_card(JobCardForm {
        batch: "B-2026-40".to_string(),
        machine: "Dryer-1".to_string(),
        input_qty: 1900.0,
        output_qty: 800.0,
        sales_order_id: Some(so),
    }));
    audited!(erp.add_machine_log(MachineLogForm {
        machine: "Dryer-1".to_string(),
        downtime_mins: 45,
        reason: "Belt change".to_string(),
    }));

    // Finance and logistics
    let inv = audited!(erp.add_invoice(InvoiceForm {
        customer: "AgriNova Exports".to_string(),
        amount: 52000.0,
        due_date: "2026-12-20".to_string(),
    }));
    audited!(erp.add_payment(PaymentForm {
        invoice_id: inv,
        amount: 52000.0,
        mode: "UPI".to_string(),
    }));
    audited!(erp.add_packing_slip(PackingSlipForm {
        batch: "B-2026-40".to_string(),
        customer: "AgriNova Exports".to_string(),
        weight: 800.0,
    }));
    audited!(erp.add_label(LabelForm {
        batch: "B-2026-40".to_string(),
        spec: "25 kg HDPE".to_string(),
    }));
    let dispatch = audited!(erp.add_dispatch_order(DispatchForm {
        customer: "AgriNova Exports".to_string(),
        vehicle: "MH14-CD-2201".to_string(),
        eta: "2026-12-12".to_string(),
    }));
    audited!(
        erp.update_tracking(&dispatch, DispatchStatus::InTransit, None),
        dispatch
    );

    // Admin
    let user = audited!(erp.add_user(UserForm {
        name: "Store Keeper".to_string(),
        email: "stores@factory.com".to_string(),
        role: Role::QcManager,
    }));
    audited!(erp.update_user_role(&user, Role::SalesManager), user);
    audited!(
        erp.set_module_access(&user, ModuleKey::Dispatch, true),
        format!("{}:{}", user, ModuleKey::Dispatch.key())
    );
    audited!(
        erp.set_page_access(&user, ModuleKey::Dispatch, Page::Tracking, false),
        format!(
            "{}:{}:{}",
            user,
            ModuleKey::Dispatch.key(),
            Page::Tracking.label()
        )
    );
}

//! Enquiry → quotation → work order / sales order

use chrono::{Duration, Utc};
use rand::Rng;

use crate::domain::*;

use super::{Erp, WorkflowError, WorkflowResult, non_negative, required, snapshot, today};

const WORK_ORDER_DOCUMENT_NO: &str = "PTPL/MIS/PPC/SWO/2024-25/V1";
const DEFAULT_AI_SCORE: u32 = 70;

#[derive(Debug, Clone)]
pub struct EnquiryForm {
    pub customer: String,
    pub product: String,
    pub qty: f64,
    pub delivery_date: String,
    pub ai_score: Option<u32>,
}

impl Erp {
    pub fn create_enquiry(&mut self, form: EnquiryForm) -> WorkflowResult<String> {
        let enquiry = Enquiry {
            id: self.next_id("ENQ"),
            customer: required("customer", &form.customer)?,
            product: required("product", &form.product)?,
            qty: non_negative("qty", form.qty)?,
            delivery_date: required("delivery date", &form.delivery_date)?,
            ai_score: form.ai_score.unwrap_or(DEFAULT_AI_SCORE),
            status: EnquiryStatus::Open,
        };
        let id = enquiry.id.clone();
        let new_value = snapshot(&enquiry);
        self.state.enquiries.insert(0, enquiry);
        self.audit(AuditAction::Create, "enquiry", &id, None, new_value);
        self.notify("Enquiry Added", &format!("{} created", id), Severity::Neutral);
        Ok(id)
    }

    /// Prices an enquiry; also issues its work order
    ///
    /// Without an explicit margin one is drawn between 6 and 20 percent.
    pub fn create_quotation(
        &mut self,
        enquiry_id: &str,
        margin: Option<u32>,
    ) -> WorkflowResult<String> {
        let enquiry = self
            .state
            .enquiries
            .iter()
            .find(|e| e.id == enquiry_id)
            .cloned()
            .ok_or_else(|| WorkflowError::not_found("enquiry", enquiry_id))?;

        let margin = margin.unwrap_or_else(|| self.rng.gen_range(6..=20));
        let status = if margin >= self.policy.auto_approve_margin {
            QuotationStatus::Approved
        } else {
            QuotationStatus::Pending
        };
        let validity = Duration::days(self.policy.quotation_validity_days);
        let expires_on = (Utc::now().date_naive() + validity)
            .format("%Y-%m-%d")
            .to_string();

        let quotation = Quotation {
            id: self.next_id("QUO"),
            enquiry_id: enquiry.id.clone(),
            customer: enquiry.customer.clone(),
            product: enquiry.product.clone(),
            qty: enquiry.qty,
            margin,
            status,
            expires_on,
        };
        let id = quotation.id.clone();
        self.state.quotations.insert(0, quotation.clone());
        log::info!("Quotation {} for {} at {}% margin ({})", id, enquiry.id, margin, status);

        self.mark_enquiry_quoted(&enquiry.id);
        self.create_work_order(&quotation, &enquiry);

        let new_value = snapshot(&quotation);
        self.generate_document(DocumentType::Quotation, "quotation", &id, new_value.as_ref());
        self.audit(AuditAction::Create, "quotation", &id, None, new_value);

        let severity = if status == QuotationStatus::Approved {
            Severity::Neutral
        } else {
            Severity::Warn
        };
        self.notify("Quotation Created", &format!("{} created", id), severity);
        Ok(id)
    }

    fn mark_enquiry_quoted(&mut self, enquiry_id: &str) {
        let Some(enquiry) = self.state.enquiries.iter_mut().find(|e| e.id == enquiry_id) else {
            return;
        };
        if enquiry.status == EnquiryStatus::Quoted {
            return;
        }
        let old_value = snapshot(&*enquiry);
        enquiry.status = EnquiryStatus::Quoted;
        let new_value = snapshot(&*enquiry);
        self.audit(AuditAction::Update, "enquiry", enquiry_id, old_value, new_value);
    }

    fn create_work_order(&mut self, quotation: &Quotation, enquiry: &Enquiry) -> String {
        let suffix = quotation
            .id
            .strip_prefix("QUO-")
            .unwrap_or(&quotation.id);
        let work_order = WorkOrder {
            id: self.next_id("WO"),
            quotation_id: quotation.id.clone(),
            work_order_no: format!("PTPL-{}", suffix),
            date: today(),
            document_no: WORK_ORDER_DOCUMENT_NO.to_string(),
            client_name: quotation.customer.clone(),
            enquiry_promoter: "PTPL/ HO/ Padma".to_string(),
            dispatch_due_date: enquiry.delivery_date.clone(),
            enquiry_type: "Sales Enquiry".to_string(),
            courier_name: "To be assigned".to_string(),
            product_name: quotation.product.clone(),
            quantity_gm: quotation.qty,
            hsn_sac: "N/A".to_string(),
            product_size: "Standard".to_string(),
            specific_requirements: "As per quotation / customer standards".to_string(),
            packaging_type: "Standard export packing".to_string(),
            reference_sample: "Approved reference sample".to_string(),
            concern_person: quotation.customer.clone(),
            delivery_at: "Customer dispatch address".to_string(),
            courier_transporter_details: "Pending transporter allocation".to_string(),
        };
        let id = work_order.id.clone();
        let new_value = snapshot(&work_order);
        self.state.work_orders.insert(0, work_order);
        self.audit(AuditAction::Create, "work_order", &id, None, new_value);
        self.generate_document(
            DocumentType::WorkOrder,
            "quotation",
            &quotation.id,
            snapshot(quotation).as_ref(),
        );
        id
    }

    /// Manual approval for quotations under the margin threshold
    pub fn approve_quotation(&mut self, quotation_id: &str) -> WorkflowResult<()> {
        self.transition_quotation(quotation_id, QuotationStatus::Approved, AuditAction::Approve)
    }

    pub fn reject_quotation(&mut self, quotation_id: &str) -> WorkflowResult<()> {
        let current = self
            .state
            .quotations
            .iter()
            .find(|q| q.id == quotation_id)
            .map(|q| q.status)
            .ok_or_else(|| WorkflowError::not_found("quotation", quotation_id))?;
        if current == QuotationStatus::Approved {
            return Err(WorkflowError::InvalidInput(format!(
                "quotation '{}' is already approved",
                quotation_id
            )));
        }
        self.transition_quotation(quotation_id, QuotationStatus::Rejected, AuditAction::Reject)
    }

    fn transition_quotation(
        &mut self,
        quotation_id: &str,
        status: QuotationStatus,
        action: AuditAction,
    ) -> WorkflowResult<()> {
        let quotation = self
            .state
            .quotations
            .iter_mut()
            .find(|q| q.id == quotation_id)
            .ok_or_else(|| WorkflowError::not_found("quotation", quotation_id))?;
        if quotation.status == status {
            return Ok(());
        }
        let old_value = snapshot(&*quotation);
        quotation.status = status;
        let new_value = snapshot(&*quotation);
        self.audit(action, "quotation", quotation_id, old_value, new_value);
        Ok(())
    }

    /// Converts an approved quotation into a confirmed order
    pub fn create_sales_order(&mut self, quotation_id: &str) -> WorkflowResult<String> {
        let quotation = self
            .state
            .quotations
            .iter()
            .find(|q| q.id == quotation_id)
            .cloned()
            .ok_or_else(|| WorkflowError::not_found("quotation", quotation_id))?;
        if quotation.status != QuotationStatus::Approved {
            return Err(WorkflowError::NotApproved(quotation.id));
        }

        let hold_chance = self.policy.credit_hold_probability.clamp(0.0, 1.0);
        let credit_status = if self.rng.gen_bool(hold_chance) {
            CreditStatus::Hold
        } else {
            CreditStatus::Cleared
        };

        let order = SalesOrder {
            id: self.next_id("SO"),
            quotation_id: quotation.id.clone(),
            customer: quotation.customer,
            product: quotation.product,
            qty: quotation.qty,
            credit_status,
            status: SalesOrderStatus::Confirmed,
        };
        let id = order.id.clone();
        let new_value = snapshot(&order);
        self.state.sales_orders.insert(0, order);
        self.audit(AuditAction::Create, "sales_order", &id, None, new_value.clone());
        self.generate_document(DocumentType::SalesOrder, "sales_order", &id, new_value.as_ref());
        self.notify("Sales Order", &format!("{} created", id), Severity::Neutral);
        Ok(id)
    }
}

//! Enquiry-to-order records

use serde::{Deserialize, Serialize};

use crate::status_enum;

status_enum!(EnquiryStatus {
    Open => "OPEN",
    FollowUp => "FOLLOWUP",
    Quoted => "QUOTED",
});

status_enum!(QuotationStatus {
    Pending => "PENDING",
    Approved => "APPROVED",
    Rejected => "REJECTED",
});

status_enum!(CreditStatus {
    Cleared => "CLEARED",
    Hold => "HOLD",
});

status_enum!(SalesOrderStatus {
    Confirmed => "CONFIRMED",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub id: String,
    pub customer: String,
    pub product: String,
    pub qty: f64,
    pub delivery_date: String,
    pub ai_score: u32,
    pub status: EnquiryStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub id: String,
    pub enquiry_id: String,
    pub customer: String,
    pub product: String,
    pub qty: f64,
    /// Margin percentage; at or above the approval threshold the quotation approves itself
    pub margin: u32,
    pub status: QuotationStatus,
    pub expires_on: String,
}

/// Production instruction sheet printed for an approved quotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: String,
    pub quotation_id: String,
    pub work_order_no: String,
    pub date: String,
    pub document_no: String,
    pub client_name: String,
    pub enquiry_promoter: String,
    pub dispatch_due_date: String,
    pub enquiry_type: String,
    pub courier_name: String,
    pub product_name: String,
    pub quantity_gm: f64,
    pub hsn_sac: String,
    pub product_size: String,
    pub specific_requirements: String,
    pub packaging_type: String,
    pub reference_sample: String,
    pub concern_person: String,
    pub delivery_at: String,
    pub courier_transporter_details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrder {
    pub id: String,
    pub quotation_id: String,
    pub customer: String,
    pub product: String,
    pub qty: f64,
    pub credit_status: CreditStatus,
    pub status: SalesOrderStatus,
}

use serde::{Deserialize, Serialize};

use crate::status_enum;

status_enum!(InvoiceStatus {
    Open => "OPEN",
});

status_enum!(PaymentStatus {
    Posted => "POSTED",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub customer: String,
    pub amount: f64,
    pub due_date: String,
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub invoice_id: String,
    pub amount: f64,
    pub mode: String,
    pub status: PaymentStatus,
}

use serde::{Deserialize, Serialize};

use crate::status_enum;

status_enum!(RequisitionStatus {
    Pending => "PENDING",
});

status_enum!(GrnStatus {
    Hold => "HOLD",
    Released => "RELEASED",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequisition {
    pub id: String,
    pub material: String,
    pub qty: f64,
    pub required_by: String,
    pub status: RequisitionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub rating: f64,
    pub status: super::ActiveStatus,
}

/// Goods receipt note for an inbound material batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grn {
    pub id: String,
    pub vendor: String,
    pub material: String,
    pub batch_tag: String,
    pub status: GrnStatus,
}

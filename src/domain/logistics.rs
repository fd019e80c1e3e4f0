//! Packaging and outbound dispatch records

use serde::{Deserialize, Serialize};

use crate::status_enum;

status_enum!(PackingSlipStatus {
    Ready => "READY",
});

status_enum!(LabelStatus {
    Generated => "GENERATED",
});

status_enum!(DispatchStatus {
    Open => "OPEN",
    InTransit => "IN_TRANSIT",
    Delivered => "DELIVERED",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingSlip {
    pub id: String,
    pub batch: String,
    pub customer: String,
    pub weight: f64,
    pub status: PackingSlipStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: String,
    pub batch: String,
    pub spec: String,
    pub status: LabelStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchOrder {
    pub id: String,
    pub customer: String,
    pub vehicle: String,
    pub eta: String,
    pub status: DispatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_note: Option<String>,
}

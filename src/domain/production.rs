//! Shop-floor records: intake, washing, size reduction and quality control

use serde::{Deserialize, Serialize};

use crate::status_enum;

status_enum!(StageStatus {
    Open => "OPEN",
    Completed => "COMPLETED",
});

status_enum!(QcStatus {
    Passed => "PASSED",
    Failed => "FAILED",
});

status_enum!(NcrStatus {
    Open => "OPEN",
});

status_enum!(MachineLogStatus {
    Recorded => "RECORDED",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchIntake {
    pub id: String,
    pub batch: String,
    pub stage: String,
    pub input_qty: f64,
    pub status: StageStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WashSort {
    pub id: String,
    pub batch: String,
    pub sorted_qty: f64,
    pub rejected_qty: f64,
    pub status: StageStatus,
}

/// QC result for a production batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QcReport {
    pub id: String,
    pub batch: String,
    pub moisture: f64,
    pub color: String,
    pub status: QcStatus,
}

/// Non-conformance report raised by a failed QC report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ncr {
    pub id: String,
    pub qc_id: String,
    pub root_cause: String,
    pub status: NcrStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCard {
    pub id: String,
    pub batch: String,
    pub machine: String,
    pub input_qty: f64,
    pub output_qty: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_order_id: Option<String>,
    pub status: StageStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineLog {
    pub id: String,
    pub machine: String,
    pub downtime_mins: u32,
    pub reason: String,
    pub status: MachineLogStatus,
}

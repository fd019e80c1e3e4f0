//! Users, audit trail, notifications and generated-document metadata

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::modules::Role;
use super::permissions::PermissionMatrix;
use crate::status_enum;

status_enum!(UserStatus {
    Active => "ACTIVE",
});

status_enum!(AuditAction {
    Create => "CREATE",
    Update => "UPDATE",
    Approve => "APPROVE",
    Reject => "REJECT",
    Export => "EXPORT",
    DocumentGenerated => "DOCUMENT_GENERATED",
    Seed => "SEED",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub permissions: PermissionMatrix,
    pub status: UserStatus,
}

/// One recorded state mutation; never edited after it is appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: String,
    pub actor: String,
    pub role: String,
    pub timestamp: String,
    pub ip: String,
    pub action: AuditAction,
    pub entity_type: String,
    pub entity_id: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Neutral,
    Warn,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Neutral => "neutral",
            Severity::Warn => "warn",
            Severity::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub body: String,
    pub severity: Severity,
    pub at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "Work Order")]
    WorkOrder,
    Quotation,
    #[serde(rename = "Sales Order")]
    SalesOrder,
    Invoice,
    #[serde(rename = "Packing Slip")]
    PackingSlip,
}

impl DocumentType {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::WorkOrder => "Work Order",
            DocumentType::Quotation => "Quotation",
            DocumentType::SalesOrder => "Sales Order",
            DocumentType::Invoice => "Invoice",
            DocumentType::PackingSlip => "Packing Slip",
        }
    }
}

/// Metadata of a generated artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub reference_type: String,
    pub reference_id: String,
    pub generated_at: String,
    pub hash: String,
}

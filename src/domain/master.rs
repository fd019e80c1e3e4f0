use serde::{Deserialize, Serialize};

use crate::status_enum;

status_enum!(ActiveStatus {
    Active => "ACTIVE",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub uom: String,
    pub status: ActiveStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub status: ActiveStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bom {
    pub id: String,
    pub product: String,
    pub version: u32,
    pub status: ActiveStatus,
}

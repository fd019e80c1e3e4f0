use serde::{Deserialize, Serialize};

/// Demo business rules; defaults mirror the factory's sample setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowPolicy {
    /// Quotations at or above this margin percentage approve themselves
    #[serde(default = "default_auto_approve_margin")]
    pub auto_approve_margin: u32,
    #[serde(default = "default_quotation_validity_days")]
    pub quotation_validity_days: i64,
    /// Chance a new sales order lands on credit hold
    #[serde(default = "default_credit_hold_probability")]
    pub credit_hold_probability: f64,
}

fn default_auto_approve_margin() -> u32 {
    10
}

fn default_quotation_validity_days() -> i64 {
    7
}

fn default_credit_hold_probability() -> f64 {
    0.2
}

impl Default for WorkflowPolicy {
    fn default() -> Self {
        Self {
            auto_approve_margin: default_auto_approve_margin(),
            quotation_validity_days: default_quotation_validity_days(),
            credit_hold_probability: default_credit_hold_probability(),
        }
    }
}

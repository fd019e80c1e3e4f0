use thiserror::Error;

use crate::domain::{ModuleKey, Page};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("quotation '{0}' is not approved")]
    NotApproved(String),

    #[error("{actor} has no access to {} / {}", .module.label(), .page.label())]
    AccessDenied {
        actor: String,
        module: ModuleKey,
        page: Page,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl WorkflowError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        WorkflowError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

//! Generated-document records and the work-order PDF export

use serde_json::{Value, json};
use sha2::{Digest, Sha256};

use crate::domain::{AuditAction, Document, DocumentType};
use crate::pdf;

use super::{Erp, WorkflowError, WorkflowResult, now, snapshot};

/// A rendered file ready to be written out
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Erp {
    /// Records that a document was produced for a record
    pub(crate) fn generate_document(
        &mut self,
        doc_type: DocumentType,
        reference_type: &str,
        reference_id: &str,
        reference: Option<&Value>,
    ) -> String {
        let id = self.next_id("DOC");
        let generated_at = now();
        let doc = Document {
            id: id.clone(),
            doc_type,
            reference_type: reference_type.to_string(),
            reference_id: reference_id.to_string(),
            hash: document_hash(doc_type, reference_id, reference, &generated_at),
            generated_at,
        };
        let new_value = snapshot(&doc);
        self.state.documents.insert(0, doc);
        self.audit(AuditAction::DocumentGenerated, "document", &id, None, new_value);
        id
    }

    /// Renders the work order of a quotation as a PDF download
    pub fn download_work_order_pdf(&mut self, quotation_id: &str) -> WorkflowResult<ExportedFile> {
        let work_order = self
            .state
            .work_order_for(quotation_id)
            .cloned()
            .ok_or_else(|| WorkflowError::not_found("work order for quotation", quotation_id))?;

        let bytes = pdf::work_order::render(&work_order);
        log::info!(
            "Rendered work order {} ({} bytes)",
            work_order.work_order_no,
            bytes.len()
        );
        self.audit(
            AuditAction::Export,
            "work_order",
            &work_order.id,
            None,
            Some(json!({ "format": "pdf" })),
        );

        Ok(ExportedFile {
            file_name: format!("{}.pdf", work_order.work_order_no),
            bytes,
        })
    }
}

/// First 12 hex digits of a SHA-256 over the reference snapshot
fn document_hash(
    doc_type: DocumentType,
    reference_id: &str,
    reference: Option<&Value>,
    generated_at: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(doc_type.label().as_bytes());
    hasher.update(reference_id.as_bytes());
    if let Some(value) = reference {
        hasher.update(value.to_string().as_bytes());
    }
    hasher.update(generated_at.as_bytes());
    let digest = hasher.finalize();
    digest.iter().take(6).map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_hash_is_twelve_hex_digits() {
        let reference = json!({ "id": "INV-1" });
        let hash = document_hash(DocumentType::Invoice, "INV-1", Some(&reference), "2026-01-01 00:00:00");
        assert_eq!(hash.len(), 12);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));

        let other = document_hash(DocumentType::Invoice, "INV-2", Some(&reference), "2026-01-01 00:00:00");
        assert_ne!(hash, other);
    }
}

use crate::domain::*;

use super::{Erp, WorkflowError, WorkflowResult, non_negative, required, snapshot};

#[derive(Debug, Clone)]
pub struct InvoiceForm {
    pub customer: String,
    pub amount: f64,
    pub due_date: String,
}

#[derive(Debug, Clone)]
pub struct PaymentForm {
    pub invoice_id: String,
    pub amount: f64,
    pub mode: String,
}

impl Erp {
    pub fn add_invoice(&mut self, form: InvoiceForm) -> WorkflowResult<String> {
        let invoice = Invoice {
            id: self.next_id("INV"),
            customer: required("customer", &form.customer)?,
            amount: non_negative("amount", form.amount)?,
            due_date: required("due date", &form.due_date)?,
            status: InvoiceStatus::Open,
        };
        let id = invoice.id.clone();
        let new_value = snapshot(&invoice);
        self.state.invoices.insert(0, invoice);
        self.audit(AuditAction::Create, "invoice", &id, None, new_value.clone());
        self.generate_document(DocumentType::Invoice, "invoice", &id, new_value.as_ref());
        Ok(id)
    }

    /// Posts a payment against an existing invoice
    pub fn add_payment(&mut self, form: PaymentForm) -> WorkflowResult<String> {
        let invoice_id = required("invoice id", &form.invoice_id)?;
        if !self.state.invoices.iter().any(|i| i.id == invoice_id) {
            return Err(WorkflowError::not_found("invoice", &invoice_id));
        }

        let payment = Payment {
            id: self.next_id("PAY"),
            invoice_id,
            amount: non_negative("amount", form.amount)?,
            mode: required("payment mode", &form.mode)?,
            status: PaymentStatus::Posted,
        };
        let id = payment.id.clone();
        let new_value = snapshot(&payment);
        self.state.payments.insert(0, payment);
        self.audit(AuditAction::Create, "payment", &id, None, new_value);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::workflow::{Actor, WorkflowPolicy};

    #[test]
    fn test_invoice_documents_and_payment_reference() {
        let mut erp = Erp::with_seed(AppState::default(), Actor::guest(), WorkflowPolicy::default(), 12);
        let missing = erp
            .add_payment(PaymentForm {
                invoice_id: "INV-NOPE00".to_string(),
                amount: 10.0,
                mode: "UPI".to_string(),
            })
            .unwrap_err();
        assert!(matches!(missing, WorkflowError::NotFound { entity: "invoice", .. }));

        let inv = erp
            .add_invoice(InvoiceForm {
                customer: "SunDry Foods".to_string(),
                amount: 125000.0,
                due_date: "2026-04-15".to_string(),
            })
            .unwrap();
        let doc = &erp.state().documents[0];
        assert_eq!(doc.doc_type, DocumentType::Invoice);
        assert_eq!(doc.reference_type, "invoice");
        assert_eq!(doc.reference_id, inv);

        let pay = erp
            .add_payment(PaymentForm {
                invoice_id: inv.clone(),
                amount: 50000.0,
                mode: "NEFT".to_string(),
            })
            .unwrap();
        let payment = &erp.state().payments[0];
        assert_eq!(payment.id, pay);
        assert_eq!(payment.invoice_id, inv);
        assert_eq!(payment.status, PaymentStatus::Posted);
    }
}

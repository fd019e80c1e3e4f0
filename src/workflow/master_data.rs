use crate::domain::*;

use super::{Erp, WorkflowError, WorkflowResult, required, snapshot};

#[derive(Debug, Clone)]
pub struct ProductForm {
    pub sku: String,
    pub name: String,
    pub uom: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CustomerForm {
    pub name: String,
    pub currency: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BomForm {
    pub product: String,
    pub version: Option<u32>,
}

/// Blank optional text falls back to the default
fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Erp {
    pub fn add_product(&mut self, form: ProductForm) -> WorkflowResult<String> {
        let product = Product {
            id: self.next_id("PRD"),
            sku: required("sku", &form.sku)?,
            name: required("product name", &form.name)?,
            uom: or_default(form.uom, "kg"),
            status: ActiveStatus::Active,
        };
        let id = product.id.clone();
        let new_value = snapshot(&product);
        self.state.products.insert(0, product);
        self.audit(AuditAction::Create, "product", &id, None, new_value);
        Ok(id)
    }

    pub fn add_customer(&mut self, form: CustomerForm) -> WorkflowResult<String> {
        let customer = Customer {
            id: self.next_id("CUS"),
            name: required("customer name", &form.name)?,
            currency: or_default(form.currency, "INR").to_ascii_uppercase(),
            status: ActiveStatus::Active,
        };
        let id = customer.id.clone();
        let new_value = snapshot(&customer);
        self.state.customers.insert(0, customer);
        self.audit(AuditAction::Create, "customer", &id, None, new_value);
        Ok(id)
    }

    pub fn add_bom(&mut self, form: BomForm) -> WorkflowResult<String> {
        let version = form.version.unwrap_or(1);
        if version == 0 {
            return Err(WorkflowError::InvalidInput(
                "BOM version starts at 1".to_string(),
            ));
        }
        let bom = Bom {
            id: self.next_id("BOM"),
            product: required("product", &form.product)?,
            version,
            status: ActiveStatus::Active,
        };
        let id = bom.id.clone();
        let new_value = snapshot(&bom);
        self.state.bom.insert(0, bom);
        self.audit(AuditAction::Create, "bom", &id, None, new_value);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::workflow::{Actor, WorkflowPolicy};

    #[test]
    fn test_defaults_apply_to_blank_fields() {
        let mut erp = Erp::with_seed(AppState::default(), Actor::guest(), WorkflowPolicy::default(), 4);
        erp.add_product(ProductForm {
            sku: "CHILLI-001".to_string(),
            name: "Chilli Flakes".to_string(),
            uom: Some("  ".to_string()),
        })
        .unwrap();
        erp.add_customer(CustomerForm {
            name: "Spice Route".to_string(),
            currency: None,
        })
        .unwrap();
        let bom_id = erp
            .add_bom(BomForm {
                product: "Chilli Flakes".to_string(),
                version: None,
            })
            .unwrap();

        let state = erp.state();
        assert_eq!(state.products[0].uom, "kg");
        assert_eq!(state.customers[0].currency, "INR");
        assert_eq!(state.bom[0].version, 1);
        assert_eq!(state.audit_logs[0].entity_id, bom_id);
        assert_eq!(state.audit_logs[0].entity_type, "bom");
        assert_eq!(state.audit_logs.len(), 3);
    }
}

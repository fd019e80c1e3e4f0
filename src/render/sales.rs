use crate::domain::{Page, QuotationStatus};
use crate::state::AppState;

use super::{badge_cell, cell, escape, form_panel, num, row, table, table_panel};

pub(super) fn page(state: &AppState, page: Page) -> String {
    match page {
        Page::Enquiries => enquiries(state),
        Page::Quotations => quotations(state),
        _ => sales_orders(state),
    }
}

fn enquiries(state: &AppState) -> String {
    let form = form_panel(
        "Create Enquiry",
        "enquiryForm",
        concat!(
            r#"<input name="customer" placeholder="Customer" required />"#,
            r#"<input name="product" placeholder="Product" required />"#,
            r#"<input name="qty" type="number" placeholder="Quantity" required />"#,
            r#"<input name="deliveryDate" type="date" required />"#,
            r#"<input name="aiScore" type="number" placeholder="AI Score" value="75" required />"#,
        ),
        "Create Enquiry",
    );

    let rows = state.enquiries.iter().map(|e| {
        row(&[
            cell(&e.id),
            cell(&e.customer),
            cell(&e.product),
            cell(&num(e.qty)),
            cell(&e.delivery_date),
            cell(&e.ai_score.to_string()),
            badge_cell(e.status.as_str()),
            format!(
                r#"<td class="actions"><button class="btn" data-action="create-quotation" data-id="{}">Create Quotation</button></td>"#,
                escape(&e.id)
            ),
        ])
    });
    let list = table(
        &["ID", "Customer", "Product", "Qty", "Delivery", "AI", "Status", "Actions"],
        rows,
    );

    form + &table_panel(Some("Enquiries"), list)
}

fn quotations(state: &AppState) -> String {
    let rows = state.quotations.iter().map(|q| {
        let id = escape(&q.id);
        let download = if state.work_order_for(&q.id).is_some() {
            format!(
                r#"<td><button class="btn" data-action="download-work-order" data-id="{}">Download PDF</button></td>"#,
                id
            )
        } else {
            cell("-")
        };
        let actions = match q.status {
            QuotationStatus::Pending => format!(
                r#"<button class="btn" data-action="approve-quotation" data-id="{0}">Approve</button><button class="btn" data-action="reject-quotation" data-id="{0}">Reject</button>"#,
                id
            ),
            QuotationStatus::Approved => format!(
                r#"<button class="btn btn-primary" data-action="create-sales-order" data-id="{}">Create SO</button>"#,
                id
            ),
            QuotationStatus::Rejected => String::new(),
        };

        row(&[
            cell(&q.id),
            cell(&q.customer),
            cell(&q.product),
            cell(&num(q.qty)),
            cell(&q.margin.to_string()),
            badge_cell(q.status.as_str()),
            cell(&q.expires_on),
            download,
            format!(r#"<td class="actions">{}</td>"#, actions),
        ])
    });

    table_panel(
        Some("Quotations"),
        table(
            &[
                "ID",
                "Customer",
                "Product",
                "Qty",
                "Margin%",
                "Status",
                "Expires",
                "Work Order",
                "Actions",
            ],
            rows,
        ),
    )
}

fn sales_orders(state: &AppState) -> String {
    let rows = state.sales_orders.iter().map(|so| {
        row(&[
            cell(&so.id),
            cell(&so.customer),
            cell(&so.product),
            cell(&num(so.qty)),
            badge_cell(so.credit_status.as_str()),
            badge_cell(so.status.as_str()),
        ])
    });

    table_panel(
        Some("Sales Orders"),
        table(
            &["ID", "Customer", "Product", "Qty", "Credit", "Status"],
            rows,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::{Actor, Erp, WorkflowPolicy};

    #[test]
    fn test_quotation_actions_follow_status() {
        let mut erp = Erp::with_seed(
            AppState::default(),
            Actor::new("admin@factory.com"),
            WorkflowPolicy::default(),
            3,
        );
        erp.seed();
        let pending = erp.create_quotation("ENQ-1001", Some(8)).unwrap();
        let approved = erp.create_quotation("ENQ-1002", Some(15)).unwrap();

        let html = page(erp.state(), Page::Quotations);
        assert!(html.contains(&format!(r#"data-action="approve-quotation" data-id="{}""#, pending)));
        assert!(html.contains(&format!(r#"data-action="create-sales-order" data-id="{}""#, approved)));
        assert!(!html.contains(&format!(r#"data-action="approve-quotation" data-id="{}""#, approved)));
        assert!(html.contains("Download PDF"));
    }

    #[test]
    fn test_enquiry_quantities_print_whole() {
        let mut erp = Erp::with_seed(
            AppState::default(),
            Actor::new("admin@factory.com"),
            WorkflowPolicy::default(),
            3,
        );
        erp.seed();
        let html = page(erp.state(), Page::Enquiries);
        assert!(html.contains("<td>ENQ-1001</td>"));
        assert!(!html.contains(".0</td>"));
    }
}

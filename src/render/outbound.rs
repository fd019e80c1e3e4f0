//! Invoicing, packaging and dispatch pages

use crate::domain::{DispatchStatus, Page};
use crate::state::AppState;

use super::{badge_cell, cell, form_panel, num, row, table, table_panel};

pub(super) fn invoicing(state: &AppState, page: Page) -> String {
    if page == Page::Invoices {
        let form = form_panel(
            "Create Invoice",
            "invoiceForm",
            concat!(
                r#"<input name="customer" placeholder="Customer" required />"#,
                r#"<input name="amount" type="number" placeholder="Amount" required />"#,
                r#"<input name="dueDate" type="date" required />"#,
            ),
            "Create Invoice",
        );
        let rows = state.invoices.iter().map(|i| {
            row(&[
                cell(&i.id),
                cell(&i.customer),
                cell(&num(i.amount)),
                cell(&i.due_date),
                badge_cell(i.status.as_str()),
            ])
        });
        return form + &table_panel(
            None,
            table(&["ID", "Customer", "Amount", "Due Date", "Status"], rows),
        );
    }

    let form = form_panel(
        "Post Payment",
        "paymentForm",
        concat!(
            r#"<input name="invoiceId" placeholder="Invoice ID" required />"#,
            r#"<input name="amount" type="number" placeholder="Amount" required />"#,
            r#"<input name="mode" placeholder="Mode" value="Bank Transfer" required />"#,
        ),
        "Post Payment",
    );
    let rows = state.payments.iter().map(|p| {
        row(&[
            cell(&p.id),
            cell(&p.invoice_id),
            cell(&num(p.amount)),
            cell(&p.mode),
            badge_cell(p.status.as_str()),
        ])
    });
    form + &table_panel(
        None,
        table(&["ID", "Invoice ID", "Amount", "Mode", "Status"], rows),
    )
}

pub(super) fn packaging(state: &AppState, page: Page) -> String {
    if page == Page::PackingSlips {
        let form = form_panel(
            "Create Packing Slip",
            "packingSlipForm",
            concat!(
                r#"<input name="batch" placeholder="Batch" required />"#,
                r#"<input name="customer" placeholder="Customer" required />"#,
                r#"<input name="weight" type="number" placeholder="Weight" required />"#,
            ),
            "Create Slip",
        );
        let rows = state.packing_slips.iter().map(|p| {
            row(&[
                cell(&p.id),
                cell(&p.batch),
                cell(&p.customer),
                cell(&num(p.weight)),
                badge_cell(p.status.as_str()),
            ])
        });
        return form + &table_panel(
            None,
            table(&["ID", "Batch", "Customer", "Weight", "Status"], rows),
        );
    }

    let form = form_panel(
        "Create Label",
        "labelForm",
        concat!(
            r#"<input name="batch" placeholder="Batch" required />"#,
            r#"<input name="spec" placeholder="Label Spec" required />"#,
        ),
        "Generate Label",
    );
    let rows = state.labels.iter().map(|l| {
        row(&[
            cell(&l.id),
            cell(&l.batch),
            cell(&l.spec),
            badge_cell(l.status.as_str()),
        ])
    });
    form + &table_panel(None, table(&["ID", "Batch", "Spec", "Status"], rows))
}

pub(super) fn dispatch(state: &AppState, page: Page) -> String {
    if page == Page::DispatchOrders {
        let form = form_panel(
            "Create Dispatch Order",
            "dispatchForm",
            concat!(
                r#"<input name="customer" placeholder="Customer" required />"#,
                r#"<input name="vehicle" placeholder="Vehicle" required />"#,
                r#"<input name="eta" type="date" required />"#,
            ),
            "Create Dispatch",
        );
        let rows = state.dispatch_orders.iter().map(|d| {
            row(&[
                cell(&d.id),
                cell(&d.customer),
                cell(&d.vehicle),
                cell(&d.eta),
                badge_cell(d.status.as_str()),
            ])
        });
        return form + &table_panel(
            None,
            table(&["ID", "Customer", "Vehicle", "ETA", "Status"], rows),
        );
    }

    let options: String = DispatchStatus::ALL
        .iter()
        .map(|s| format!("<option>{}</option>", s.as_str()))
        .collect();
    let fields = format!(
        r#"<input name="dispatchId" placeholder="Dispatch ID" required /><select name="status">{}</select><input name="note" placeholder="Tracking Note" required />"#,
        options
    );
    let form = form_panel(
        "Dispatch Tracking Update",
        "trackingForm",
        &fields,
        "Update Tracking",
    );

    let tracked = state.dispatch_orders.iter().map(|d| {
        row(&[
            cell(&d.id),
            cell(&d.customer),
            badge_cell(d.status.as_str()),
            cell(d.tracking_note.as_deref().unwrap_or("-")),
        ])
    });
    form + &table_panel(
        None,
        table(&["ID", "Customer", "Status", "Tracking Note"], tracked),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_form_offers_every_status() {
        let html = dispatch(&AppState::default(), Page::Tracking);
        assert!(html.contains(r#"id="trackingForm""#));
        assert!(html.contains("<option>OPEN</option><option>IN_TRANSIT</option><option>DELIVERED</option>"));
    }

    #[test]
    fn test_outbound_forms_keep_ids() {
        let state = AppState::default();
        assert!(invoicing(&state, Page::Invoices).contains(r#"id="invoiceForm""#));
        assert!(invoicing(&state, Page::Payments).contains(r#"id="paymentForm""#));
        assert!(packaging(&state, Page::PackingSlips).contains(r#"id="packingSlipForm""#));
        assert!(packaging(&state, Page::Labels).contains(r#"id="labelForm""#));
        assert!(dispatch(&state, Page::DispatchOrders).contains(r#"id="dispatchForm""#));
    }
}

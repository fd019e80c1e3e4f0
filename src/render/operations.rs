//! Procurement, master data and shop-floor pages

use crate::domain::Page;
use crate::state::AppState;

use super::{badge_cell, cell, form_panel, num, row, table, table_panel};

pub(super) fn purchase(state: &AppState, page: Page) -> String {
    match page {
        Page::Requisitions => {
            let form = form_panel(
                "Create Purchase Requisition",
                "purchaseReqForm",
                concat!(
                    r#"<input name="material" placeholder="Material" required />"#,
                    r#"<input name="qty" type="number" placeholder="Quantity" required />"#,
                    r#"<input name="requiredBy" type="date" required />"#,
                ),
                "Create PR",
            );
            let rows = state.purchase_requisitions.iter().map(|r| {
                row(&[
                    cell(&r.id),
                    cell(&r.material),
                    cell(&num(r.qty)),
                    cell(&r.required_by),
                    badge_cell(r.status.as_str()),
                ])
            });
            form + &table_panel(
                None,
                table(&["ID", "Material", "Qty", "Required By", "Status"], rows),
            )
        }
        Page::Vendors => {
            let form = form_panel(
                "Add Vendor",
                "vendorForm",
                concat!(
                    r#"<input name="name" placeholder="Vendor Name" required />"#,
                    r#"<input name="rating" type="number" step="0.1" min="1" max="5" placeholder="Rating" />"#,
                ),
                "Add Vendor",
            );
            let rows = state.vendors.iter().map(|v| {
                row(&[
                    cell(&v.id),
                    cell(&v.name),
                    cell(&num(v.rating)),
                    badge_cell(v.status.as_str()),
                ])
            });
            form + &table_panel(None, table(&["ID", "Name", "Rating", "Status"], rows))
        }
        _ => {
            let form = form_panel(
                "Create GRN",
                "grnForm",
                concat!(
                    r#"<input name="vendor" placeholder="Vendor" required />"#,
                    r#"<input name="material" placeholder="Material" required />"#,
                    r#"<input name="batchTag" placeholder="Batch Tag" required />"#,
                    r#"<label><input type="checkbox" name="qcHold" /> QC Hold</label>"#,
                ),
                "Post GRN",
            );
            let rows = state.grn.iter().map(|g| {
                row(&[
                    cell(&g.id),
                    cell(&g.vendor),
                    cell(&g.material),
                    cell(&g.batch_tag),
                    badge_cell(g.status.as_str()),
                ])
            });
            form + &table_panel(
                None,
                table(&["ID", "Vendor", "Material", "Batch", "Status"], rows),
            )
        }
    }
}

pub(super) fn master_data(state: &AppState, page: Page) -> String {
    match page {
        Page::Products => {
            let form = form_panel(
                "Add Product",
                "productForm",
                concat!(
                    r#"<input name="sku" placeholder="SKU" required />"#,
                    r#"<input name="name" placeholder="Product Name" required />"#,
                    r#"<input name="uom" placeholder="UOM" value="kg" />"#,
                ),
                "Add Product",
            );
            let rows = state.products.iter().map(|p| {
                row(&[
                    cell(&p.sku),
                    cell(&p.name),
                    cell(&p.uom),
                    badge_cell(p.status.as_str()),
                ])
            });
            form + &table_panel(None, table(&["SKU", "Name", "UOM", "Status"], rows))
        }
        Page::Customers => {
            let form = form_panel(
                "Add Customer",
                "customerForm",
                concat!(
                    r#"<input name="name" placeholder="Customer Name" required />"#,
                    r#"<input name="currency" placeholder="Currency" value="INR" />"#,
                ),
                "Add Customer",
            );
            let rows = state.customers.iter().map(|c| {
                row(&[
                    cell(&c.id),
                    cell(&c.name),
                    cell(&c.currency),
                    badge_cell(c.status.as_str()),
                ])
            });
            form + &table_panel(None, table(&["ID", "Name", "Currency", "Status"], rows))
        }
        _ => {
            let form = form_panel(
                "Add BOM",
                "bomForm",
                concat!(
                    r#"<input name="product" placeholder="Product" required />"#,
                    r#"<input name="version" type="number" placeholder="Version" value="1" required />"#,
                ),
                "Add BOM",
            );
            let rows = state.bom.iter().map(|b| {
                row(&[
                    cell(&b.id),
                    cell(&b.product),
                    cell(&b.version.to_string()),
                    badge_cell(b.status.as_str()),
                ])
            });
            form + &table_panel(None, table(&["ID", "Product", "Version", "Status"], rows))
        }
    }
}

pub(super) fn pre_processing(state: &AppState, page: Page) -> String {
    if page == Page::BatchIntake {
        let form = form_panel(
            "Batch Intake",
            "preForm",
            concat!(
                r#"<input name="batch" placeholder="Batch" required />"#,
                r#"<input name="inputQty" type="number" placeholder="Input Qty" required />"#,
            ),
            "Record Intake",
        );
        let rows = state.pre_processing.iter().map(|x| {
            row(&[
                cell(&x.id),
                cell(&x.batch),
                cell(&num(x.input_qty)),
                badge_cell(x.status.as_str()),
            ])
        });
        return form + &table_panel(None, table(&["ID", "Batch", "Input Qty", "Status"], rows));
    }

    let form = form_panel(
        "Wash & Sort",
        "washSortForm",
        concat!(
            r#"<input name="batch" placeholder="Batch" required />"#,
            r#"<input name="sortedQty" type="number" placeholder="Sorted Qty" required />"#,
            r#"<input name="rejectedQty" type="number" placeholder="Rejected Qty" required />"#,
        ),
        "Record Stage",
    );
    let rows = state.wash_sort.iter().map(|x| {
        row(&[
            cell(&x.id),
            cell(&x.batch),
            cell(&num(x.sorted_qty)),
            cell(&num(x.rejected_qty)),
            badge_cell(x.status.as_str()),
        ])
    });
    form + &table_panel(
        None,
        table(&["ID", "Batch", "Sorted", "Rejected", "Status"], rows),
    )
}

pub(super) fn inspection(state: &AppState, page: Page) -> String {
    if page == Page::QcEntry {
        let form = form_panel(
            "QC Entry",
            "qcForm",
            concat!(
                r#"<input name="batch" placeholder="Batch" required />"#,
                r#"<input name="moisture" type="number" step="0.01" placeholder="Moisture %" required />"#,
                r#"<input name="color" placeholder="Color" required />"#,
                r#"<select name="status"><option value="PASSED">PASSED</option><option value="FAILED">FAILED</option></select>"#,
            ),
            "Submit QC",
        );
        let rows = state.qc_reports.iter().map(|q| {
            row(&[
                cell(&q.id),
                cell(&q.batch),
                cell(&num(q.moisture)),
                cell(&q.color),
                badge_cell(q.status.as_str()),
            ])
        });
        return form + &table_panel(
            None,
            table(&["ID", "Batch", "Moisture", "Color", "Status"], rows),
        );
    }

    let rows = state.ncr.iter().map(|n| {
        row(&[
            cell(&n.id),
            cell(&n.qc_id),
            cell(&n.root_cause),
            badge_cell(n.status.as_str()),
        ])
    });
    table_panel(
        Some("NCR"),
        table(&["ID", "QC ID", "Root Cause", "Status"], rows),
    )
}

pub(super) fn size_reduction(state: &AppState, page: Page) -> String {
    if page == Page::JobCards {
        let form = form_panel(
            "Job Card Entry",
            "jobCardForm",
            concat!(
                r#"<input name="batch" placeholder="Batch" required />"#,
                r#"<input name="machine" placeholder="Machine" required />"#,
                r#"<input name="inputQty" type="number" placeholder="Input Qty" required />"#,
                r#"<input name="outputQty" type="number" placeholder="Output Qty" required />"#,
                r#"<input name="salesOrderId" placeholder="Sales Order (optional)" />"#,
            ),
            "Create Job Card",
        );
        let rows = state.job_cards.iter().map(|j| {
            row(&[
                cell(&j.id),
                cell(&j.batch),
                cell(&j.machine),
                cell(&num(j.input_qty)),
                cell(&num(j.output_qty)),
                cell(j.sales_order_id.as_deref().unwrap_or("-")),
                badge_cell(j.status.as_str()),
            ])
        });
        return form + &table_panel(
            None,
            table(
                &["ID", "Batch", "Machine", "Input", "Output", "Sales Order", "Status"],
                rows,
            ),
        );
    }

    let form = form_panel(
        "Machine Downtime Log",
        "machineLogForm",
        concat!(
            r#"<input name="machine" placeholder="Machine" required />"#,
            r#"<input name="downtimeMins" type="number" placeholder="Downtime (mins)" required />"#,
            r#"<input name="reason" placeholder="Reason" required />"#,
        ),
        "Add Log",
    );
    let rows = state.machine_logs.iter().map(|m| {
        row(&[
            cell(&m.id),
            cell(&m.machine),
            cell(&m.downtime_mins.to_string()),
            cell(&m.reason),
            badge_cell(m.status.as_str()),
        ])
    });
    form + &table_panel(
        None,
        table(&["ID", "Machine", "Downtime", "Reason", "Status"], rows),
    )
}

//! Navigation, screens and exports

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

use crate::analytics::{Analytics, Kpis};
use crate::cli::context::Session;
use crate::cli::ui;
use crate::domain::{ModuleKey, Page};
use crate::render;
use crate::state::AppState;

pub fn seed(session: &mut Session) -> Result<()> {
    let erp = &mut session.erp;
    erp.seed();
    erp.ensure_current_user_profile();
    erp.fix_cursor();
    ui::success("Demo data loaded");
    Ok(())
}

/// Target page when only the module is given
fn landing_page(session: &Session, module: ModuleKey) -> Page {
    session
        .erp
        .accessible_pages(module)
        .first()
        .copied()
        .unwrap_or_else(|| module.first_page())
}

pub fn nav(session: &mut Session, module: ModuleKey, page: Option<Page>) -> Result<()> {
    let page = page.unwrap_or_else(|| landing_page(session, module));
    session.erp.navigate(module, page)?;
    ui::success(&format!("{}  {}", module.label(), page.label()));
    Ok(())
}

pub fn render(
    session: &mut Session,
    module: Option<ModuleKey>,
    page: Option<Page>,
    out: Option<&Path>,
) -> Result<()> {
    match (module, page) {
        (Some(module), page) => {
            let page = page.unwrap_or_else(|| landing_page(session, module));
            session.erp.navigate(module, page)?;
        }
        (None, Some(page)) => session.erp.navigate(page.module(), page)?,
        (None, None) => {}
    }

    let html = render::app(&session.erp, session.backend());
    match out {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("Failed to write {:?}", path))?;
            ui::success(&format!("Wrote {}", path.display()));
        }
        None => println!("{}", html),
    }
    Ok(())
}

pub fn dashboard(session: &Session) -> Result<()> {
    let erp = &session.erp;
    let state = erp.state();

    println!();
    println!(
        "  {} on {}",
        erp.actor().name().bright_yellow().bold(),
        session.backend()
    );
    if let Some(user) = erp.current_user() {
        println!("  {} {}", "Role:".bright_white().bold(), user.role.label());
    }
    println!();
    for (label, value) in Kpis::compute(state).cards() {
        println!("  {:<20} {}", label, value.to_string().bold());
    }

    if !erp.can_access(ModuleKey::SuperAdmin, Page::Dashboard) {
        println!();
        return Ok(());
    }

    let analytics = Analytics::compute(state);
    println!();
    println!("  {}", "Analytics".bright_white().bold());
    println!("  {:<20} {:.0}", "Sales Billed", analytics.sales_billed);
    println!("  {:<20} {:.0}", "Collections", analytics.collections);
    println!("  {:<20} {}%", "Yield %", analytics.yield_percent);
    for bar in analytics.bars {
        let filled = (bar.value / 5) as usize;
        println!(
            "  {:<22} {}{} {}%",
            bar.label,
            "█".repeat(filled).bright_green(),
            "░".repeat(20 - filled).dimmed(),
            bar.value
        );
    }

    println!();
    println!("  {}", "Recent Notifications".bright_white().bold());
    for n in state.notifications.iter().take(8) {
        println!("  {}  {:<7} {}  {}", n.at.dimmed(), ui::severity(n.severity), n.title.bold(), n.body);
    }
    println!();
    Ok(())
}

pub fn export(session: &mut Session, quotation_id: &str, dir: &Path) -> Result<()> {
    session
        .erp
        .require_access(ModuleKey::Sales, Page::Quotations)?;
    let file = session.erp.download_work_order_pdf(quotation_id)?;

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    let path = dir.join(&file.file_name);
    fs::write(&path, &file.bytes).with_context(|| format!("Failed to write {:?}", path))?;
    ui::success(&format!("Wrote {} ({} bytes)", path.display(), file.bytes.len()));
    Ok(())
}

pub fn list(session: &Session, page: Page) -> Result<()> {
    session.erp.require_access(page.module(), page)?;
    let (headers, rows) = page_rows(session.erp.state(), page);
    println!();
    println!("  {}", page.label().bright_white().bold());
    ui::print_table(&headers, &rows);
    println!();
    Ok(())
}

fn s(value: impl ToString) -> String {
    value.to_string()
}

/// Columns and rows a page's table shows
fn page_rows(state: &AppState, page: Page) -> (Vec<&'static str>, Vec<Vec<String>>) {
    use crate::render::num;

    match page {
        Page::Dashboard | Page::Analytics => (
            vec!["Time", "Title", "Body", "Severity"],
            state
                .notifications
                .iter()
                .map(|n| vec![s(&n.at), s(&n.title), s(&n.body), s(n.severity.as_str())])
                .collect(),
        ),
        Page::Users | Page::AccessControl => (
            vec!["ID", "Name", "Email", "Role", "Status"],
            state
                .app_users
                .iter()
                .map(|u| vec![s(&u.id), s(&u.name), s(&u.email), s(u.role), s(u.status)])
                .collect(),
        ),
        Page::Audit => (
            vec!["Time", "Actor", "Role", "Action", "Entity", "ID"],
            state
                .audit_logs
                .iter()
                .map(|a| {
                    vec![
                        s(&a.timestamp),
                        s(&a.actor),
                        s(&a.role),
                        s(a.action),
                        s(&a.entity_type),
                        s(&a.entity_id),
                    ]
                })
                .collect(),
        ),
        Page::Enquiries => (
            vec!["ID", "Customer", "Product", "Qty", "Delivery", "AI", "Status"],
            state
                .enquiries
                .iter()
                .map(|e| {
                    vec![
                        s(&e.id),
                        s(&e.customer),
                        s(&e.product),
                        num(e.qty),
                        s(&e.delivery_date),
                        s(e.ai_score),
                        s(e.status),
                    ]
                })
                .collect(),
        ),
        Page::Quotations => (
            vec!["ID", "Customer", "Product", "Qty", "Margin%", "Status", "Expires", "Work Order"],
            state
                .quotations
                .iter()
                .map(|q| {
                    let wo = state
                        .work_order_for(&q.id)
                        .map(|w| w.work_order_no.clone())
                        .unwrap_or_else(|| s("-"));
                    vec![
                        s(&q.id),
                        s(&q.customer),
                        s(&q.product),
                        num(q.qty),
                        s(q.margin),
                        s(q.status),
                        s(&q.expires_on),
                        wo,
                    ]
                })
                .collect(),
        ),
        Page::SalesOrders => (
            vec!["ID", "Customer", "Product", "Qty", "Credit", "Status"],
            state
                .sales_orders
                .iter()
                .map(|so| {
                    vec![
                        s(&so.id),
                        s(&so.customer),
                        s(&so.product),
                        num(so.qty),
                        s(so.credit_status),
                        s(so.status),
                    ]
                })
                .collect(),
        ),
        Page::Requisitions => (
            vec!["ID", "Material", "Qty", "Required By", "Status"],
            state
                .purchase_requisitions
                .iter()
                .map(|r| vec![s(&r.id), s(&r.material), num(r.qty), s(&r.required_by), s(r.status)])
                .collect(),
        ),
        Page::Vendors => (
            vec!["ID", "Name", "Rating", "Status"],
            state
                .vendors
                .iter()
                .map(|v| vec![s(&v.id), s(&v.name), num(v.rating), s(v.status)])
                .collect(),
        ),
        Page::Grn => (
            vec!["ID", "Vendor", "Material", "Batch", "Status"],
            state
                .grn
                .iter()
                .map(|g| vec![s(&g.id), s(&g.vendor), s(&g.material), s(&g.batch_tag), s(g.status)])
                .collect(),
        ),
        Page::Products => (
            vec!["SKU", "Name", "UOM", "Status"],
            state
                .products
                .iter()
                .map(|p| vec![s(&p.sku), s(&p.name), s(&p.uom), s(p.status)])
                .collect(),
        ),
        Page::Customers => (
            vec!["ID", "Name", "Currency", "Status"],
            state
                .customers
                .iter()
                .map(|c| vec![s(&c.id), s(&c.name), s(&c.currency), s(c.status)])
                .collect(),
        ),
        Page::Bom => (
            vec!["ID", "Product", "Version", "Status"],
            state
                .bom
                .iter()
                .map(|b| vec![s(&b.id), s(&b.product), s(b.version), s(b.status)])
                .collect(),
        ),
        Page::BatchIntake => (
            vec!["ID", "Batch", "Input Qty", "Status"],
            state
                .pre_processing
                .iter()
                .map(|x| vec![s(&x.id), s(&x.batch), num(x.input_qty), s(x.status)])
                .collect(),
        ),
        Page::WashSort => (
            vec!["ID", "Batch", "Sorted", "Rejected", "Status"],
            state
                .wash_sort
                .iter()
                .map(|x| vec![s(&x.id), s(&x.batch), num(x.sorted_qty), num(x.rejected_qty), s(x.status)])
                .collect(),
        ),
        Page::QcEntry => (
            vec!["ID", "Batch", "Moisture", "Color", "Status"],
            state
                .qc_reports
                .iter()
                .map(|q| vec![s(&q.id), s(&q.batch), num(q.moisture), s(&q.color), s(q.status)])
                .collect(),
        ),
        Page::Ncr => (
            vec!["ID", "QC ID", "Root Cause", "Status"],
            state
                .ncr
                .iter()
                .map(|n| vec![s(&n.id), s(&n.qc_id), s(&n.root_cause), s(n.status)])
                .collect(),
        ),
        Page::JobCards => (
            vec!["ID", "Batch", "Machine", "Input", "Output", "Sales Order", "Status"],
            state
                .job_cards
                .iter()
                .map(|j| {
                    vec![
                        s(&j.id),
                        s(&j.batch),
                        s(&j.machine),
                        num(j.input_qty),
                        num(j.output_qty),
                        j.sales_order_id.clone().unwrap_or_else(|| s("-")),
                        s(j.status),
                    ]
                })
                .collect(),
        ),
        Page::MachineLogs => (
            vec!["ID", "Machine", "Downtime", "Reason", "Status"],
            state
                .machine_logs
                .iter()
                .map(|m| vec![s(&m.id), s(&m.machine), s(m.downtime_mins), s(&m.reason), s(m.status)])
                .collect(),
        ),
        Page::Invoices => (
            vec!["ID", "Customer", "Amount", "Due Date", "Status"],
            state
                .invoices
                .iter()
                .map(|i| vec![s(&i.id), s(&i.customer), num(i.amount), s(&i.due_date), s(i.status)])
                .collect(),
        ),
        Page::Payments => (
            vec!["ID", "Invoice ID", "Amount", "Mode", "Status"],
            state
                .payments
                .iter()
                .map(|p| vec![s(&p.id), s(&p.invoice_id), num(p.amount), s(&p.mode), s(p.status)])
                .collect(),
        ),
        Page::PackingSlips => (
            vec!["ID", "Batch", "Customer", "Weight", "Status"],
            state
                .packing_slips
                .iter()
                .map(|p| vec![s(&p.id), s(&p.batch), s(&p.customer), num(p.weight), s(p.status)])
                .collect(),
        ),
        Page::Labels => (
            vec!["ID", "Batch", "Spec", "Status"],
            state
                .labels
                .iter()
                .map(|l| vec![s(&l.id), s(&l.batch), s(&l.spec), s(l.status)])
                .collect(),
        ),
        Page::DispatchOrders | Page::Tracking => (
            vec!["ID", "Customer", "Vehicle", "ETA", "Status", "Tracking Note"],
            state
                .dispatch_orders
                .iter()
                .map(|d| {
                    vec![
                        s(&d.id),
                        s(&d.customer),
                        s(&d.vehicle),
                        s(&d.eta),
                        s(d.status),
                        d.tracking_note.clone().unwrap_or_else(|| s("-")),
                    ]
                })
                .collect(),
        ),
    }
}

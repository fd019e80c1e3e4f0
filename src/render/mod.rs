//! HTML screens
//!
//! Every function here is a pure view over the aggregate. [`app`] renders
//! the whole application shell: module navigation, the KPI strip, the
//! tabs of the active module and the active page. Forms keep the element
//! ids and field names of the web front end so saved pages stay
//! interchangeable.

mod admin;
mod operations;
mod outbound;
mod sales;

use std::fmt::Write;

use crate::analytics::{Analytics, Kpis};
use crate::domain::{ModuleKey, Page};
use crate::state::AppState;
use crate::storage::BackendMode;
use crate::workflow::Erp;

/// Escapes text for use in element content and attribute values
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Numbers print without a trailing `.0` when they are whole
pub fn num(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// CSS class of a status badge
pub fn badge_class(status: &str) -> &'static str {
    match status.to_ascii_uppercase().as_str() {
        "APPROVED" | "PASS" | "PASSED" | "ACTIVE" | "CLEARED" | "COMPLETED" | "OPEN" => "ok",
        "HOLD" | "PENDING" | "IN_REVIEW" => "warn",
        "FAILED" | "REJECTED" | "BLOCKED" => "danger",
        _ => "neutral",
    }
}

pub fn status_badge(status: &str) -> String {
    let text = if status.is_empty() { "NA" } else { status };
    format!(
        r#"<span class="badge {}">{}</span>"#,
        badge_class(status),
        escape(text)
    )
}

fn cell(value: &str) -> String {
    format!("<td>{}</td>", escape(value))
}

fn badge_cell(status: &str) -> String {
    format!("<td>{}</td>", status_badge(status))
}

/// A `<table>` with a header row and pre-rendered `<tr>` rows
fn table(headers: &[&str], rows: impl IntoIterator<Item = String>) -> String {
    let mut out = String::from("<table><thead><tr>");
    for header in headers {
        let _ = write!(out, "<th>{}</th>", escape(header));
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str(&row);
    }
    out.push_str("</tbody></table>");
    out
}

fn row(cells: &[String]) -> String {
    format!("<tr>{}</tr>", cells.concat())
}

/// Card holding a form
fn form_panel(title: &str, form_id: &str, fields: &str, submit: &str) -> String {
    format!(
        r#"<div class="card panel"><h3>{}</h3><form id="{}" class="grid-4">{}<button class="btn btn-primary" type="submit">{}</button></form></div>"#,
        escape(title),
        form_id,
        fields,
        escape(submit)
    )
}

/// Card holding a table, with an optional heading
fn table_panel(title: Option<&str>, table: String) -> String {
    let heading = title
        .map(|t| format!("<h3>{}</h3>", escape(t)))
        .unwrap_or_default();
    format!(r#"<div class="card panel table-wrap">{}{}</div>"#, heading, table)
}

pub fn kpi_cards(state: &AppState) -> String {
    let mut out = String::from(r#"<div class="kpi-grid">"#);
    for (label, value) in Kpis::compute(state).cards() {
        let _ = write!(
            out,
            r#"<div class="card kpi-card"><div class="muted">{}</div><div class="kpi-value">{}</div></div>"#,
            label, value
        );
    }
    out.push_str("</div>");
    out
}

pub fn analytics_panel(state: &AppState) -> String {
    let analytics = Analytics::compute(state);
    let mut out = String::from(r#"<div class="card panel"><h3>Analytics</h3><div class="grid-3">"#);
    let _ = write!(
        out,
        r#"<div><div class="muted tiny">Sales Billed</div><div class="kpi-value">{:.0}</div></div>"#,
        analytics.sales_billed
    );
    let _ = write!(
        out,
        r#"<div><div class="muted tiny">Collections</div><div class="kpi-value">{:.0}</div></div>"#,
        analytics.collections
    );
    let _ = write!(
        out,
        r#"<div><div class="muted tiny">Yield %</div><div class="kpi-value">{}%</div></div>"#,
        analytics.yield_percent
    );
    out.push_str(r#"</div><div class="stack gap-sm" style="margin-top:12px;">"#);
    for bar in analytics.bars {
        let _ = write!(
            out,
            r#"<div><div class="row" style="justify-content:space-between;"><span>{label}</span><span class="muted tiny">{value}%</span></div><div class="bar-track"><div class="bar-fill" style="width:{value}%"></div></div></div>"#,
            label = bar.label,
            value = bar.value
        );
    }
    out.push_str("</div></div>");
    out
}

/// Body of one page, without the surrounding shell
pub fn page(state: &AppState, module: ModuleKey, page: Page) -> String {
    match module {
        ModuleKey::SuperAdmin => admin::page(state, page),
        ModuleKey::Sales => sales::page(state, page),
        ModuleKey::Purchase => operations::purchase(state, page),
        ModuleKey::MasterData => operations::master_data(state, page),
        ModuleKey::PreProcessing => operations::pre_processing(state, page),
        ModuleKey::Inspection => operations::inspection(state, page),
        ModuleKey::SizeReduction => operations::size_reduction(state, page),
        ModuleKey::Invoicing => outbound::invoicing(state, page),
        ModuleKey::Packaging => outbound::packaging(state, page),
        ModuleKey::Dispatch => outbound::dispatch(state, page),
    }
}

fn module_nav(erp: &Erp) -> String {
    let active = erp.state().ui.active_module;
    let mut out = String::from(r#"<nav id="moduleNav">"#);
    for module in erp.visible_modules() {
        let target = erp
            .accessible_pages(module)
            .first()
            .copied()
            .unwrap_or_else(|| module.first_page());
        let _ = write!(
            out,
            r#"<button class="module-btn{}" data-module="{}" data-page="{}">{}</button>"#,
            if module == active { " active" } else { "" },
            module.key(),
            escape(target.label()),
            escape(module.label())
        );
    }
    out.push_str("</nav>");
    out
}

fn module_tabs(erp: &Erp, module: ModuleKey) -> String {
    let active = erp.state().ui.active_page;
    let mut out = String::from(r#"<div class="tabs">"#);
    for page in erp.accessible_pages(module) {
        let _ = write!(
            out,
            r#"<button class="tab-btn{}" data-module="{}" data-page="{}">{}</button>"#,
            if page == active { " active" } else { "" },
            module.key(),
            escape(page.label()),
            escape(page.label())
        );
    }
    out.push_str("</div>");
    out
}

fn top_status(erp: &Erp, backend: BackendMode) -> String {
    let role = erp
        .current_user()
        .map(|u| u.role.label())
        .unwrap_or("No Role");
    format!(
        r#"<div class="row gap-sm"><input id="backendMode" value="{}" readonly /><input id="userEmail" value="{}" readonly /><span id="userRoleText" class="badge neutral">{}</span></div>"#,
        escape(backend.label()),
        escape(erp.actor().name()),
        escape(role)
    )
}

/// Full application document for the cursor's module and page
pub fn app(erp: &Erp, backend: BackendMode) -> String {
    let state = erp.state();
    let module = state.ui.active_module;
    let active_page = state.ui.active_page;

    let body = if erp.can_access(module, active_page) {
        page(state, module, active_page)
    } else {
        r#"<div class="card panel">Access denied</div>"#.to_string()
    };

    format!(
        concat!(
            r#"<!doctype html><html lang="en"><head><meta charset="utf-8" />"#,
            r#"<title>Agri ERP</title><link rel="stylesheet" href="styles.css" /></head><body>"#,
            r#"<div id="appRoot" class="layout"><aside class="sidebar"><div class="brand">Agri ERP</div>{nav}</aside>"#,
            r#"<main class="main"><header class="topbar"><div><h2 id="screenTitle">{title}</h2>"#,
            r#"<div id="screenSubtitle" class="muted">Module-level and page-level access enforced by Super Admin</div></div>"#,
            r#"{status}</header><section id="dashboardMount">{kpis}</section>"#,
            r#"<section id="moduleMount">{tabs}{body}</section></main></div></body></html>"#,
        ),
        nav = module_nav(erp),
        title = escape(&format!("{}  {}", module.label(), active_page.label())),
        status = top_status(erp, backend),
        kpis = kpi_cards(state),
        tabs = module_tabs(erp, module),
        body = body,
    )
}

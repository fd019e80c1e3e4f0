use std::fmt::Write;

use crate::domain::{ModuleKey, Page, Role};
use crate::state::AppState;

use super::{analytics_panel, badge_cell, cell, escape, form_panel, kpi_cards, row, table, table_panel};

const RECENT_NOTIFICATIONS: usize = 8;

pub(super) fn page(state: &AppState, page: Page) -> String {
    match page {
        Page::Dashboard => dashboard(state),
        Page::Users => users(state),
        Page::AccessControl => access_control(state),
        Page::Audit => audit(state),
        _ => analytics_panel(state),
    }
}

fn dashboard(state: &AppState) -> String {
    let rows = state
        .notifications
        .iter()
        .take(RECENT_NOTIFICATIONS)
        .map(|n| {
            row(&[
                cell(&n.at),
                cell(&n.title),
                cell(&n.body),
                badge_cell(&n.severity.as_str().to_ascii_uppercase()),
            ])
        });

    kpi_cards(state)
        + &analytics_panel(state)
        + &table_panel(
            Some("Recent Notifications"),
            table(&["Time", "Title", "Body", "Severity"], rows),
        )
}

fn role_options(selected: Option<Role>) -> String {
    Role::ALL
        .iter()
        .map(|r| {
            let attr = if Some(*r) == selected { " selected" } else { "" };
            format!("<option{}>{}</option>", attr, r.label())
        })
        .collect()
}

fn users(state: &AppState) -> String {
    let fields = format!(
        r#"<input name="name" placeholder="Full Name" required /><input name="email" type="email" placeholder="Email" required /><select name="role">{}</select>"#,
        role_options(None)
    );
    let form = form_panel("Add App User", "appUserForm", &fields, "Create User");

    let rows = state.app_users.iter().map(|u| {
        row(&[
            cell(&u.name),
            cell(&u.email),
            cell(u.role.label()),
            badge_cell(u.status.as_str()),
            format!(
                r#"<td><select data-action="update-user-role" data-id="{}">{}</select></td>"#,
                escape(&u.id),
                role_options(Some(u.role))
            ),
        ])
    });

    form + &table_panel(
        Some("Users"),
        table(&["Name", "Email", "Role", "Status", "Change Role"], rows),
    )
}

fn access_control(state: &AppState) -> String {
    let selected = state
        .ui
        .selected_user_id
        .as_deref()
        .and_then(|id| state.find_user(id))
        .or_else(|| state.app_users.first());

    let mut out = String::from(
        r#"<div class="card panel"><h3>Module &amp; Page Access</h3><div class="row gap-sm" style="margin-bottom:12px;"><label style="min-width:140px;">Select User</label><select id="accessUserSelect">"#,
    );
    for user in &state.app_users {
        let attr = if selected.is_some_and(|s| s.id == user.id) {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            out,
            r#"<option value="{}"{}>{} ({})</option>"#,
            escape(&user.id),
            attr,
            escape(&user.name),
            user.role.label()
        );
    }
    out.push_str("</select></div>");

    let Some(user) = selected else {
        out.push_str(r#"<div class="muted">No users</div></div>"#);
        return out;
    };

    let rows = ModuleKey::ALL.iter().map(|module| {
        let access = user.permissions.module(*module);
        let checked = |on: bool| if on { " checked" } else { "" };
        let mut pages = String::from(r#"<div class="actions">"#);
        for page in module.pages() {
            let on = access.is_some_and(|a| a.pages.get(page).copied().unwrap_or(false));
            let _ = write!(
                pages,
                r#"<label><input type="checkbox" data-action="toggle-page" data-user="{}" data-module="{}" data-page="{}"{} /> {}</label>"#,
                escape(&user.id),
                module.key(),
                escape(page.label()),
                checked(on),
                escape(page.label())
            );
        }
        pages.push_str("</div>");

        format!(
            r#"<tr><td><b>{}</b></td><td><input type="checkbox" data-action="toggle-module" data-user="{}" data-module="{}"{} /></td><td>{}</td></tr>"#,
            escape(module.label()),
            escape(&user.id),
            module.key(),
            checked(access.is_some_and(|a| a.enabled)),
            pages
        )
    });

    out.push_str(r#"<div class="table-wrap">"#);
    out.push_str(&table(&["Module", "Enable Module", "Page-level Access"], rows));
    out.push_str("</div></div>");
    out
}

fn audit(state: &AppState) -> String {
    let rows = state.audit_logs.iter().map(|a| {
        row(&[
            cell(&a.timestamp),
            cell(&a.actor),
            cell(&a.role),
            cell(a.action.as_str()),
            cell(&a.entity_type),
            cell(&a.entity_id),
        ])
    });
    table_panel(
        Some("Audit Logs"),
        table(&["Time", "Actor", "Role", "Action", "Entity", "ID"], rows),
    )
}

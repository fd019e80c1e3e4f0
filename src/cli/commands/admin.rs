use anyhow::{Result, anyhow};
use clap::Subcommand;
use colored::*;

use crate::cli::context::Session;
use crate::cli::ui;
use crate::domain::{ModuleKey, Page, Role};
use crate::workflow::Erp;
use crate::workflow::admin::UserForm;

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Create an app user with the role's default access
    AddUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: Role,
    },
    /// Change a user's role; resets their access to the role default
    SetRole {
        /// User id or email
        user: String,
        role: Role,
    },
    /// Pick the user shown on the Access Control page
    Select {
        /// User id or email
        user: String,
    },
    /// Enable or disable a whole module
    ModuleAccess {
        /// User id or email
        user: String,
        module: ModuleKey,
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Grant or revoke one page
    PageAccess {
        /// User id or email
        user: String,
        module: ModuleKey,
        page: Page,
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Show a user's module and page access
    Access {
        /// User id or email; the selected user when omitted
        user: Option<String>,
    },
}

/// Id of the user matching an id or an email
fn resolve_user(erp: &Erp, key: &str) -> Result<String> {
    let state = erp.state();
    state
        .find_user(key)
        .or_else(|| state.find_user_by_email(key))
        .map(|u| u.id.clone())
        .ok_or_else(|| anyhow!("No user '{}'", key))
}

pub fn run(session: &mut Session, command: AdminCommands) -> Result<()> {
    let erp = &mut session.erp;
    match command {
        AdminCommands::AddUser { name, email, role } => {
            erp.require_access(ModuleKey::SuperAdmin, Page::Users)?;
            let id = erp.add_user(UserForm { name, email, role })?;
            ui::created("User", &id);
        }
        AdminCommands::SetRole { user, role } => {
            erp.require_access(ModuleKey::SuperAdmin, Page::Users)?;
            let id = resolve_user(erp, &user)?;
            erp.update_user_role(&id, role)?;
            ui::success(&format!("{} is now {}", user, role));
        }
        AdminCommands::Select { user } => {
            erp.require_access(ModuleKey::SuperAdmin, Page::AccessControl)?;
            let id = resolve_user(erp, &user)?;
            erp.select_access_user(&id)?;
            ui::success(&format!("Editing access of {}", user));
        }
        AdminCommands::ModuleAccess {
            user,
            module,
            enabled,
        } => {
            erp.require_access(ModuleKey::SuperAdmin, Page::AccessControl)?;
            let id = resolve_user(erp, &user)?;
            erp.set_module_access(&id, module, enabled)?;
            ui::success(&format!(
                "{} {} for {}",
                module.label(),
                if enabled { "enabled" } else { "disabled" },
                user
            ));
        }
        AdminCommands::PageAccess {
            user,
            module,
            page,
            enabled,
        } => {
            erp.require_access(ModuleKey::SuperAdmin, Page::AccessControl)?;
            let id = resolve_user(erp, &user)?;
            erp.set_page_access(&id, module, page, enabled)?;
            ui::success(&format!(
                "{} / {} {} for {}",
                module.label(),
                page,
                if enabled { "granted" } else { "revoked" },
                user
            ));
        }
        AdminCommands::Access { user } => {
            erp.require_access(ModuleKey::SuperAdmin, Page::AccessControl)?;
            let target = match user {
                Some(key) => {
                    let id = resolve_user(erp, &key)?;
                    erp.state().find_user(&id)
                }
                None => erp.access_user(),
            };
            let Some(target) = target else {
                ui::warning("No users");
                return Ok(());
            };

            println!();
            println!(
                "  {} ({})",
                target.name.bright_white().bold(),
                target.role.label()
            );
            for module in ModuleKey::ALL {
                let enabled = target.permissions.enabled(module);
                let pages: Vec<String> = module
                    .pages()
                    .iter()
                    .map(|p| {
                        if target.permissions.can_access(module, *p) {
                            p.label().green().to_string()
                        } else {
                            p.label().dimmed().to_string()
                        }
                    })
                    .collect();
                let mark = if enabled { "•".bright_green() } else { "•".bright_red() };
                println!("  {} {:<16} {}", mark, module.label(), pages.join(", "));
            }
            println!();
        }
    }
    Ok(())
}

//! Who the actor is, what they may see, and where the cursor points

use crate::domain::{AppUser, AuditAction, ModuleKey, Page, PermissionMatrix, Role, UserStatus};

use super::{Erp, WorkflowError, WorkflowResult, snapshot};

impl Erp {
    /// Profile matching the actor's email, falling back to the first user
    pub fn current_user(&self) -> Option<&AppUser> {
        let state = self.state();
        self.actor()
            .email
            .as_deref()
            .and_then(|email| state.find_user_by_email(email))
            .or_else(|| state.app_users.first())
    }

    pub fn can_access(&self, module: ModuleKey, page: Page) -> bool {
        self.current_user()
            .is_some_and(|u| u.permissions.can_access(module, page))
    }

    pub fn require_access(&self, module: ModuleKey, page: Page) -> WorkflowResult<()> {
        if self.can_access(module, page) {
            return Ok(());
        }
        Err(WorkflowError::AccessDenied {
            actor: self.actor().name().to_string(),
            module,
            page,
        })
    }

    /// Modules shown in the navigation menu
    pub fn visible_modules(&self) -> Vec<ModuleKey> {
        match self.current_user() {
            Some(user) => user.permissions.enabled_modules().collect(),
            None => Vec::new(),
        }
    }

    /// Tabs shown inside a module
    pub fn accessible_pages(&self, module: ModuleKey) -> Vec<Page> {
        module
            .pages()
            .iter()
            .copied()
            .filter(|p| self.can_access(module, *p))
            .collect()
    }

    pub fn first_accessible(&self) -> (ModuleKey, Page) {
        self.current_user()
            .and_then(|u| u.permissions.first_accessible())
            .unwrap_or((ModuleKey::SuperAdmin, Page::Dashboard))
    }

    pub fn navigate(&mut self, module: ModuleKey, page: Page) -> WorkflowResult<()> {
        if page.module() != module {
            return Err(WorkflowError::InvalidInput(format!(
                "page '{}' is not part of module '{}'",
                page,
                module.label()
            )));
        }
        self.require_access(module, page)?;
        let ui = &mut self.state.ui;
        ui.active_module = module;
        ui.active_page = page;
        Ok(())
    }

    /// Moves the cursor to the first accessible page when the current one is off limits
    pub fn fix_cursor(&mut self) {
        let ui = &self.state.ui;
        if !self.can_access(ui.active_module, ui.active_page) {
            let (module, page) = self.first_accessible();
            log::debug!("Cursor not accessible, falling back to {} / {}", module, page);
            self.state.ui.active_module = module;
            self.state.ui.active_page = page;
        }
    }

    /// Creates a profile for a signed-in actor that has none yet
    ///
    /// The very first profile becomes Super Admin, later ones Sales Manager.
    pub fn ensure_current_user_profile(&mut self) -> Option<String> {
        let email = self.actor().email.clone()?;
        if self.state.find_user_by_email(&email).is_some() {
            return None;
        }

        let role = if self.state.app_users.is_empty() {
            Role::SuperAdmin
        } else {
            Role::SalesManager
        };
        let id = self.next_id("USR");
        let name = email.split('@').next().unwrap_or(&email).to_string();
        let profile = AppUser {
            id: id.clone(),
            name,
            email,
            role,
            permissions: PermissionMatrix::for_role(role),
            status: UserStatus::Active,
        };
        log::info!("Created {} profile for {}", role, profile.email);
        let new_value = snapshot(&profile);
        self.state.app_users.push(profile);
        self.audit(AuditAction::Create, "user", &id, None, new_value);
        Some(id)
    }

    /// Picks whose permissions the Access Control page edits
    pub fn select_access_user(&mut self, user_id: &str) -> WorkflowResult<()> {
        if self.state.find_user(user_id).is_none() {
            return Err(WorkflowError::not_found("user", user_id));
        }
        self.state.ui.selected_user_id = Some(user_id.to_string());
        Ok(())
    }

    /// User edited on the Access Control page
    pub fn access_user(&self) -> Option<&AppUser> {
        let state = self.state();
        state
            .ui
            .selected_user_id
            .as_deref()
            .and_then(|id| state.find_user(id))
            .or_else(|| state.app_users.first())
    }
}

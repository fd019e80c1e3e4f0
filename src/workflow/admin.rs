//! User administration and the access-control matrix

use serde_json::Value;

use crate::domain::*;

use super::{Erp, WorkflowError, WorkflowResult, required, snapshot};

#[derive(Debug, Clone)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Erp {
    pub fn add_user(&mut self, form: UserForm) -> WorkflowResult<String> {
        let email = required("email", &form.email)?;
        if !email.contains('@') {
            return Err(WorkflowError::InvalidInput(format!(
                "'{}' is not an email address",
                email
            )));
        }
        if self.state.find_user_by_email(&email).is_some() {
            return Err(WorkflowError::InvalidInput(format!(
                "a user with email '{}' already exists",
                email
            )));
        }

        let user = AppUser {
            id: self.next_id("USR"),
            name: required("name", &form.name)?,
            email,
            role: form.role,
            permissions: PermissionMatrix::for_role(form.role),
            status: UserStatus::Active,
        };
        let id = user.id.clone();
        let new_value = snapshot(&user);
        self.state.app_users.insert(0, user);
        self.audit(AuditAction::Create, "user", &id, None, new_value);
        Ok(id)
    }

    /// Changes a role; the permission matrix resets to that role's defaults
    pub fn update_user_role(&mut self, user_id: &str, role: Role) -> WorkflowResult<()> {
        let user = self.user_mut(user_id)?;
        let old_value = snapshot(&*user);
        user.role = role;
        user.permissions = PermissionMatrix::for_role(role);
        let new_value = snapshot(&*user);
        self.audit(AuditAction::Update, "user", user_id, old_value, new_value);
        self.fix_cursor();
        Ok(())
    }

    pub fn set_module_access(
        &mut self,
        user_id: &str,
        module: ModuleKey,
        enabled: bool,
    ) -> WorkflowResult<()> {
        let user = self.user_mut(user_id)?;
        let old_value = user.permissions.module(module).and_then(snapshot);
        user.permissions.set_module(module, enabled);
        let new_value = user.permissions.module(module).and_then(snapshot);

        let entity_id = format!("{}:{}", user_id, module.key());
        self.audit(AuditAction::Update, "permission_module", &entity_id, old_value, new_value);
        self.fix_cursor();
        Ok(())
    }

    /// Toggles one page; granting or revoking a page always leaves its module enabled
    pub fn set_page_access(
        &mut self,
        user_id: &str,
        module: ModuleKey,
        page: Page,
        enabled: bool,
    ) -> WorkflowResult<()> {
        if page.module() != module {
            return Err(WorkflowError::InvalidInput(format!(
                "page '{}' is not part of module '{}'",
                page,
                module.label()
            )));
        }
        let user = self.user_mut(user_id)?;
        let old = user
            .permissions
            .module(module)
            .and_then(|m| m.pages.get(&page).copied())
            .unwrap_or(false);
        user.permissions.set_page(module, page, enabled);

        let entity_id = format!("{}:{}:{}", user_id, module.key(), page.label());
        self.audit(
            AuditAction::Update,
            "permission_page",
            &entity_id,
            Some(Value::Bool(old)),
            Some(Value::Bool(enabled)),
        );
        self.fix_cursor();
        Ok(())
    }

    fn user_mut(&mut self, user_id: &str) -> WorkflowResult<&mut AppUser> {
        self.state
            .app_users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| WorkflowError::not_found("user", user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::workflow::{Actor, WorkflowPolicy};

    fn seeded() -> Erp {
        let mut erp = Erp::with_seed(
            AppState::default(),
            Actor::new("admin@factory.com"),
            WorkflowPolicy::default(),
            17,
        );
        erp.seed();
        erp
    }

    fn user_id(erp: &Erp, email: &str) -> String {
        erp.state().find_user_by_email(email).unwrap().id.clone()
    }

    #[test]
    fn test_add_user_applies_role_defaults() {
        let mut erp = seeded();
        let id = erp
            .add_user(UserForm {
                name: "Quality Head".to_string(),
                email: "qc@factory.com".to_string(),
                role: Role::QcManager,
            })
            .unwrap();
        let user = erp.state().find_user(&id).unwrap();
        assert!(user.permissions.can_access(ModuleKey::Inspection, Page::Ncr));
        assert!(!user.permissions.enabled(ModuleKey::Sales));

        let dup = erp.add_user(UserForm {
            name: "Again".to_string(),
            email: "QC@factory.com".to_string(),
            role: Role::QcManager,
        });
        assert!(matches!(dup, Err(WorkflowError::InvalidInput(_))));
    }

    #[test]
    fn test_module_off_clears_pages() {
        let mut erp = seeded();
        let sales = user_id(&erp, "sales@factory.com");
        erp.set_module_access(&sales, ModuleKey::Sales, false).unwrap();

        let user = erp.state().find_user(&sales).unwrap();
        let access = user.permissions.module(ModuleKey::Sales).unwrap();
        assert!(!access.enabled);
        assert!(access.pages.values().all(|v| !v));

        let entry = &erp.state().audit_logs[0];
        assert_eq!(entry.entity_type, "permission_module");
        assert_eq!(entry.entity_id, format!("{}:sales", sales));
    }

    #[test]
    fn test_page_grant_enables_module() {
        let mut erp = seeded();
        let sales = user_id(&erp, "sales@factory.com");
        erp.set_page_access(&sales, ModuleKey::Dispatch, Page::Tracking, true)
            .unwrap();

        let user = erp.state().find_user(&sales).unwrap();
        assert!(user.permissions.enabled(ModuleKey::Dispatch));
        assert!(user.permissions.can_access(ModuleKey::Dispatch, Page::Tracking));
        assert!(!user.permissions.can_access(ModuleKey::Dispatch, Page::DispatchOrders));

        let entry = &erp.state().audit_logs[0];
        assert_eq!(entry.entity_id, format!("{}:dispatch:Tracking", sales));
        assert_eq!(entry.old_value, Some(Value::Bool(false)));
        assert_eq!(entry.new_value, Some(Value::Bool(true)));
    }

    #[test]
    fn test_page_audit_records_the_page_flag_itself() {
        let mut erp = seeded();
        let sales = user_id(&erp, "sales@factory.com");

        // Stored matrix with the module off but one page flag still set
        let user = erp.state.app_users.iter_mut().find(|u| u.id == sales).unwrap();
        let mut raw = serde_json::to_value(&user.permissions).unwrap();
        raw["dispatch"]["enabled"] = Value::Bool(false);
        raw["dispatch"]["pages"]["Tracking"] = Value::Bool(true);
        user.permissions = serde_json::from_value(raw).unwrap();

        erp.set_page_access(&sales, ModuleKey::Dispatch, Page::Tracking, false)
            .unwrap();
        let entry = &erp.state().audit_logs[0];
        assert_eq!(entry.entity_id, format!("{}:dispatch:Tracking", sales));
        assert_eq!(entry.old_value, Some(Value::Bool(true)));
        assert_eq!(entry.new_value, Some(Value::Bool(false)));
    }

    #[test]
    fn test_role_change_moves_cursor_of_current_user() {
        let mut erp = seeded();
        let admin = user_id(&erp, "admin@factory.com");
        erp.update_user_role(&admin, Role::AccountsManager).unwrap();
        assert_eq!(erp.state().ui.active_module, ModuleKey::Invoicing);
        assert_eq!(erp.state().ui.active_page, Page::Invoices);
        assert_eq!(erp.current_user().unwrap().role, Role::AccountsManager);
    }

    #[test]
    fn test_unknown_user() {
        let mut erp = seeded();
        let err = erp
            .set_module_access("USR-NOBODY", ModuleKey::Sales, true)
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound { entity: "user", .. }));
    }
}

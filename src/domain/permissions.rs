//! Per-user module/page permission matrix

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::modules::{ModuleKey, Page, Role};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleAccess {
    pub enabled: bool,
    pub pages: BTreeMap<Page, bool>,
}

impl ModuleAccess {
    fn closed(module: ModuleKey) -> Self {
        Self {
            enabled: false,
            pages: module.pages().iter().map(|p| (*p, false)).collect(),
        }
    }

    fn open(module: ModuleKey) -> Self {
        Self {
            enabled: true,
            pages: module.pages().iter().map(|p| (*p, true)).collect(),
        }
    }
}

/// Boolean access flags for every module and every page within it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMatrix(BTreeMap<ModuleKey, ModuleAccess>);

impl PermissionMatrix {
    /// Every module present, everything disabled
    pub fn empty() -> Self {
        Self(
            ModuleKey::ALL
                .iter()
                .map(|m| (*m, ModuleAccess::closed(*m)))
                .collect(),
        )
    }

    pub fn for_role(role: Role) -> Self {
        let mut matrix = Self::empty();
        for module in role.default_modules() {
            matrix.0.insert(*module, ModuleAccess::open(*module));
        }
        matrix
    }

    pub fn module(&self, module: ModuleKey) -> Option<&ModuleAccess> {
        self.0.get(&module)
    }

    pub fn enabled(&self, module: ModuleKey) -> bool {
        self.0.get(&module).is_some_and(|m| m.enabled)
    }

    pub fn can_access(&self, module: ModuleKey, page: Page) -> bool {
        self.0
            .get(&module)
            .is_some_and(|m| m.enabled && m.pages.get(&page).copied().unwrap_or(false))
    }

    /// Turning a module off also clears every page flag inside it
    pub fn set_module(&mut self, module: ModuleKey, enabled: bool) {
        let access = self
            .0
            .entry(module)
            .or_insert_with(|| ModuleAccess::closed(module));
        access.enabled = enabled;
        if !enabled {
            for flag in access.pages.values_mut() {
                *flag = false;
            }
        }
    }

    /// Touching a page always enables its module
    pub fn set_page(&mut self, module: ModuleKey, page: Page, enabled: bool) {
        let access = self
            .0
            .entry(module)
            .or_insert_with(|| ModuleAccess::closed(module));
        access.enabled = true;
        access.pages.insert(page, enabled);
    }

    /// First accessible (module, page) in menu order
    pub fn first_accessible(&self) -> Option<(ModuleKey, Page)> {
        ModuleKey::ALL.iter().find_map(|m| {
            m.pages()
                .iter()
                .find(|p| self.can_access(*m, **p))
                .map(|p| (*m, *p))
        })
    }

    pub fn enabled_modules(&self) -> impl Iterator<Item = ModuleKey> + '_ {
        ModuleKey::ALL.iter().copied().filter(|m| self.enabled(*m))
    }

    /// Fills in any module or page a stored matrix is missing
    pub fn normalize(&mut self) {
        for module in ModuleKey::ALL {
            let access = self
                .0
                .entry(module)
                .or_insert_with(|| ModuleAccess::closed(module));
            access.pages.retain(|p, _| module.pages().contains(p));
            for page in module.pages() {
                access.pages.entry(*page).or_insert(false);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModuleKey, &ModuleAccess)> {
        self.0.iter()
    }
}

impl Default for PermissionMatrix {
    fn default() -> Self {
        Self::empty()
    }
}

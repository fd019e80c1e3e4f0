//! Module, page and role identities
//!
//! The declaration order of [`ModuleKey`] is the menu order and the order
//! permission matrices serialize in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKey {
    SuperAdmin,
    Purchase,
    Sales,
    MasterData,
    PreProcessing,
    Inspection,
    SizeReduction,
    Invoicing,
    Packaging,
    Dispatch,
}

impl ModuleKey {
    pub const ALL: [ModuleKey; 10] = [
        ModuleKey::SuperAdmin,
        ModuleKey::Purchase,
        ModuleKey::Sales,
        ModuleKey::MasterData,
        ModuleKey::PreProcessing,
        ModuleKey::Inspection,
        ModuleKey::SizeReduction,
        ModuleKey::Invoicing,
        ModuleKey::Packaging,
        ModuleKey::Dispatch,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ModuleKey::SuperAdmin => "super_admin",
            ModuleKey::Purchase => "purchase",
            ModuleKey::Sales => "sales",
            ModuleKey::MasterData => "master_data",
            ModuleKey::PreProcessing => "pre_processing",
            ModuleKey::Inspection => "inspection",
            ModuleKey::SizeReduction => "size_reduction",
            ModuleKey::Invoicing => "invoicing",
            ModuleKey::Packaging => "packaging",
            ModuleKey::Dispatch => "dispatch",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModuleKey::SuperAdmin => "Super Admin",
            ModuleKey::Purchase => "Purchase",
            ModuleKey::Sales => "Sales",
            ModuleKey::MasterData => "Master Data",
            ModuleKey::PreProcessing => "Pre-Processing",
            ModuleKey::Inspection => "Inspection",
            ModuleKey::SizeReduction => "Size Reduction",
            ModuleKey::Invoicing => "Invoicing",
            ModuleKey::Packaging => "Packaging",
            ModuleKey::Dispatch => "Dispatch",
        }
    }

    /// Pages of this module in tab order
    pub fn pages(&self) -> &'static [Page] {
        use Page::*;
        match self {
            ModuleKey::SuperAdmin => &[Dashboard, Users, AccessControl, Audit, Analytics],
            ModuleKey::Purchase => &[Requisitions, Vendors, Grn],
            ModuleKey::Sales => &[Enquiries, Quotations, SalesOrders],
            ModuleKey::MasterData => &[Products, Customers, Bom],
            ModuleKey::PreProcessing => &[BatchIntake, WashSort],
            ModuleKey::Inspection => &[QcEntry, Ncr],
            ModuleKey::SizeReduction => &[JobCards, MachineLogs],
            ModuleKey::Invoicing => &[Invoices, Payments],
            ModuleKey::Packaging => &[PackingSlips, Labels],
            ModuleKey::Dispatch => &[DispatchOrders, Tracking],
        }
    }

    pub fn first_page(&self) -> Page {
        self.pages()[0]
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ModuleKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_token(s);
        ModuleKey::ALL
            .iter()
            .copied()
            .find(|m| normalize_token(m.key()) == wanted || normalize_token(m.label()) == wanted)
            .ok_or_else(|| format!("unknown module '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Page {
    Dashboard,
    Users,
    #[serde(rename = "Access Control")]
    AccessControl,
    Audit,
    Analytics,
    Requisitions,
    Vendors,
    #[serde(rename = "GRN")]
    Grn,
    Enquiries,
    Quotations,
    #[serde(rename = "Sales Orders")]
    SalesOrders,
    Products,
    Customers,
    #[serde(rename = "BOM")]
    Bom,
    #[serde(rename = "Batch Intake")]
    BatchIntake,
    #[serde(rename = "Wash & Sort")]
    WashSort,
    #[serde(rename = "QC Entry")]
    QcEntry,
    #[serde(rename = "NCR")]
    Ncr,
    #[serde(rename = "Job Cards")]
    JobCards,
    #[serde(rename = "Machine Logs")]
    MachineLogs,
    Invoices,
    Payments,
    #[serde(rename = "Packing Slips")]
    PackingSlips,
    Labels,
    #[serde(rename = "Dispatch Orders")]
    DispatchOrders,
    Tracking,
}

impl Page {
    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Users => "Users",
            Page::AccessControl => "Access Control",
            Page::Audit => "Audit",
            Page::Analytics => "Analytics",
            Page::Requisitions => "Requisitions",
            Page::Vendors => "Vendors",
            Page::Grn => "GRN",
            Page::Enquiries => "Enquiries",
            Page::Quotations => "Quotations",
            Page::SalesOrders => "Sales Orders",
            Page::Products => "Products",
            Page::Customers => "Customers",
            Page::Bom => "BOM",
            Page::BatchIntake => "Batch Intake",
            Page::WashSort => "Wash & Sort",
            Page::QcEntry => "QC Entry",
            Page::Ncr => "NCR",
            Page::JobCards => "Job Cards",
            Page::MachineLogs => "Machine Logs",
            Page::Invoices => "Invoices",
            Page::Payments => "Payments",
            Page::PackingSlips => "Packing Slips",
            Page::Labels => "Labels",
            Page::DispatchOrders => "Dispatch Orders",
            Page::Tracking => "Tracking",
        }
    }

    /// The module that owns this page
    pub fn module(&self) -> ModuleKey {
        ModuleKey::ALL
            .iter()
            .copied()
            .find(|m| m.pages().contains(self))
            .unwrap_or(ModuleKey::SuperAdmin)
    }

    pub fn all() -> impl Iterator<Item = Page> {
        ModuleKey::ALL.iter().flat_map(|m| m.pages().iter().copied())
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_token(s);
        Page::all()
            .find(|p| normalize_token(p.label()) == wanted)
            .ok_or_else(|| format!("unknown page '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Super Admin")]
    SuperAdmin,
    #[serde(rename = "Sales Manager")]
    SalesManager,
    #[serde(rename = "Purchase Manager")]
    PurchaseManager,
    #[serde(rename = "QC Manager")]
    QcManager,
    #[serde(rename = "Accounts Manager")]
    AccountsManager,
    #[serde(rename = "Production Supervisor")]
    ProductionSupervisor,
    #[serde(rename = "Master Data Admin")]
    MasterDataAdmin,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::SuperAdmin,
        Role::SalesManager,
        Role::PurchaseManager,
        Role::QcManager,
        Role::AccountsManager,
        Role::ProductionSupervisor,
        Role::MasterDataAdmin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::SalesManager => "Sales Manager",
            Role::PurchaseManager => "Purchase Manager",
            Role::QcManager => "QC Manager",
            Role::AccountsManager => "Accounts Manager",
            Role::ProductionSupervisor => "Production Supervisor",
            Role::MasterDataAdmin => "Master Data Admin",
        }
    }

    /// Modules a freshly assigned role gets, with every page enabled
    pub fn default_modules(&self) -> &'static [ModuleKey] {
        match self {
            Role::SuperAdmin => &ModuleKey::ALL,
            Role::SalesManager => &[ModuleKey::Sales],
            Role::PurchaseManager => &[ModuleKey::Purchase],
            Role::QcManager => &[ModuleKey::Inspection],
            Role::AccountsManager => &[ModuleKey::Invoicing],
            Role::ProductionSupervisor => &[
                ModuleKey::PreProcessing,
                ModuleKey::SizeReduction,
                ModuleKey::Packaging,
                ModuleKey::Dispatch,
            ],
            Role::MasterDataAdmin => &[ModuleKey::MasterData],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_token(s);
        Role::ALL
            .iter()
            .copied()
            .find(|r| normalize_token(r.label()) == wanted)
            .ok_or_else(|| format!("unknown role '{}'", s))
    }
}

/// Lower-cases and strips separators so "Wash & Sort", "wash-sort" and
/// "wash_sort" compare equal
fn normalize_token(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

//! Typed business records, module/page identities and the permission matrix
//!
//! Every record serializes with camelCase field names so snapshots stay
//! compatible with the JSON document the web front end stored.

pub mod admin;
pub mod finance;
pub mod ids;
pub mod logistics;
pub mod master;
pub mod modules;
pub mod permissions;
pub mod procurement;
pub mod production;
pub mod sales;

pub use admin::*;
pub use finance::*;
pub use logistics::*;
pub use master::*;
pub use modules::{ModuleKey, Page, Role};
pub use permissions::{ModuleAccess, PermissionMatrix};
pub use procurement::*;
pub use production::*;
pub use sales::*;

/// Declares a status enum that serializes to fixed upper-case strings
///
/// ```ignore
/// status_enum!(EnquiryStatus { Open => "OPEN", Quoted => "QUOTED" });
/// ```
#[macro_export]
macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().replace(['-', ' '], "_").to_ascii_uppercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| {
                        let expected: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                        format!("unknown {} '{}', expected one of: {}", stringify!($name), s, expected.join(", "))
                    })
            }
        }
    };
}

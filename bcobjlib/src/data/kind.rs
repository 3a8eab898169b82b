//! Business Central object kinds.
//!
//! Every AL object declaration starts with one of a fixed set of keywords.
//! The kinds split into two disjoint groups:
//!
//! - **requires ID**: `table 50100 "Name"` - a numeric ID sits between
//!   the keyword and the quoted name
//! - **without ID**: `interface "Name"` - the name follows the keyword directly
//!
//! Downstream tooling can query [`ObjectKind::ALL`] (or the two subsets) to
//! validate configuration or list supported types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BcobjError;

/// A kind of Business Central object.
///
/// Serializes as its lowercase canonical keyword (`"tableextension"`,
/// `"controladdin"`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Table,
    TableExtension,
    Page,
    PageExtension,
    Report,
    ReportExtension,
    Codeunit,
    XmlPort,
    Query,
    Enum,
    EnumExtension,
    PermissionSet,
    PermissionSetExtension,
    Interface,
    Profile,
    ControlAddIn,
    Entitlement,
}

impl ObjectKind {
    /// All supported kinds, in canonical order.
    pub const ALL: [ObjectKind; 17] = [
        ObjectKind::Table,
        ObjectKind::TableExtension,
        ObjectKind::Page,
        ObjectKind::PageExtension,
        ObjectKind::Report,
        ObjectKind::ReportExtension,
        ObjectKind::Codeunit,
        ObjectKind::XmlPort,
        ObjectKind::Query,
        ObjectKind::Enum,
        ObjectKind::EnumExtension,
        ObjectKind::Interface,
        ObjectKind::PermissionSet,
        ObjectKind::PermissionSetExtension,
        ObjectKind::Profile,
        ObjectKind::ControlAddIn,
        ObjectKind::Entitlement,
    ];

    /// Kinds declared as `keyword <id> "name"`.
    pub const REQUIRES_ID: [ObjectKind; 13] = [
        ObjectKind::Table,
        ObjectKind::TableExtension,
        ObjectKind::Page,
        ObjectKind::PageExtension,
        ObjectKind::Report,
        ObjectKind::ReportExtension,
        ObjectKind::Codeunit,
        ObjectKind::XmlPort,
        ObjectKind::Query,
        ObjectKind::Enum,
        ObjectKind::EnumExtension,
        ObjectKind::PermissionSet,
        ObjectKind::PermissionSetExtension,
    ];

    /// Kinds declared as `keyword "name"`.
    pub const WITHOUT_ID: [ObjectKind; 4] = [
        ObjectKind::Interface,
        ObjectKind::Profile,
        ObjectKind::ControlAddIn,
        ObjectKind::Entitlement,
    ];

    /// The lowercase keyword that introduces this kind of object.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Table => "table",
            ObjectKind::TableExtension => "tableextension",
            ObjectKind::Page => "page",
            ObjectKind::PageExtension => "pageextension",
            ObjectKind::Report => "report",
            ObjectKind::ReportExtension => "reportextension",
            ObjectKind::Codeunit => "codeunit",
            ObjectKind::XmlPort => "xmlport",
            ObjectKind::Query => "query",
            ObjectKind::Enum => "enum",
            ObjectKind::EnumExtension => "enumextension",
            ObjectKind::PermissionSet => "permissionset",
            ObjectKind::PermissionSetExtension => "permissionsetextension",
            ObjectKind::Interface => "interface",
            ObjectKind::Profile => "profile",
            ObjectKind::ControlAddIn => "controladdin",
            ObjectKind::Entitlement => "entitlement",
        }
    }

    /// Whether declarations of this kind carry a numeric ID.
    pub fn requires_id(&self) -> bool {
        !matches!(
            self,
            ObjectKind::Interface
                | ObjectKind::Profile
                | ObjectKind::ControlAddIn
                | ObjectKind::Entitlement
        )
    }

    /// Canonical keywords of all supported kinds.
    pub fn keywords() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|k| k.as_str())
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = BcobjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| BcobjError::UnknownKind(s.to_string()))
    }
}

use std::fmt;

use serde::Serialize;

use crate::model::{AlertType, Severity};

/// Visual variant of the severity badge shown next to each alert.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Success,
    Warning,
    Danger,
    Info,
    Default,
}

/// Dashboard page an alert review leads to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Route {
    Medicines,
    Issuances,
    Users,
    StockEntries,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Medicines => "/medicines",
            Route::Issuances => "/issuances",
            Route::Users => "/users",
            Route::StockEntries => "/stock-entries",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

pub const FALLBACK_GLYPH: &str = "📢";

pub fn badge_variant(severity: &Severity) -> BadgeVariant {
    match severity {
        Severity::Success => BadgeVariant::Success,
        Severity::Warning => BadgeVariant::Warning,
        Severity::Danger => BadgeVariant::Danger,
        Severity::Info => BadgeVariant::Info,
        Severity::Default | Severity::Other(_) => BadgeVariant::Default,
    }
}

pub fn alert_glyph(alert_type: &AlertType) -> &'static str {
    match alert_type {
        AlertType::StockLow => "⚠️",
        AlertType::MedicineExpiring => "📅",
        AlertType::MedicineExpired => "🚨",
        AlertType::UserAdded => "👤",
        AlertType::UserDeleted => "🗑️",
        AlertType::MedicineAdded => "💊",
        AlertType::StockEntry => "📦",
        AlertType::MedicineIssued => "📋",
        AlertType::Other(_) => FALLBACK_GLYPH,
    }
}

/// Page a reviewed alert should open. `None` means the type has no page of its own.
pub fn review_destination(alert_type: &AlertType) -> Option<Route> {
    match alert_type {
        AlertType::StockLow
        | AlertType::MedicineExpiring
        | AlertType::MedicineExpired
        | AlertType::MedicineAdded => Some(Route::Medicines),
        AlertType::MedicineIssued => Some(Route::Issuances),
        AlertType::UserAdded | AlertType::UserDeleted => Some(Route::Users),
        AlertType::StockEntry => Some(Route::StockEntries),
        AlertType::Other(_) => None,
    }
}

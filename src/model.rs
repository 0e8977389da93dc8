use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// Kind of event an alert reports, as named by the backend's `type` field.
///
/// The backend may introduce types this client has never seen. Those are kept
/// verbatim in `Other` so they can still be displayed and reviewed; every
/// lookup over this enum has to decide what an unrecognized type means.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(from = "String", into = "String")]
pub enum AlertType {
    StockLow,
    MedicineExpiring,
    MedicineExpired,
    UserAdded,
    UserDeleted,
    MedicineAdded,
    StockEntry,
    MedicineIssued,
    #[strum(default)]
    Other(String),
}

impl AlertType {
    pub fn as_str(&self) -> &str {
        match self {
            AlertType::StockLow => "stock_low",
            AlertType::MedicineExpiring => "medicine_expiring",
            AlertType::MedicineExpired => "medicine_expired",
            AlertType::UserAdded => "user_added",
            AlertType::UserDeleted => "user_deleted",
            AlertType::MedicineAdded => "medicine_added",
            AlertType::StockEntry => "stock_entry",
            AlertType::MedicineIssued => "medicine_issued",
            AlertType::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for AlertType {
    fn from(s: String) -> Self {
        match AlertType::from_str(&s) {
            Ok(alert_type) => alert_type,
            Err(_) => AlertType::Other(s),
        }
    }
}

impl From<AlertType> for String {
    fn from(alert_type: AlertType) -> Self {
        match alert_type {
            AlertType::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity reported by the backend. Unknown values are preserved in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Success,
    Warning,
    Danger,
    Info,
    Default,
    #[strum(default)]
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
            Severity::Info => "info",
            Severity::Default => "default",
            Severity::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        match Severity::from_str(&s) {
            Ok(severity) => severity,
            Err(_) => Severity::Other(s),
        }
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: Severity,
    pub title: String,
    #[serde(default)]
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub quantity: u32,
    #[serde(default)]
    pub min_quantity: u32,
}

/// Envelope returned by `GET /alerts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertList {
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub total: u64,
}

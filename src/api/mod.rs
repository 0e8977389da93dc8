pub mod http;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

use crate::error::MedPulseError;
use crate::model::{AlertList, Medicine};

pub use http::HttpInventoryApi;

/// Operations the alerts page consumes from the inventory backend.
///
/// Implementations must be usable from several concurrent futures, since the
/// page issues its three reads at the same time.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Most recent alerts, at most `limit` of them.
    async fn list_alerts(&self, limit: usize) -> Result<AlertList, MedPulseError>;

    /// Medicines the backend classifies as at or below their reorder threshold.
    async fn low_stock_medicines(&self) -> Result<Vec<Medicine>, MedPulseError>;

    /// Medicines within the backend's expiry horizon.
    async fn expiring_medicines(&self) -> Result<Vec<Medicine>, MedPulseError>;

    async fn mark_alert_read(&self, alert_id: &str) -> Result<(), MedPulseError>;

    async fn delete_alert(&self, alert_id: &str) -> Result<(), MedPulseError>;

    /// Sets the stock level of a medicine and returns the updated record.
    async fn update_medicine_quantity(
        &self,
        medicine_id: &str,
        quantity: u32,
    ) -> Result<Medicine, MedPulseError>;
}

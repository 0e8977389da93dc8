use std::sync::Arc;

use log::{error, info, warn};
use serde::Serialize;

use crate::api::InventoryApi;
use crate::classify::{review_destination, Route};
use crate::error::MedPulseError;
use crate::model::{Alert, Medicine};
use crate::notice::Notice;
use crate::restock::RestockModal;

/// Counters shown at the top of the page.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub low_stock: usize,
    pub expiring: usize,
    pub active_alerts: usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    Navigated(Route),
    NoDestination,
    Failed,
}

/// View state of the alerts & notifications page.
///
/// Every backend mutation is awaited before local state changes. A rejected
/// call queues an error notice and leaves the page exactly as it was.
pub struct AlertsPage {
    api: Arc<dyn InventoryApi>,
    alert_limit: usize,
    alerts: Vec<Alert>,
    low_stock: Vec<Medicine>,
    expiring: Vec<Medicine>,
    loading: bool,
    restock: RestockModal,
    notices: Vec<Notice>,
    location: Option<Route>,
}

impl AlertsPage {
    pub fn new(api: Arc<dyn InventoryApi>, alert_limit: usize) -> Self {
        Self {
            api,
            alert_limit,
            alerts: Vec::new(),
            low_stock: Vec::new(),
            expiring: Vec::new(),
            loading: true,
            restock: RestockModal::default(),
            notices: Vec::new(),
            location: None,
        }
    }

    /// Creates the page and performs the initial load.
    pub async fn mount(api: Arc<dyn InventoryApi>, alert_limit: usize) -> Self {
        let mut page = Self::new(api, alert_limit);
        page.load().await;
        page
    }

    /// Fetches alerts, low-stock and expiring medicines together. If any of the
    /// three fails, nothing is replaced for this cycle.
    pub async fn load(&mut self) {
        self.loading = true;

        let api = self.api.as_ref();
        let result = tokio::try_join!(
            api.list_alerts(self.alert_limit),
            api.low_stock_medicines(),
            api.expiring_medicines(),
        );

        match result {
            Ok((alert_list, low_stock, expiring)) => {
                info!(
                    "Loaded {} alerts ({} total), {} low stock, {} expiring",
                    alert_list.alerts.len(),
                    alert_list.total,
                    low_stock.len(),
                    expiring.len()
                );
                self.alerts = alert_list.alerts;
                self.low_stock = low_stock;
                self.expiring = expiring;
            }
            Err(e) => {
                error!("Failed to fetch alerts: {}", e);
                self.notices.push(Notice::error("Failed to refresh alerts"));
            }
        }

        self.loading = false;
    }

    /// Reloads all three lists. The CLI mounts a fresh page per invocation,
    /// so running `medpulse show` again is its refresh action.
    #[allow(dead_code)]
    pub async fn refresh(&mut self) {
        self.load().await;
    }

    /// Marks the alert read, then resolves where the user should go next.
    ///
    /// Returns `Err` only when the alert isn't on the page; backend failures
    /// are reported through a notice and `ReviewOutcome::Failed`.
    pub async fn review(&mut self, alert_id: &str) -> Result<ReviewOutcome, MedPulseError> {
        let alert_type = self.find_alert(alert_id)?.alert_type.clone();

        if let Err(e) = self.api.mark_alert_read(alert_id).await {
            error!("Failed to review alert {}: {}", alert_id, e);
            self.notices.push(Notice::error("Failed to review alert"));
            return Ok(ReviewOutcome::Failed);
        }

        if let Some(alert) = self.alerts.iter_mut().find(|a| a.id == alert_id) {
            alert.is_read = true;
        }

        match review_destination(&alert_type) {
            Some(route) => {
                info!("Alert {} ({}) reviewed, opening {}", alert_id, alert_type, route);
                self.location = Some(route);
                Ok(ReviewOutcome::Navigated(route))
            }
            None => {
                warn!("Alert {} has unrecognized type '{}'", alert_id, alert_type);
                self.notices
                    .push(Notice::info("No specific page for this alert type."));
                Ok(ReviewOutcome::NoDestination)
            }
        }
    }

    /// Deletes the alert on the backend and drops it from the list once the
    /// backend confirms. Returns whether the alert was dismissed.
    pub async fn dismiss(&mut self, alert_id: &str) -> Result<bool, MedPulseError> {
        self.find_alert(alert_id)?;

        match self.api.delete_alert(alert_id).await {
            Ok(()) => {
                info!("Alert {} dismissed", alert_id);
                self.alerts.retain(|a| a.id != alert_id);
                self.notices.push(Notice::success("Alert dismissed"));
                Ok(true)
            }
            Err(e) => {
                error!("Failed to dismiss alert {}: {}", alert_id, e);
                self.notices.push(Notice::error("Failed to dismiss alert"));
                Ok(false)
            }
        }
    }

    /// Opens the restock modal for one of the listed low-stock medicines.
    pub fn open_restock(&mut self, medicine_id: &str) -> Result<(), MedPulseError> {
        let medicine = self
            .low_stock
            .iter()
            .find(|m| m.id == medicine_id)
            .cloned()
            .ok_or_else(|| {
                MedPulseError::Error(format!("Medicine '{}' is not in the low stock list", medicine_id))
            })?;

        self.restock.open(medicine);
        Ok(())
    }

    pub fn close_restock(&mut self) {
        self.restock.close();
    }

    /// Called when the restock modal reports success: hide it and reload
    /// everything so stock figures are current.
    pub async fn restock_succeeded(&mut self) {
        self.restock.close();
        self.load().await;
    }

    /// Submits the open restock modal. Input errors are returned without
    /// touching the backend; backend failures become a notice and leave the
    /// modal open. Returns whether the restock went through.
    pub async fn submit_restock(&mut self, units: u32) -> Result<bool, MedPulseError> {
        match self.restock.submit(self.api.as_ref(), units).await {
            Ok(updated) => {
                self.notices.push(Notice::success(format!(
                    "{} restocked to {} units",
                    updated.name, updated.quantity
                )));
                self.restock_succeeded().await;
                Ok(true)
            }
            Err(e @ MedPulseError::Error(_)) => Err(e),
            Err(e) => {
                error!("Failed to restock medicine: {}", e);
                self.notices.push(Notice::error("Failed to restock medicine"));
                Ok(false)
            }
        }
    }

    /// Looks an alert up among the ones on display. Inactive alerts are not
    /// shown, so they can't be acted on either.
    fn find_alert(&self, alert_id: &str) -> Result<&Alert, MedPulseError> {
        self.active_alerts()
            .find(|a| a.id == alert_id)
            .ok_or_else(|| MedPulseError::Error(format!("Alert '{}' not found", alert_id)))
    }

    #[allow(dead_code)]
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Alerts that are displayed and counted. Read state does not matter here.
    pub fn active_alerts(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|a| a.is_active)
    }

    pub fn low_stock(&self) -> &[Medicine] {
        &self.low_stock
    }

    pub fn expiring(&self) -> &[Medicine] {
        &self.expiring
    }

    pub fn summary(&self) -> Summary {
        Summary {
            low_stock: self.low_stock.len(),
            expiring: self.expiring.len(),
            active_alerts: self.active_alerts().count(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[allow(dead_code)]
    pub fn restock_modal(&self) -> &RestockModal {
        &self.restock
    }

    #[allow(dead_code)]
    pub fn location(&self) -> Option<Route> {
        self.location
    }

    #[allow(dead_code)]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

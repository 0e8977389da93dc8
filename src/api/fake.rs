//! In-memory backend used by the page and CLI tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::InventoryApi;
use crate::error::MedPulseError;
use crate::model::{Alert, AlertList, AlertType, Medicine, Severity};

#[derive(Debug, Default, Clone, Copy)]
pub struct Failures {
    pub list_alerts: bool,
    pub low_stock: bool,
    pub expiring: bool,
    pub mark_read: bool,
    pub delete: bool,
    pub update: bool,
}

#[derive(Debug, Default)]
struct FakeState {
    alerts: Vec<Alert>,
    low_stock: Vec<Medicine>,
    expiring: Vec<Medicine>,
    failures: Failures,
    calls: Vec<String>,
}

#[derive(Debug, Default)]
pub struct FakeInventoryApi {
    state: Mutex<FakeState>,
}

impl FakeInventoryApi {
    pub fn new(alerts: Vec<Alert>, low_stock: Vec<Medicine>, expiring: Vec<Medicine>) -> Self {
        Self {
            state: Mutex::new(FakeState {
                alerts,
                low_stock,
                expiring,
                ..Default::default()
            }),
        }
    }

    pub fn set_failures(&self, failures: Failures) {
        self.state.lock().unwrap().failures = failures;
    }

    pub fn set_low_stock(&self, low_stock: Vec<Medicine>) {
        self.state.lock().unwrap().low_stock = low_stock;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn stored_alert(&self, alert_id: &str) -> Option<Alert> {
        let state = self.state.lock().unwrap();
        state.alerts.iter().find(|a| a.id == alert_id).cloned()
    }

    fn record(&self, call: String, fail: impl Fn(&Failures) -> bool) -> Result<(), MedPulseError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.clone());
        if fail(&state.failures) {
            return Err(MedPulseError::ApiError {
                status: 500,
                message: format!("{} failed", call),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryApi for FakeInventoryApi {
    async fn list_alerts(&self, limit: usize) -> Result<AlertList, MedPulseError> {
        self.record(format!("list_alerts:{}", limit), |f| f.list_alerts)?;
        let state = self.state.lock().unwrap();
        let alerts: Vec<Alert> = state.alerts.iter().take(limit).cloned().collect();
        Ok(AlertList {
            total: state.alerts.len() as u64,
            alerts,
        })
    }

    async fn low_stock_medicines(&self) -> Result<Vec<Medicine>, MedPulseError> {
        self.record("low_stock".to_owned(), |f| f.low_stock)?;
        Ok(self.state.lock().unwrap().low_stock.clone())
    }

    async fn expiring_medicines(&self) -> Result<Vec<Medicine>, MedPulseError> {
        self.record("expiring".to_owned(), |f| f.expiring)?;
        Ok(self.state.lock().unwrap().expiring.clone())
    }

    async fn mark_alert_read(&self, alert_id: &str) -> Result<(), MedPulseError> {
        self.record(format!("mark_read:{}", alert_id), |f| f.mark_read)?;
        let mut state = self.state.lock().unwrap();
        if let Some(alert) = state.alerts.iter_mut().find(|a| a.id == alert_id) {
            alert.is_read = true;
        }
        Ok(())
    }

    async fn delete_alert(&self, alert_id: &str) -> Result<(), MedPulseError> {
        self.record(format!("delete:{}", alert_id), |f| f.delete)?;
        self.state.lock().unwrap().alerts.retain(|a| a.id != alert_id);
        Ok(())
    }

    async fn update_medicine_quantity(
        &self,
        medicine_id: &str,
        quantity: u32,
    ) -> Result<Medicine, MedPulseError> {
        self.record(format!("update:{}:{}", medicine_id, quantity), |f| f.update)?;
        let mut state = self.state.lock().unwrap();
        let medicine = state
            .low_stock
            .iter_mut()
            .find(|m| m.id == medicine_id)
            .ok_or_else(|| MedPulseError::ApiError {
                status: 404,
                message: "Medicine not found".to_owned(),
            })?;
        medicine.quantity = quantity;
        let updated = medicine.clone();
        state.low_stock.retain(|m| m.quantity <= m.min_quantity);
        Ok(updated)
    }
}

pub fn alert(id: &str, alert_type: &str, severity: &str) -> Alert {
    Alert {
        id: id.to_owned(),
        alert_type: AlertType::from(alert_type.to_owned()),
        severity: Severity::from(severity.to_owned()),
        title: format!("Alert {}", id),
        message: format!("Message for {}", id),
        created_at: "2024-06-04T13:45:00Z".parse().unwrap(),
        is_read: false,
        is_active: true,
    }
}

pub fn medicine(id: &str, name: &str, quantity: u32, min_quantity: u32) -> Medicine {
    Medicine {
        id: id.to_owned(),
        name: name.to_owned(),
        category: "Analgesic".to_owned(),
        quantity,
        min_quantity,
    }
}

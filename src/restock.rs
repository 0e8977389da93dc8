use log::info;

use crate::api::InventoryApi;
use crate::error::MedPulseError;
use crate::model::Medicine;

/// Restock modal state: whether it is showing, and for which medicine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestockModal {
    open: bool,
    selected: Option<Medicine>,
}

impl RestockModal {
    pub fn open(&mut self, medicine: Medicine) {
        self.selected = Some(medicine);
        self.open = true;
    }

    /// Hides the modal. The last selection is kept, as the dashboard does.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected(&self) -> Option<&Medicine> {
        self.selected.as_ref()
    }

    /// Adds `units` to the selected medicine's stock on the backend.
    pub async fn submit(
        &self,
        api: &dyn InventoryApi,
        units: u32,
    ) -> Result<Medicine, MedPulseError> {
        let medicine = match (&self.selected, self.open) {
            (Some(medicine), true) => medicine,
            _ => return Err(MedPulseError::Error("Restock modal is not open".to_string())),
        };

        if units == 0 {
            return Err(MedPulseError::Error(
                "Restock quantity must be greater than zero".to_string(),
            ));
        }

        let new_quantity = medicine.quantity.checked_add(units).ok_or_else(|| {
            MedPulseError::Error(format!(
                "Restocking {} by {} units overflows the stock count",
                medicine.name, units
            ))
        })?;

        info!(
            "Restocking medicine {} ({}) from {} to {}",
            medicine.id, medicine.name, medicine.quantity, new_quantity
        );
        api.update_medicine_quantity(&medicine.id, new_quantity).await
    }
}

//! Detail prompt state while a single item is being configured.
use serde::{Deserialize, Serialize};

use crate::numbers::apply_quantity_delta;

/// Working quantity for an item that has been tapped but not yet confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDetail {
    item_id: String,
    quantity: u32,
}

impl PendingDetail {
    /// Open the prompt for an item with the quantity reset to 1.
    #[must_use]
    pub fn open(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            quantity: 1,
        }
    }

    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Shift the working quantity by `delta`, never below 1. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> u32 {
        self.quantity = apply_quantity_delta(self.quantity, delta);
        self.quantity
    }
}

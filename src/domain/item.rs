use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryName, ItemId, ItemName, StockCount, UnitPrice};

/// A stored inventory record.
///
/// Serialises with camelCase keys, which is the wire format of the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: ItemName,
    pub description: Option<String>,
    pub unit_price: UnitPrice,
    pub quantity_in_stock: StockCount,
    /// Stock below this level is flagged as low.
    pub reorder_level: StockCount,
    pub reorder_time_in_days: Option<StockCount>,
    /// Quantity currently on order.
    pub quantity_in_reorder: Option<StockCount>,
    pub category: Option<CategoryName>,
    pub last_updated: NaiveDateTime,
}

impl InventoryItem {
    /// Whether the stock has dropped under the reorder level.
    pub fn is_low_stock(&self) -> bool {
        self.quantity_in_stock < self.reorder_level
    }

    /// Case-insensitive substring match against name and description.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(needle))
    }
}

/// Data required to insert a new [`InventoryItem`]. The store assigns the id
/// and the timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewInventoryItem {
    pub name: ItemName,
    pub description: Option<String>,
    pub unit_price: UnitPrice,
    pub quantity_in_stock: StockCount,
    pub reorder_level: StockCount,
    pub reorder_time_in_days: Option<StockCount>,
    pub quantity_in_reorder: Option<StockCount>,
    pub category: Option<CategoryName>,
}

/// Field-level changes to an existing [`InventoryItem`].
///
/// `None` leaves a field untouched. For nullable columns `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryItemPatch {
    pub name: Option<ItemName>,
    pub description: Option<Option<String>>,
    pub unit_price: Option<UnitPrice>,
    pub quantity_in_stock: Option<StockCount>,
    pub reorder_level: Option<StockCount>,
    pub reorder_time_in_days: Option<Option<StockCount>>,
    pub quantity_in_reorder: Option<Option<StockCount>>,
    pub category: Option<Option<CategoryName>>,
}

impl InventoryItemPatch {
    /// Applies the patch to an in-memory record, leaving `last_updated` alone.
    pub fn apply_to(&self, item: &mut InventoryItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(unit_price) = self.unit_price {
            item.unit_price = unit_price;
        }
        if let Some(quantity) = self.quantity_in_stock {
            item.quantity_in_stock = quantity;
        }
        if let Some(level) = self.reorder_level {
            item.reorder_level = level;
        }
        if let Some(days) = self.reorder_time_in_days {
            item.reorder_time_in_days = days;
        }
        if let Some(quantity) = self.quantity_in_reorder {
            item.quantity_in_reorder = quantity;
        }
        if let Some(category) = &self.category {
            item.category = category.clone();
        }
    }
}

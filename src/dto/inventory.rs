//! Wire and view shapes for inventory items.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::item::{InventoryItem, InventoryItemPatch, NewInventoryItem};
use crate::domain::types::{
    CategoryName, ItemName, StockCount, TypeConstraintError, UnitPrice, optional_text,
};

/// Wraps a present JSON value (including `null`) in `Some`, so that an absent
/// key and an explicit `null` stay distinguishable.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn optional_count(
    value: Option<i32>,
    field: &'static str,
) -> Result<Option<StockCount>, TypeConstraintError> {
    value
        .map(|value| StockCount::new_for_field(value, field))
        .transpose()
}

/// Body of a create request: every item field except `id` and `lastUpdated`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub unit_price: f64,
    pub quantity_in_stock: i32,
    pub reorder_level: i32,
    #[serde(default)]
    pub reorder_time_in_days: Option<i32>,
    #[serde(default)]
    pub quantity_in_reorder: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
}

impl TryFrom<CreateItemRequest> for NewInventoryItem {
    type Error = TypeConstraintError;

    fn try_from(request: CreateItemRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: ItemName::new(request.name)?,
            description: optional_text(request.description),
            unit_price: UnitPrice::new(request.unit_price)?,
            quantity_in_stock: StockCount::new_for_field(
                request.quantity_in_stock,
                "quantity_in_stock",
            )?,
            reorder_level: StockCount::new_for_field(request.reorder_level, "reorder_level")?,
            reorder_time_in_days: optional_count(
                request.reorder_time_in_days,
                "reorder_time_in_days",
            )?,
            quantity_in_reorder: optional_count(
                request.quantity_in_reorder,
                "quantity_in_reorder",
            )?,
            category: CategoryName::optional(request.category),
        })
    }
}

/// Body of an update request. Absent keys leave the stored value untouched;
/// `null` clears a nullable field. Unknown keys such as `id` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_in_stock: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<i32>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub reorder_time_in_days: Option<Option<i32>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity_in_reorder: Option<Option<i32>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Option<String>>,
}

impl TryFrom<UpdateItemRequest> for InventoryItemPatch {
    type Error = TypeConstraintError;

    fn try_from(request: UpdateItemRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: request.name.map(ItemName::new).transpose()?,
            description: request.description.map(optional_text),
            unit_price: request.unit_price.map(UnitPrice::new).transpose()?,
            quantity_in_stock: request
                .quantity_in_stock
                .map(|value| StockCount::new_for_field(value, "quantity_in_stock"))
                .transpose()?,
            reorder_level: request
                .reorder_level
                .map(|value| StockCount::new_for_field(value, "reorder_level"))
                .transpose()?,
            reorder_time_in_days: request
                .reorder_time_in_days
                .map(|value| optional_count(value, "reorder_time_in_days"))
                .transpose()?,
            quantity_in_reorder: request
                .quantity_in_reorder
                .map(|value| optional_count(value, "quantity_in_reorder"))
                .transpose()?,
            category: request.category.map(CategoryName::optional),
        })
    }
}

/// `{"message": ...}` payload used for confirmations and errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Row of the console table, pre-formatted for the template.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InventoryItemDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub unit_price: String,
    pub quantity_in_stock: i32,
    pub reorder_level: i32,
    pub reorder_time_in_days: Option<i32>,
    pub quantity_in_reorder: Option<i32>,
    pub category: String,
    pub last_updated: String,
    pub low_stock: bool,
}

impl From<&InventoryItem> for InventoryItemDto {
    fn from(value: &InventoryItem) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.as_str().to_string(),
            description: value.description.clone().unwrap_or_default(),
            unit_price: value.unit_price.to_string(),
            quantity_in_stock: value.quantity_in_stock.get(),
            reorder_level: value.reorder_level.get(),
            reorder_time_in_days: value.reorder_time_in_days.map(StockCount::get),
            quantity_in_reorder: value.quantity_in_reorder.map(StockCount::get),
            category: value
                .category
                .as_ref()
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
            last_updated: value.last_updated.format("%Y-%m-%d %H:%M:%S").to_string(),
            low_stock: value.is_low_stock(),
        }
    }
}

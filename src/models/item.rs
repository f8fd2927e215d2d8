use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::item::{
    InventoryItem as DomainInventoryItem, InventoryItemPatch as DomainInventoryItemPatch,
    NewInventoryItem as DomainNewInventoryItem,
};
use crate::domain::types::{
    CategoryName, ItemId, ItemName, StockCount, TypeConstraintError, UnitPrice,
};

/// Diesel model representing a row in the `inventory` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::inventory)]
pub struct InventoryItem {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub unit_price: f64,
    pub quantity_in_stock: i32,
    pub reorder_level: i32,
    pub reorder_time_in_days: Option<i32>,
    pub quantity_in_reorder: Option<i32>,
    pub category: Option<String>,
    pub last_updated: NaiveDateTime,
}

/// Insertable form of [`InventoryItem`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::inventory)]
pub struct NewInventoryItem {
    pub name: String,
    pub description: Option<String>,
    pub unit_price: f64,
    pub quantity_in_stock: i32,
    pub reorder_level: i32,
    pub reorder_time_in_days: Option<i32>,
    pub quantity_in_reorder: Option<i32>,
    pub category: Option<String>,
    pub last_updated: NaiveDateTime,
}

/// Changeset applied on update. `None` fields are skipped by Diesel, nested
/// `Some(None)` writes `NULL`.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::inventory)]
pub struct InventoryItemChangeset {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub unit_price: Option<f64>,
    pub quantity_in_stock: Option<i32>,
    pub reorder_level: Option<i32>,
    pub reorder_time_in_days: Option<Option<i32>>,
    pub quantity_in_reorder: Option<Option<i32>>,
    pub category: Option<Option<String>>,
    pub last_updated: NaiveDateTime,
}

fn optional_count(
    value: Option<i32>,
    field: &'static str,
) -> Result<Option<StockCount>, TypeConstraintError> {
    value
        .map(|value| StockCount::new_for_field(value, field))
        .transpose()
}

impl TryFrom<InventoryItem> for DomainInventoryItem {
    type Error = TypeConstraintError;

    fn try_from(item: InventoryItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ItemId::new(item.id)?,
            name: ItemName::new(item.name)?,
            description: item.description,
            unit_price: UnitPrice::new(item.unit_price)?,
            quantity_in_stock: StockCount::new_for_field(
                item.quantity_in_stock,
                "quantity_in_stock",
            )?,
            reorder_level: StockCount::new_for_field(item.reorder_level, "reorder_level")?,
            reorder_time_in_days: optional_count(
                item.reorder_time_in_days,
                "reorder_time_in_days",
            )?,
            quantity_in_reorder: optional_count(item.quantity_in_reorder, "quantity_in_reorder")?,
            category: CategoryName::optional(item.category),
            last_updated: item.last_updated,
        })
    }
}

impl NewInventoryItem {
    pub fn new(item: DomainNewInventoryItem, last_updated: NaiveDateTime) -> Self {
        Self {
            name: item.name.into_inner(),
            description: item.description,
            unit_price: item.unit_price.get(),
            quantity_in_stock: item.quantity_in_stock.get(),
            reorder_level: item.reorder_level.get(),
            reorder_time_in_days: item.reorder_time_in_days.map(StockCount::get),
            quantity_in_reorder: item.quantity_in_reorder.map(StockCount::get),
            category: item.category.map(CategoryName::into_inner),
            last_updated,
        }
    }
}

impl InventoryItemChangeset {
    pub fn new(patch: DomainInventoryItemPatch, last_updated: NaiveDateTime) -> Self {
        Self {
            name: patch.name.map(ItemName::into_inner),
            description: patch.description,
            unit_price: patch.unit_price.map(UnitPrice::get),
            quantity_in_stock: patch.quantity_in_stock.map(StockCount::get),
            reorder_level: patch.reorder_level.map(StockCount::get),
            reorder_time_in_days: patch
                .reorder_time_in_days
                .map(|days| days.map(StockCount::get)),
            quantity_in_reorder: patch
                .quantity_in_reorder
                .map(|quantity| quantity.map(StockCount::get)),
            category: patch
                .category
                .map(|category| category.map(CategoryName::into_inner)),
            last_updated,
        }
    }
}

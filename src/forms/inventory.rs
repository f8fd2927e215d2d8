use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::item::InventoryItem;
use crate::domain::types::{
    CategoryName, ItemName, StockCount, TypeConstraintError, UnitPrice, optional_text,
};
use crate::dto::inventory::{CreateItemRequest, UpdateItemRequest};

/// Raw values of the add/edit item form, exactly as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ItemForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    pub unit_price: String,
    pub quantity_in_stock: String,
    pub reorder_level: String,
    pub reorder_time_in_days: String,
    pub quantity_in_reorder: String,
    pub category: String,
}

impl From<&InventoryItem> for ItemForm {
    fn from(item: &InventoryItem) -> Self {
        fn text<T: ToString>(value: Option<T>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }

        Self {
            name: item.name.to_string(),
            description: item.description.clone().unwrap_or_default(),
            unit_price: item.unit_price.get().to_string(),
            quantity_in_stock: item.quantity_in_stock.to_string(),
            reorder_level: item.reorder_level.to_string(),
            reorder_time_in_days: text(item.reorder_time_in_days),
            quantity_in_reorder: text(item.quantity_in_reorder),
            category: text(item.category.as_ref()),
        }
    }
}

/// Item form after numeric normalisation: price as a decimal, the other
/// figures as integers, blank optional inputs absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFormPayload {
    pub name: ItemName,
    pub description: Option<String>,
    pub unit_price: UnitPrice,
    pub quantity_in_stock: StockCount,
    pub reorder_level: StockCount,
    pub reorder_time_in_days: Option<StockCount>,
    pub quantity_in_reorder: Option<StockCount>,
    pub category: Option<CategoryName>,
}

#[derive(Debug, Error)]
pub enum ItemFormError {
    #[error("Item form validation failed: {0}")]
    Validation(String),
    #[error("Item form field {0} is not a number")]
    NotANumber(&'static str),
    #[error("Item form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ItemFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ItemFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn parse_price(value: &str) -> Result<UnitPrice, ItemFormError> {
    let price = value
        .trim()
        .parse::<f64>()
        .map_err(|_| ItemFormError::NotANumber("unit_price"))?;
    Ok(UnitPrice::new(price)?)
}

fn parse_count(value: &str, field: &'static str) -> Result<StockCount, ItemFormError> {
    let count = value
        .trim()
        .parse::<i32>()
        .map_err(|_| ItemFormError::NotANumber(field))?;
    Ok(StockCount::new_for_field(count, field)?)
}

fn parse_optional_count(
    value: &str,
    field: &'static str,
) -> Result<Option<StockCount>, ItemFormError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_count(value, field).map(Some)
    }
}

impl TryFrom<ItemForm> for ItemFormPayload {
    type Error = ItemFormError;

    fn try_from(value: ItemForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: ItemName::new(value.name)?,
            description: optional_text(Some(value.description)),
            unit_price: parse_price(&value.unit_price)?,
            quantity_in_stock: parse_count(&value.quantity_in_stock, "quantity_in_stock")?,
            reorder_level: parse_count(&value.reorder_level, "reorder_level")?,
            reorder_time_in_days: parse_optional_count(
                &value.reorder_time_in_days,
                "reorder_time_in_days",
            )?,
            quantity_in_reorder: parse_optional_count(
                &value.quantity_in_reorder,
                "quantity_in_reorder",
            )?,
            category: CategoryName::optional(Some(value.category)),
        })
    }
}

impl ItemFormPayload {
    /// Body for creating a new item.
    pub fn into_create_request(self) -> CreateItemRequest {
        CreateItemRequest {
            name: self.name.into_inner(),
            description: self.description,
            unit_price: self.unit_price.get(),
            quantity_in_stock: self.quantity_in_stock.get(),
            reorder_level: self.reorder_level.get(),
            reorder_time_in_days: self.reorder_time_in_days.map(StockCount::get),
            quantity_in_reorder: self.quantity_in_reorder.map(StockCount::get),
            category: self.category.map(CategoryName::into_inner),
        }
    }

    /// Body for an update that replaces every editable field.
    pub fn into_update_request(self) -> UpdateItemRequest {
        UpdateItemRequest {
            name: Some(self.name.into_inner()),
            description: Some(self.description),
            unit_price: Some(self.unit_price.get()),
            quantity_in_stock: Some(self.quantity_in_stock.get()),
            reorder_level: Some(self.reorder_level.get()),
            reorder_time_in_days: Some(self.reorder_time_in_days.map(StockCount::get)),
            quantity_in_reorder: Some(self.quantity_in_reorder.map(StockCount::get)),
            category: Some(self.category.map(CategoryName::into_inner)),
        }
    }
}

//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw primitives so that
//! identifiers, names and stock figures are checked once, at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Categories offered by the console when creating or editing an item.
///
/// The store accepts any non-empty category; this list only drives the form.
pub const KNOWN_CATEGORIES: [&str; 5] = [
    "Electronics",
    "Groceries",
    "Office Supplies",
    "Outdoors",
    "Home & Kitchen",
];

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A numeric value required to be non-negative was negative or not finite.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Trims free text and maps blank input to `None`.
pub fn optional_text<S: Into<String>>(value: Option<S>) -> Option<String> {
    value
        .map(|value| value.into().trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Identifier assigned by the store to an inventory item.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "i32", into = "i32")]
pub struct ItemId(i32);

impl ItemId {
    /// Creates a new identifier ensuring it is greater than zero.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveId("item_id"))
        }
    }

    /// Returns the raw `i32` backing this identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for ItemId {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemId> for i32 {
    fn from(value: ItemId) -> Self {
        value.0
    }
}

impl PartialEq<i32> for ItemId {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

non_empty_string_newtype!(ItemName, "Display name of an inventory item.", "name");
non_empty_string_newtype!(
    CategoryName,
    "Category label attached to an inventory item.",
    "category"
);

impl CategoryName {
    /// Builds an optional category, treating blank input as "no category".
    pub fn optional<S: Into<String>>(value: Option<S>) -> Option<Self> {
        optional_text(value).map(Self)
    }
}

/// Price of a single unit. Zero is allowed, negative or non-finite values are not.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct UnitPrice(f64);

impl UnitPrice {
    /// Constructs a finite price that is zero or greater.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("unit_price"))
        }
    }

    /// Returns the raw `f64` value.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for UnitPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl TryFrom<f64> for UnitPrice {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnitPrice> for f64 {
    fn from(value: UnitPrice) -> Self {
        value.0
    }
}

impl PartialEq<f64> for UnitPrice {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

/// Non-negative count used for stock quantities, reorder levels and lead times.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "i32", into = "i32")]
pub struct StockCount(i32);

impl StockCount {
    /// Constructs a count that is zero or greater.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        Self::new_for_field(value, "count")
    }

    /// Same as [`Self::new`] but with field-specific error context.
    pub fn new_for_field(value: i32, field: &'static str) -> Result<Self, TypeConstraintError> {
        if value >= 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber(field))
        }
    }

    /// Returns the raw `i32` value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for StockCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for StockCount {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StockCount> for i32 {
    fn from(value: StockCount) -> Self {
        value.0
    }
}

impl PartialEq<i32> for StockCount {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_item_names() {
        let value = ItemName::new("  Widget  ").unwrap();
        assert_eq!(value.as_str(), "Widget");
    }

    #[test]
    fn rejects_blank_item_names() {
        let err = ItemName::new("   ").unwrap_err();
        assert_eq!(err, TypeConstraintError::EmptyString("name"));
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = ItemId::new(0).unwrap_err();
        assert_eq!(err, TypeConstraintError::NonPositiveId("item_id"));
    }

    #[test]
    fn unit_price_allows_zero() {
        assert_eq!(UnitPrice::new(0.0).unwrap().get(), 0.0);
    }

    #[test]
    fn unit_price_rejects_negative_and_nan() {
        assert_eq!(
            UnitPrice::new(-0.01).unwrap_err(),
            TypeConstraintError::NegativeNumber("unit_price")
        );
        assert!(UnitPrice::new(f64::NAN).is_err());
    }

    #[test]
    fn unit_price_displays_as_currency() {
        assert_eq!(UnitPrice::new(9.99).unwrap().to_string(), "$9.99");
        assert_eq!(UnitPrice::new(3.0).unwrap().to_string(), "$3.00");
    }

    #[test]
    fn stock_count_reports_field_name() {
        assert_eq!(
            StockCount::new_for_field(-1, "reorder_level").unwrap_err(),
            TypeConstraintError::NegativeNumber("reorder_level")
        );
    }

    #[test]
    fn deserialising_goes_through_constructors() {
        assert!(serde_json::from_str::<ItemName>(r#""   ""#).is_err());
        assert!(serde_json::from_str::<StockCount>("-5").is_err());
        assert!(serde_json::from_str::<UnitPrice>("-0.5").is_err());
        assert!(serde_json::from_str::<ItemId>("0").is_err());
        assert_eq!(
            serde_json::from_str::<ItemName>(r#"" Widget ""#).unwrap(),
            "Widget"
        );
        assert_eq!(serde_json::to_string(&StockCount::new(3).unwrap()).unwrap(), "3");
    }

    #[test]
    fn blank_category_is_absent() {
        assert_eq!(CategoryName::optional(Some("  ")), None);
        assert_eq!(
            CategoryName::optional(Some(" Outdoors ")).unwrap(),
            "Outdoors"
        );
    }
}

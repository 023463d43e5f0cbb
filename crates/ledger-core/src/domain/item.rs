//! Inventory item entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SalesDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    #[serde(rename = "ItemID", default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<Uuid>,

    #[serde(default)]
    pub code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Sales description, 4000 characters max upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_details: Option<SalesDetails>,
}

impl Item {
    pub fn unit_price(&self) -> Option<f64> {
        self.sales_details.as_ref().and_then(|d| d.unit_price)
    }
}

#[derive(Debug, Clone, Validate)]
pub struct ItemDraft {
    #[validate(length(min = 1, message = "item code cannot be blank"))]
    pub code: String,

    #[validate(length(min = 1, message = "item name cannot be blank"))]
    pub name: String,

    #[validate(length(min = 1, max = 4000, message = "item description must be 1-4000 characters"))]
    pub description: String,

    #[validate(custom(function = "positive_unit_price"))]
    pub unit_price: f64,
}

fn positive_unit_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::new("not_positive").with_message("unit price must be above 0".into()));
    }
    Ok(())
}

impl ItemDraft {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        unit_price: f64,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: description.into(),
            unit_price,
        }
    }

    pub fn into_item(self, item_id: Option<Uuid>) -> Item {
        Item {
            item_id,
            code: self.code,
            name: Some(self.name),
            description: Some(self.description),
            sales_details: Some(SalesDetails {
                unit_price: Some(self.unit_price),
                ..SalesDetails::default()
            }),
        }
    }
}

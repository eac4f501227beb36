//! Order payload as written by the upstream order system
//!
//! Field names mirror the upstream JSON exactly (camelCase, `isASAP`).
//! Collections the upstream may omit deserialize to empty rather than
//! failing the whole record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One placed order, decoded from the job record's embedded payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Preformatted placement timestamp, e.g. `01/15 6:42 PM`
    pub placement_time: String,
    pub guest_first_name: String,
    pub guest_last_name: Option<String>,
    pub guest_phone: String,
    pub order_number: u32,
    #[serde(rename = "isASAP")]
    pub is_asap: bool,
    /// Preformatted ready-by time, e.g. `7:15 PM`
    pub estimated_completion_time: String,
    pub order_type: FulfillmentType,
    pub delivery_address: Option<String>,
    pub suite_apt_floor: Option<String>,
    pub delivery_details: Option<String>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    pub sub_total: f64,
    pub tax: f64,
    pub delivery_fee: Option<f64>,
    pub tip: f64,
    pub total: f64,
}

impl Order {
    /// Guest display name: `First L.` when a last name exists, otherwise
    /// just the first name
    pub fn guest_display_name(&self) -> String {
        match self
            .guest_last_name
            .as_deref()
            .and_then(|last| last.chars().next())
        {
            Some(initial) => format!("{} {}.", self.guest_first_name, initial),
            None => self.guest_first_name.clone(),
        }
    }

    /// Order number padded to at least four digits (`214` prints `#0214`,
    /// five-digit numbers print unshortened)
    pub fn padded_order_number(&self) -> String {
        format!("{:04}", self.order_number)
    }
}

/// How the order leaves the restaurant
///
/// Unknown values are preserved verbatim so a new upstream type still
/// prints its own heading instead of failing the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FulfillmentType {
    Delivery,
    Pickup,
    Other(String),
}

impl From<String> for FulfillmentType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "DELIVERY" => FulfillmentType::Delivery,
            "PICKUP" => FulfillmentType::Pickup,
            _ => FulfillmentType::Other(raw),
        }
    }
}

impl From<FulfillmentType> for String {
    fn from(order_type: FulfillmentType) -> Self {
        order_type.to_string()
    }
}

impl fmt::Display for FulfillmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FulfillmentType::Delivery => f.write_str("DELIVERY"),
            FulfillmentType::Pickup => f.write_str("PICKUP"),
            FulfillmentType::Other(raw) => f.write_str(raw),
        }
    }
}

/// One line item with its chosen size and add-ons
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub quantity: u32,
    pub food: FoodRef,
    pub food_size: Option<FoodSizeRef>,
    #[serde(default)]
    pub options_grouped_by_add_on: Vec<AddOnGroup>,
    /// Line total across quantity, already priced by the upstream
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSizeRef {
    pub name: String,
}

/// Options under one add-on heading, e.g. `Toppings`
///
/// Options sized per half (`Left Half`, `Whole`) arrive grouped under
/// `optionsGroupedByOptionSize`; unsized ones sit directly in `options`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOnGroup {
    pub add_on_name: String,
    #[serde(default)]
    pub options_grouped_by_option_size: Vec<OptionSizeGroup>,
    #[serde(default)]
    pub options: Vec<OptionRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSizeGroup {
    pub option_size_name: String,
    #[serde(default)]
    pub options: Vec<OptionRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionRef {
    pub name: String,
}

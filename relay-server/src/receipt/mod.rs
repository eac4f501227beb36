//! Receipt Module
//!
//! The order payload model and the markup renderer that turns pending
//! jobs into printable receipts.

pub mod order;
pub mod renderer;

pub use order::{
    AddOnGroup, FoodRef, FoodSizeRef, FulfillmentType, OptionRef, OptionSizeGroup, Order,
    OrderItem,
};
pub use renderer::ReceiptRenderer;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Order Commands and Queries
// ============================================================================
//
// One module per operation, each holding the request shape, its field-level
// validation and the handler that orchestrates the domain:
// - create_order: build, price, apply voucher, validate declared totals
// - update_order: reconcile the item list against the stored order
// - get_order:    full order projection
// - delete_order: remove an order
//
// ============================================================================

pub mod create_order;
pub mod delete_order;
pub mod get_order;
pub mod update_order;

pub use create_order::*;
pub use delete_order::*;
pub use get_order::*;
pub use update_order::*;

/// One requested line, shared by the create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
}

use rust_decimal::Decimal;

use super::errors::FieldError;
use super::orders::OrderItemRequest;

// ============================================================================
// Request Shape Validation
// ============================================================================
//
// Field-level checks run before a handler touches the domain. Each violated
// field contributes one message, and all messages surface together as a
// single batch.
//
// ============================================================================

/// Checks shared by every request carrying an item list.
pub fn validate_item_lines(items: &[OrderItemRequest]) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if items.is_empty() {
        errors.push(FieldError {
            field: "order_items",
            message: "the order needs to have at least one item",
        });
    }
    if items.iter().any(|item| item.quantity <= 0) {
        errors.push(FieldError {
            field: "order_items.quantity",
            message: "the quantity of each item must be greater than zero",
        });
    }
    if items.iter().any(|item| item.price <= Decimal::ZERO) {
        errors.push(FieldError {
            field: "order_items.price",
            message: "the price of each item must be greater than zero",
        });
    }

    errors
}

/// The amount the item list adds up to, before any discount.
pub fn declared_items_total(items: &[OrderItemRequest]) -> Decimal {
    items
        .iter()
        .map(|item| Decimal::from(item.quantity) * item.price)
        .sum()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn item(quantity: i32, price: i32) -> OrderItemRequest {
        OrderItemRequest {
            product_id: Uuid::new_v4(),
            quantity,
            price: Decimal::from(price),
        }
    }

    #[test]
    fn test_valid_lines_produce_no_errors() {
        let errors = validate_item_lines(&[item(2, 50), item(1, 100)]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_list_is_reported() {
        let errors = validate_item_lines(&[]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "order_items");
    }

    #[test]
    fn test_one_message_per_violated_field() {
        // Two bad quantities and one bad price still yield exactly two
        // messages, one per field
        let errors = validate_item_lines(&[item(0, 50), item(-1, 100), item(1, 0)]);

        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.field == "order_items.quantity"));
        assert!(errors.iter().any(|e| e.field == "order_items.price"));
    }

    #[test]
    fn test_declared_items_total_sums_lines() {
        let total = declared_items_total(&[item(2, 50), item(1, 100)]);
        assert_eq!(total, Decimal::from(200));
    }
}

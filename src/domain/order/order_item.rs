use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::OrderError;

// ============================================================================
// Order Item - Line Entity Owned by the Order Aggregate
// ============================================================================

/// One line of an order.
///
/// Construction only goes through the validated [`OrderItem::new`] factory,
/// so `quantity > 0 && price >= 0` holds for every instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    id: Uuid,
    product_id: Uuid,
    quantity: i32,
    price: Decimal,
    cancelled: bool,
}

impl OrderItem {
    /// Create a validated line item, not cancelled.
    pub fn new(product_id: Uuid, quantity: i32, price: Decimal) -> Result<Self, OrderError> {
        Self::validate(quantity, price)?;

        Ok(Self {
            id: Uuid::new_v4(),
            product_id,
            quantity,
            price,
            cancelled: false,
        })
    }

    fn validate(quantity: i32, price: Decimal) -> Result<(), OrderError> {
        if quantity <= 0 {
            return Err(OrderError::InvalidQuantity(quantity));
        }
        if price < Decimal::ZERO {
            return Err(OrderError::NegativePrice(price));
        }
        Ok(())
    }

    /// Replace quantity and price. Re-adding a cancelled line un-cancels it.
    pub fn update(&mut self, quantity: i32, price: Decimal) -> Result<(), OrderError> {
        Self::validate(quantity, price)?;

        self.quantity = quantity;
        self.price = price;
        self.cancelled = false;
        Ok(())
    }

    /// Mark the line as cancelled. Cancelling twice is a no-op.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Line amount, computed whether or not the line is cancelled.
    pub fn amount(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn product_id(&self) -> Uuid {
        self.product_id
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn cancelled(&self) -> bool {
        self.cancelled
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_is_quantity_times_price() {
        for (quantity, price, expected) in [
            (2, Decimal::from(50), Decimal::from(100)),
            (1, Decimal::from(100), Decimal::from(100)),
            (3, Decimal::new(995, 2), Decimal::new(2985, 2)),
            (7, Decimal::ZERO, Decimal::ZERO),
        ] {
            let item = OrderItem::new(Uuid::new_v4(), quantity, price).unwrap();
            assert_eq!(item.amount(), expected);
        }
    }

    #[test]
    fn test_new_rejects_non_positive_quantity() {
        for quantity in [0, -1, -42] {
            let result = OrderItem::new(Uuid::new_v4(), quantity, Decimal::from(10));
            assert!(matches!(result, Err(OrderError::InvalidQuantity(q)) if q == quantity));
        }
    }

    #[test]
    fn test_new_rejects_negative_price() {
        let result = OrderItem::new(Uuid::new_v4(), 1, Decimal::from(-1));
        assert!(matches!(result, Err(OrderError::NegativePrice(_))));
    }

    #[test]
    fn test_new_accepts_zero_price() {
        let item = OrderItem::new(Uuid::new_v4(), 1, Decimal::ZERO).unwrap();
        assert_eq!(item.amount(), Decimal::ZERO);
    }

    #[test]
    fn test_update_replaces_quantity_and_price() {
        let mut item = OrderItem::new(Uuid::new_v4(), 1, Decimal::from(10)).unwrap();

        item.update(4, Decimal::from(25)).unwrap();

        assert_eq!(item.quantity(), 4);
        assert_eq!(item.price(), Decimal::from(25));
        assert_eq!(item.amount(), Decimal::from(100));
    }

    #[test]
    fn test_update_validates_like_new() {
        let mut item = OrderItem::new(Uuid::new_v4(), 1, Decimal::from(10)).unwrap();

        assert!(matches!(
            item.update(0, Decimal::from(10)),
            Err(OrderError::InvalidQuantity(0))
        ));
        assert!(matches!(
            item.update(1, Decimal::from(-5)),
            Err(OrderError::NegativePrice(_))
        ));

        // Failed updates leave the line untouched
        assert_eq!(item.quantity(), 1);
        assert_eq!(item.price(), Decimal::from(10));
    }

    #[test]
    fn test_update_resets_cancelled() {
        let mut item = OrderItem::new(Uuid::new_v4(), 1, Decimal::from(10)).unwrap();
        item.cancel();
        assert!(item.cancelled());

        item.update(2, Decimal::from(10)).unwrap();
        assert!(!item.cancelled());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut item = OrderItem::new(Uuid::new_v4(), 2, Decimal::from(30)).unwrap();

        item.cancel();
        item.cancel();

        assert!(item.cancelled());
        assert_eq!(item.amount(), Decimal::from(60));
    }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::voucher::{Voucher, VoucherDiscountType};

use super::errors::OrderError;
use super::order_item::OrderItem;

// ============================================================================
// Order Aggregate - Pricing and Voucher Association
// ============================================================================
//
// The Order owns its line items and the total/discount derivation. Every
// mutation of the item collection or the voucher association re-derives the
// amounts, so the stored totals always reflect the current state.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
}

/// Aggregate root for a customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: Uuid,
    customer_id: Uuid,
    branch_id: Uuid,
    voucher_id: Option<Uuid>,
    voucher: Option<Voucher>,
    has_voucher: bool,
    discount: Decimal,
    total_amount: Decimal,
    cancelled_items_amount: Decimal,
    date_added: DateTime<Utc>,
    status: OrderStatus,
    items: Vec<OrderItem>,
}

impl Order {
    /// Factory: a new Pending order with an empty item collection.
    pub fn create(
        customer_id: Uuid,
        branch_id: Uuid,
        utc_now: DateTime<Utc>,
        has_voucher: bool,
        discount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            branch_id,
            voucher_id: None,
            voucher: None,
            has_voucher,
            discount,
            total_amount: Decimal::ZERO,
            cancelled_items_amount: Decimal::ZERO,
            date_added: utc_now,
            status: OrderStatus::Pending,
            items: Vec::new(),
        }
    }

    /// Add a line, or update the line already holding this product.
    ///
    /// Updating resets the line's cancelled flag, so re-adding a previously
    /// cancelled product re-activates it.
    pub fn add_item(
        &mut self,
        product_id: Uuid,
        quantity: i32,
        price: Decimal,
    ) -> Result<(), OrderError> {
        match self.items.iter_mut().find(|i| i.product_id() == product_id) {
            Some(existing) => existing.update(quantity, price)?,
            None => self.items.push(OrderItem::new(product_id, quantity, price)?),
        }

        self.recalculate_amounts();
        Ok(())
    }

    /// Cancel the line holding this product. Absent product is a no-op.
    pub fn cancel_item(&mut self, product_id: Uuid) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id() == product_id) {
            item.cancel();
        }

        self.recalculate_amounts();
    }

    /// Attach a voucher to the order. At most one voucher per order;
    /// re-association is not supported.
    pub fn associate_voucher(&mut self, voucher: Voucher) -> Result<(), OrderError> {
        if self.voucher.is_some() {
            return Err(OrderError::VoucherAlreadyAssociated);
        }

        self.has_voucher = true;
        self.voucher_id = Some(voucher.id());
        self.voucher = Some(voucher);

        self.recalculate_amounts();
        Ok(())
    }

    /// Re-derive totals and discount from the current item and voucher state.
    ///
    /// Calling this repeatedly without intervening mutation yields identical
    /// amounts.
    pub fn recalculate_amounts(&mut self) {
        let items_total: Decimal = self
            .items
            .iter()
            .filter(|item| !item.cancelled())
            .map(|item| item.amount())
            .sum();

        self.cancelled_items_amount = self
            .items
            .iter()
            .filter(|item| item.cancelled())
            .map(|item| item.amount())
            .sum();

        let discount = if self.has_voucher {
            match &self.voucher {
                Some(voucher) => match voucher.discount_type() {
                    VoucherDiscountType::Percentage => {
                        items_total * voucher.percentage().unwrap_or(Decimal::ZERO)
                            / Decimal::from(100)
                    }
                    VoucherDiscountType::Value => voucher.discount().unwrap_or(Decimal::ZERO),
                },
                // Voucher declared but not yet attached: keep the discount
                // supplied at creation.
                None => self.discount,
            }
        } else {
            Decimal::ZERO
        };

        self.discount = discount;
        self.total_amount = (items_total - discount).max(Decimal::ZERO);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn customer_id(&self) -> Uuid {
        self.customer_id
    }

    pub fn branch_id(&self) -> Uuid {
        self.branch_id
    }

    #[allow(dead_code)]
    pub fn voucher_id(&self) -> Option<Uuid> {
        self.voucher_id
    }

    #[allow(dead_code)]
    pub fn has_voucher(&self) -> bool {
        self.has_voucher
    }

    pub fn discount(&self) -> Decimal {
        self.discount
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn cancelled_items_amount(&self) -> Decimal {
        self.cancelled_items_amount
    }

    pub fn date_added(&self) -> DateTime<Utc> {
        self.date_added
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

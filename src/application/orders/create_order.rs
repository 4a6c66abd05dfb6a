use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::errors::{AppError, CommandFailure, CommandResult, FieldError};
use crate::application::ports::{Clock, UnitOfWork};
use crate::application::validation::{declared_items_total, validate_item_lines};
use crate::domain::order::{Order, OrderError, OrderRepository};
use crate::domain::voucher::{check_eligibility, VoucherError, VoucherRepository};

use super::OrderItemRequest;

// ============================================================================
// Create Order Command Handler
// ============================================================================
//
// Orchestrates: request validation → build the order → apply the voucher →
// check the declared totals against the recomputed ones → persist.
//
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderCommand {
    pub customer_id: Uuid,
    pub branch_id: Uuid,
    /// Total the caller computed for the item list, before any discount.
    pub amount: Decimal,
    pub order_items: Vec<OrderItemRequest>,
    pub voucher_code: Option<String>,
    pub has_voucher: bool,
    /// Discount the caller expects the voucher to yield.
    pub discount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderResult {
    pub order_id: Uuid,
}

pub struct CreateOrderHandler {
    clock: Arc<dyn Clock>,
    voucher_repository: Arc<dyn VoucherRepository>,
    order_repository: Arc<dyn OrderRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl CreateOrderHandler {
    pub fn new(
        clock: Arc<dyn Clock>,
        voucher_repository: Arc<dyn VoucherRepository>,
        order_repository: Arc<dyn OrderRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            clock,
            voucher_repository,
            order_repository,
            unit_of_work,
        }
    }

    pub async fn handle(&self, command: CreateOrderCommand) -> CommandResult<CreateOrderResult> {
        let field_errors = validate(&command);
        if !field_errors.is_empty() {
            return Err(CommandFailure::Rejected(
                field_errors.into_iter().map(AppError::from).collect(),
            ));
        }

        let mut order = self.map_order(&command)?;

        self.apply_voucher(&command, &mut order).await?;

        validate_amounts(&command, &order)?;

        self.order_repository.add(order.clone()).await?;
        let affected = self.unit_of_work.commit().await?;

        tracing::info!(
            order_id = %order.id(),
            total = %order.total_amount(),
            discount = %order.discount(),
            rows = affected,
            "order created"
        );

        Ok(CreateOrderResult {
            order_id: order.id(),
        })
    }

    fn map_order(&self, command: &CreateOrderCommand) -> Result<Order, CommandFailure> {
        let mut order = Order::create(
            command.customer_id,
            command.branch_id,
            self.clock.utc_now(),
            command.has_voucher,
            command.discount,
        );

        for item in &command.order_items {
            order
                .add_item(item.product_id, item.quantity, item.price)
                .map_err(CommandFailure::rejected)?;
        }

        Ok(order)
    }

    async fn apply_voucher(
        &self,
        command: &CreateOrderCommand,
        order: &mut Order,
    ) -> Result<(), CommandFailure> {
        if !command.has_voucher {
            return Ok(());
        }

        let code = command.voucher_code.as_deref().unwrap_or_default();
        let Some(mut voucher) = self.voucher_repository.get_by_code(code).await? else {
            return Err(CommandFailure::rejected(VoucherError::NotFound));
        };

        let violations = check_eligibility(&voucher, self.clock.utc_now());
        if !violations.is_empty() {
            tracing::warn!(code, ?violations, "voucher rejected");
            return Err(CommandFailure::Rejected(
                violations.into_iter().map(AppError::from).collect(),
            ));
        }

        let loaded_version = voucher.version();
        order
            .associate_voucher(voucher.clone())
            .map_err(CommandFailure::rejected)?;
        voucher.redeem_one(self.clock.utc_now());
        self.voucher_repository.update(voucher, loaded_version).await?;

        Ok(())
    }
}

fn validate(command: &CreateOrderCommand) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if command.customer_id.is_nil() {
        errors.push(FieldError {
            field: "customer_id",
            message: "invalid customer id",
        });
    }
    if command.branch_id.is_nil() {
        errors.push(FieldError {
            field: "branch_id",
            message: "invalid branch id",
        });
    }

    errors.extend(validate_item_lines(&command.order_items));

    if command.amount != declared_items_total(&command.order_items) {
        errors.push(FieldError {
            field: "amount",
            message: "the total amount must be equal to the sum of quantity * price for each item",
        });
    }

    errors
}

fn validate_amounts(command: &CreateOrderCommand, order: &Order) -> Result<(), CommandFailure> {
    if order.total_amount() != command.amount - command.discount {
        return Err(CommandFailure::rejected(OrderError::TotalAmountMismatch));
    }
    if order.discount() != command.discount {
        return Err(CommandFailure::rejected(OrderError::SentAmountMismatch));
    }
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================

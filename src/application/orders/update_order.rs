use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::errors::{AppError, CommandFailure, CommandResult};
use crate::application::ports::UnitOfWork;
use crate::application::validation::validate_item_lines;
use crate::domain::order::{OrderError, OrderRepository};

use super::OrderItemRequest;

// ============================================================================
// Update Order Command Handler
// ============================================================================
//
// Reconciles the stored order against the requested item list: items the
// request no longer mentions are cancelled, everything in the request is
// added or updated in place (which re-activates a cancelled line).
//
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderCommand {
    pub order_id: Uuid,
    pub order_items: Vec<OrderItemRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateOrderResult {
    pub order_id: Uuid,
}

pub struct UpdateOrderHandler {
    order_repository: Arc<dyn OrderRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl UpdateOrderHandler {
    pub fn new(order_repository: Arc<dyn OrderRepository>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            order_repository,
            unit_of_work,
        }
    }

    pub async fn handle(&self, command: UpdateOrderCommand) -> CommandResult<UpdateOrderResult> {
        let field_errors = validate_item_lines(&command.order_items);
        if !field_errors.is_empty() {
            return Err(CommandFailure::Rejected(
                field_errors.into_iter().map(AppError::from).collect(),
            ));
        }

        let Some(mut order) = self.order_repository.get_by_id(command.order_id).await? else {
            return Err(CommandFailure::rejected(OrderError::NotFound));
        };

        let existing_products: Vec<Uuid> =
            order.items().iter().map(|item| item.product_id()).collect();
        for product_id in existing_products {
            let still_requested = command
                .order_items
                .iter()
                .any(|item| item.product_id == product_id);
            if !still_requested {
                order.cancel_item(product_id);
            }
        }

        for item in &command.order_items {
            order
                .add_item(item.product_id, item.quantity, item.price)
                .map_err(CommandFailure::rejected)?;
        }

        self.order_repository.update(order.clone()).await?;
        let affected = self.unit_of_work.commit().await?;

        tracing::info!(
            order_id = %order.id(),
            total = %order.total_amount(),
            cancelled = %order.cancelled_items_amount(),
            rows = affected,
            "order updated"
        );

        Ok(UpdateOrderResult {
            order_id: order.id(),
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::errors::{CommandFailure, CommandResult};
use crate::domain::order::{Order, OrderError, OrderRepository, OrderStatus};

// ============================================================================
// Get Order By Id Query Handler
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetOrderByIdQuery {
    pub order_id: Uuid,
}

/// Full projection of one order, items included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetOrderByIdResult {
    pub order_id: Uuid,
    pub date: DateTime<Utc>,
    pub customer_id: Uuid,
    pub branch_id: Uuid,
    pub total_amount: Decimal,
    pub discount: Decimal,
    pub cancelled_items_amount: Decimal,
    pub order_items: Vec<OrderItemProjection>,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemProjection {
    pub order_item_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub amount: Decimal,
    pub cancelled: bool,
}

pub struct GetOrderByIdHandler {
    order_repository: Arc<dyn OrderRepository>,
}

impl GetOrderByIdHandler {
    pub fn new(order_repository: Arc<dyn OrderRepository>) -> Self {
        Self { order_repository }
    }

    pub async fn handle(&self, query: GetOrderByIdQuery) -> CommandResult<GetOrderByIdResult> {
        let Some(order) = self.order_repository.get_by_id(query.order_id).await? else {
            return Err(CommandFailure::rejected(OrderError::NotFound));
        };

        Ok(project(&order))
    }
}

fn project(order: &Order) -> GetOrderByIdResult {
    GetOrderByIdResult {
        order_id: order.id(),
        date: order.date_added(),
        customer_id: order.customer_id(),
        branch_id: order.branch_id(),
        total_amount: order.total_amount(),
        discount: order.discount(),
        cancelled_items_amount: order.cancelled_items_amount(),
        order_items: order
            .items()
            .iter()
            .map(|item| OrderItemProjection {
                order_item_id: item.id(),
                product_id: item.product_id(),
                quantity: item.quantity(),
                unit_price: item.price(),
                amount: item.amount(),
                cancelled: item.cancelled(),
            })
            .collect(),
        status: order.status(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::AppError;
    use crate::infrastructure::memory::{InMemoryOrderRepository, InMemoryUnitOfWork};

    fn repository() -> Arc<InMemoryOrderRepository> {
        Arc::new(InMemoryOrderRepository::new(Arc::new(InMemoryUnitOfWork::new())))
    }

    #[tokio::test]
    async fn test_missing_order_is_not_found() {
        let handler = GetOrderByIdHandler::new(repository());

        let failure = handler
            .handle(GetOrderByIdQuery {
                order_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();

        match failure {
            CommandFailure::Rejected(errors) => {
                assert_eq!(errors, vec![AppError::Order(OrderError::NotFound)]);
            }
            CommandFailure::Storage(e) => panic!("expected a rejection, got: {e}"),
        }
    }

    #[tokio::test]
    async fn test_projection_carries_items_and_amounts() {
        let repository = repository();
        let handler = GetOrderByIdHandler::new(repository.clone());

        let customer_id = Uuid::new_v4();
        let branch_id = Uuid::new_v4();
        let kept = Uuid::new_v4();
        let cancelled = Uuid::new_v4();
        let now = Utc::now();

        let mut order = Order::create(customer_id, branch_id, now, false, Decimal::ZERO);
        order.add_item(kept, 2, Decimal::from(50)).unwrap();
        order.add_item(cancelled, 1, Decimal::from(100)).unwrap();
        order.cancel_item(cancelled);
        let order_id = order.id();
        repository.add(order).await.unwrap();

        let result = handler.handle(GetOrderByIdQuery { order_id }).await.unwrap();

        assert_eq!(result.order_id, order_id);
        assert_eq!(result.date, now);
        assert_eq!(result.customer_id, customer_id);
        assert_eq!(result.branch_id, branch_id);
        assert_eq!(result.total_amount, Decimal::from(100));
        assert_eq!(result.discount, Decimal::ZERO);
        assert_eq!(result.cancelled_items_amount, Decimal::from(100));
        assert_eq!(result.status, OrderStatus::Pending);
        assert_eq!(result.order_items.len(), 2);

        let kept_line = result
            .order_items
            .iter()
            .find(|item| item.product_id == kept)
            .expect("kept line projected");
        assert_eq!(kept_line.quantity, 2);
        assert_eq!(kept_line.unit_price, Decimal::from(50));
        assert_eq!(kept_line.amount, Decimal::from(100));
        assert!(!kept_line.cancelled);

        let cancelled_line = result
            .order_items
            .iter()
            .find(|item| item.product_id == cancelled)
            .expect("cancelled line projected");
        assert_eq!(cancelled_line.amount, Decimal::from(100));
        assert!(cancelled_line.cancelled);
    }

    #[tokio::test]
    async fn test_projection_serializes_to_json() {
        let repository = repository();
        let handler = GetOrderByIdHandler::new(repository.clone());

        let mut order =
            Order::create(Uuid::new_v4(), Uuid::new_v4(), Utc::now(), false, Decimal::ZERO);
        order.add_item(Uuid::new_v4(), 1, Decimal::from(10)).unwrap();
        let order_id = order.id();
        repository.add(order).await.unwrap();

        let result = handler.handle(GetOrderByIdQuery { order_id }).await.unwrap();
        let json = serde_json::to_string(&result).unwrap();

        assert!(json.contains("\"total_amount\":\"10\""));
        assert!(json.contains("\"status\":\"Pending\""));
    }
}

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::errors::{CommandFailure, CommandResult};
use crate::application::ports::UnitOfWork;
use crate::domain::order::{OrderError, OrderRepository};

// ============================================================================
// Delete Order Command Handler
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOrderCommand {
    pub order_id: Uuid,
}

pub struct DeleteOrderHandler {
    order_repository: Arc<dyn OrderRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl DeleteOrderHandler {
    pub fn new(order_repository: Arc<dyn OrderRepository>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            order_repository,
            unit_of_work,
        }
    }

    pub async fn handle(&self, command: DeleteOrderCommand) -> CommandResult<()> {
        let deleted = self.order_repository.delete(command.order_id).await?;
        if !deleted {
            return Err(CommandFailure::rejected(OrderError::NotFound));
        }

        let affected = self.unit_of_work.commit().await?;
        tracing::info!(order_id = %command.order_id, rows = affected, "order deleted");

        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

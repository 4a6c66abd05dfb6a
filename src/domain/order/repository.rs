use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::aggregate::Order;

// ============================================================================
// Order Persistence Collaborator
// ============================================================================

/// Persistence for orders, implemented by the infrastructure layer.
/// Loading includes the full item collection.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn get_by_id(&self, order_id: Uuid) -> Result<Option<Order>>;

    async fn add(&self, order: Order) -> Result<()>;

    async fn update(&self, order: Order) -> Result<()>;

    /// Returns false when no order with this id exists.
    async fn delete(&self, order_id: Uuid) -> Result<bool>;
}

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::UnitOfWork;
use crate::domain::order::{Order, OrderRepository};
use crate::domain::voucher::{Voucher, VoucherRepository};

// ============================================================================
// In-Memory Persistence - Backing Store for the Demo and Tests
// ============================================================================
//
// Stands in for the real database layer. Writes register with the shared
// unit of work, whose commit reports the number of rows touched since the
// previous commit. Voucher updates enforce the same expected-version
// discipline a relational store would apply.
//
// ============================================================================

/// Counts writes between commits, standing in for a database change tracker.
#[derive(Debug, Default)]
pub struct InMemoryUnitOfWork {
    pending: AtomicU64,
}

impl InMemoryUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_write(&self) {
        self.pending.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn commit(&self) -> Result<u64> {
        Ok(self.pending.swap(0, Ordering::SeqCst))
    }
}

pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<Uuid, Order>>,
    unit_of_work: Arc<InMemoryUnitOfWork>,
}

impl InMemoryOrderRepository {
    pub fn new(unit_of_work: Arc<InMemoryUnitOfWork>) -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
            unit_of_work,
        }
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn get_by_id(&self, order_id: Uuid) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(&order_id).cloned())
    }

    async fn add(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(&order.id()) {
            bail!("order {} already exists", order.id());
        }

        orders.insert(order.id(), order);
        self.unit_of_work.record_write();
        Ok(())
    }

    async fn update(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        if !orders.contains_key(&order.id()) {
            bail!("order {} does not exist", order.id());
        }

        orders.insert(order.id(), order);
        self.unit_of_work.record_write();
        Ok(())
    }

    async fn delete(&self, order_id: Uuid) -> Result<bool> {
        let removed = self.orders.write().await.remove(&order_id).is_some();
        if removed {
            self.unit_of_work.record_write();
        }
        Ok(removed)
    }
}

pub struct InMemoryVoucherRepository {
    vouchers: RwLock<HashMap<String, Voucher>>,
    unit_of_work: Arc<InMemoryUnitOfWork>,
}

impl InMemoryVoucherRepository {
    pub fn new(unit_of_work: Arc<InMemoryUnitOfWork>) -> Self {
        Self {
            vouchers: RwLock::new(HashMap::new()),
            unit_of_work,
        }
    }

    /// Seed helper used by the demo wiring and tests.
    pub async fn insert(&self, voucher: Voucher) {
        self.vouchers
            .write()
            .await
            .insert(voucher.code().to_string(), voucher);
    }
}

#[async_trait]
impl VoucherRepository for InMemoryVoucherRepository {
    async fn get_by_code(&self, code: &str) -> Result<Option<Voucher>> {
        Ok(self.vouchers.read().await.get(code).cloned())
    }

    async fn update(&self, mut voucher: Voucher, expected_version: i64) -> Result<()> {
        let mut vouchers = self.vouchers.write().await;

        let Some(stored) = vouchers.get(voucher.code()) else {
            bail!("voucher {} does not exist", voucher.code());
        };
        if stored.version() != expected_version {
            bail!(
                "voucher {} was modified concurrently (stored version {}, expected {})",
                voucher.code(),
                stored.version(),
                expected_version
            );
        }

        voucher.set_version(expected_version + 1);
        vouchers.insert(voucher.code().to_string(), voucher);
        self.unit_of_work.record_write();
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

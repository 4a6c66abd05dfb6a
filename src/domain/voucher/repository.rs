use anyhow::Result;
use async_trait::async_trait;

use super::aggregate::Voucher;

// ============================================================================
// Voucher Persistence Collaborator
// ============================================================================

/// Persistence for vouchers, implemented by the infrastructure layer.
///
/// `update` carries the version the caller loaded the voucher at. The store
/// must reject the write when the stored version differs, so two concurrent
/// redemptions of the same code cannot both decrement from the same
/// snapshot.
#[async_trait]
pub trait VoucherRepository: Send + Sync {
    async fn get_by_code(&self, code: &str) -> Result<Option<Voucher>>;

    async fn update(&self, voucher: Voucher, expected_version: i64) -> Result<()>;
}

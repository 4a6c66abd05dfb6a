// ============================================================================
// Voucher Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VoucherError {
    #[error("Voucher not found")]
    NotFound,

    #[error("This voucher is expired")]
    Expired,

    #[error("This voucher has already been used")]
    QuantityExceeded,

    #[error("This voucher is no longer active")]
    NotActive,
}

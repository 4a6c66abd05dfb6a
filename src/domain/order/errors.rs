use rust_decimal::Decimal;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Order not found")]
    NotFound,

    #[error("Invalid item quantity: {0}")]
    InvalidQuantity(i32),

    #[error("Invalid item price: {0}")]
    NegativePrice(Decimal),

    #[error("The order total amount is different from the total amount of individual items")]
    TotalAmountMismatch,

    #[error("The amount sent is different from the order amount")]
    SentAmountMismatch,

    #[error("The order already has an associated voucher")]
    VoucherAlreadyAssociated,
}

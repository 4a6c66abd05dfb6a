use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::eligibility;

// ============================================================================
// Voucher - Discount Code with Redemption Tracking
// ============================================================================

/// Selects which of the two discount fields applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VoucherDiscountType {
    Percentage,
    Value,
}

/// A discount code with a remaining redemption quantity and an expiry date.
///
/// Created active and unused. Redemptions decrement the quantity; once it
/// reaches zero the voucher moves to its terminal used state and no further
/// redemption is possible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voucher {
    id: Uuid,
    code: String,
    percentage: Option<Decimal>,
    discount: Option<Decimal>,
    quantity: i32,
    discount_type: VoucherDiscountType,
    created_at: DateTime<Utc>,
    used_at: Option<DateTime<Utc>>,
    expiration_date: DateTime<Utc>,
    active: bool,
    used: bool,
    version: i64,
}

impl Voucher {
    pub fn create(
        code: impl Into<String>,
        percentage: Option<Decimal>,
        discount: Option<Decimal>,
        quantity: i32,
        discount_type: VoucherDiscountType,
        expiration_date: DateTime<Utc>,
        utc_now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            percentage,
            discount,
            quantity,
            discount_type,
            created_at: utc_now,
            used_at: None,
            expiration_date,
            active: true,
            used: false,
            version: 0,
        }
    }

    /// All three eligibility checks hold at `utc_now`.
    #[allow(dead_code)]
    pub fn is_eligible(&self, utc_now: DateTime<Utc>) -> bool {
        eligibility::is_within_validity(self, utc_now)
            && eligibility::has_quantity_remaining(self)
            && eligibility::is_active(self)
    }

    /// Consume one redemption. Exhausting the quantity moves the voucher to
    /// its terminal used state.
    pub fn redeem_one(&mut self, utc_now: DateTime<Utc>) {
        self.quantity -= 1;
        if self.quantity <= 0 {
            self.mark_used(utc_now);
        }
    }

    /// Force the terminal used state, independent of the remaining quantity.
    pub fn mark_used(&mut self, utc_now: DateTime<Utc>) {
        self.active = false;
        self.used = true;
        self.quantity = 0;
        self.used_at = Some(utc_now);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn percentage(&self) -> Option<Decimal> {
        self.percentage
    }

    pub fn discount(&self) -> Option<Decimal> {
        self.discount
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn discount_type(&self) -> VoucherDiscountType {
        self.discount_type
    }

    #[allow(dead_code)]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[allow(dead_code)]
    pub fn used_at(&self) -> Option<DateTime<Utc>> {
        self.used_at
    }

    pub fn expiration_date(&self) -> DateTime<Utc> {
        self.expiration_date
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn used(&self) -> bool {
        self.used
    }

    /// Store-assigned concurrency token. Bumped by the persistence
    /// collaborator on every successful update.
    pub fn version(&self) -> i64 {
        self.version
    }

    pub(crate) fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

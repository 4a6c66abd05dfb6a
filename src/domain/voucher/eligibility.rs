use chrono::{DateTime, Utc};

use super::aggregate::Voucher;
use super::errors::VoucherError;

// ============================================================================
// Voucher Eligibility Checks
// ============================================================================
//
// Three independent predicates gate redemption. Redemption-time validation
// evaluates all of them and collects every failing check, so the caller can
// report all violated conditions at once instead of only the first.
//
// ============================================================================

/// The expiration date has not elapsed.
pub fn is_within_validity(voucher: &Voucher, utc_now: DateTime<Utc>) -> bool {
    voucher.expiration_date() >= utc_now
}

/// At least one redemption remains.
pub fn has_quantity_remaining(voucher: &Voucher) -> bool {
    voucher.quantity() > 0
}

/// The voucher is active and has not reached its terminal used state.
pub fn is_active(voucher: &Voucher) -> bool {
    voucher.active() && !voucher.used()
}

/// Evaluate every check against the voucher and return all that fail.
pub fn check_eligibility(voucher: &Voucher, utc_now: DateTime<Utc>) -> Vec<VoucherError> {
    let mut errors = Vec::new();

    if !is_within_validity(voucher, utc_now) {
        errors.push(VoucherError::Expired);
    }
    if !has_quantity_remaining(voucher) {
        errors.push(VoucherError::QuantityExceeded);
    }
    if !is_active(voucher) {
        errors.push(VoucherError::NotActive);
    }

    errors
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voucher::aggregate::VoucherDiscountType;
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn voucher(quantity: i32, expires_in: Duration) -> Voucher {
        let now = Utc::now();
        Voucher::create(
            "TEST",
            Some(Decimal::from(10)),
            None,
            quantity,
            VoucherDiscountType::Percentage,
            now + expires_in,
            now,
        )
    }

    #[test]
    fn test_within_validity_boundary() {
        let now = Utc::now();
        let voucher = voucher(1, Duration::zero());

        // Expiring exactly now is still valid
        assert!(is_within_validity(&voucher, voucher.expiration_date()));
        assert!(!is_within_validity(&voucher, now + Duration::seconds(1)));
    }

    #[test]
    fn test_quantity_remaining() {
        assert!(has_quantity_remaining(&voucher(1, Duration::days(1))));
        assert!(!has_quantity_remaining(&voucher(0, Duration::days(1))));
    }

    #[test]
    fn test_active_excludes_used() {
        let mut used = voucher(3, Duration::days(1));
        used.mark_used(Utc::now());

        assert!(is_active(&voucher(3, Duration::days(1))));
        assert!(!is_active(&used));
    }

    #[test]
    fn test_check_eligibility_passes_fresh_voucher() {
        let errors = check_eligibility(&voucher(3, Duration::days(1)), Utc::now());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_check_eligibility_reports_single_failure() {
        let errors = check_eligibility(&voucher(3, Duration::days(-1)), Utc::now());
        assert_eq!(errors, vec![VoucherError::Expired]);
    }

    #[test]
    fn test_check_eligibility_collects_expired_and_exhausted() {
        let errors = check_eligibility(&voucher(0, Duration::days(-1)), Utc::now());

        assert!(errors.contains(&VoucherError::Expired));
        assert!(errors.contains(&VoucherError::QuantityExceeded));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_check_eligibility_collects_all_three() {
        let mut voucher = voucher(1, Duration::days(-1));
        voucher.mark_used(Utc::now());

        let errors = check_eligibility(&voucher, Utc::now());

        assert_eq!(
            errors,
            vec![
                VoucherError::Expired,
                VoucherError::QuantityExceeded,
                VoucherError::NotActive,
            ]
        );
    }
}

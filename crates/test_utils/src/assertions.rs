//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::{Money, StayPeriod};
use domain_reservation::LedgerProjection;
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than
/// tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value is positive
pub fn assert_money_positive(money: &Money) {
    assert!(
        money.is_positive(),
        "Expected positive money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that the ledger invariant holds against a known paid total
///
/// `remaining_balance = max(0, total_billings − total_paid)` is the core
/// correctness property of the billing system; call this after every
/// mutation in integration scenarios.
pub fn assert_ledger_invariant(ledger: &LedgerProjection, total_paid: Money) {
    assert!(
        ledger.holds_invariant(total_paid),
        "Ledger invariant violated: total_billings={}, total_paid={}, remaining_balance={}",
        ledger.total_billings.amount(),
        total_paid.amount(),
        ledger.remaining_balance.amount()
    );
    assert!(
        !ledger.remaining_balance.is_negative(),
        "Remaining balance went negative: {}",
        ledger.remaining_balance.amount()
    );
}

/// Asserts that two stays overlap
pub fn assert_stays_overlap(a: &StayPeriod, b: &StayPeriod) {
    assert!(
        a.overlaps(b),
        "Stays {:?} and {:?} do not overlap",
        a,
        b
    );
}

/// Asserts that two stays do not overlap
pub fn assert_stays_disjoint(a: &StayPeriod, b: &StayPeriod) {
    assert!(
        !a.overlaps(b),
        "Stays {:?} and {:?} unexpectedly overlap",
        a,
        b
    );
}

/// Asserts that a decimal value is approximately equal to another
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Decimals differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => panic!("{}: got Ok({:?})", $msg, value),
            Err(e) => e,
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!("Expected Err matching {}, got Ok({:?})", stringify!($pattern), value),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{MoneyFixtures, TemporalFixtures};
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_assert_money_approx_eq_passes() {
        let m1 = Money::new(dec!(100.001), Currency::PHP);
        let m2 = Money::new(dec!(100.002), Currency::PHP);
        assert_money_approx_eq(&m1, &m2, dec!(0.01));
    }

    #[test]
    #[should_panic(expected = "Currency mismatch")]
    fn test_assert_money_approx_eq_currency_mismatch() {
        assert_money_approx_eq(
            &MoneyFixtures::php_500(),
            &MoneyFixtures::usd_100(),
            dec!(0.01),
        );
    }

    #[test]
    fn test_assert_ledger_invariant_passes() {
        let paid = MoneyFixtures::php_partial_payment();
        let ledger = LedgerProjection::recompute(
            &[MoneyFixtures::php_500(), MoneyFixtures::php_300()],
            &TemporalFixtures::four_night_stay(),
            paid,
        )
        .unwrap();

        assert_ledger_invariant(&ledger, paid);
    }

    #[test]
    #[should_panic(expected = "Ledger invariant violated")]
    fn test_assert_ledger_invariant_catches_drift() {
        let ledger = LedgerProjection::recompute(
            &[MoneyFixtures::php_500()],
            &TemporalFixtures::four_night_stay(),
            MoneyFixtures::php_zero(),
        )
        .unwrap();

        // Claim more was paid than the ledger was derived against
        assert_ledger_invariant(&ledger, MoneyFixtures::php_partial_payment());
    }

    #[test]
    fn test_stay_overlap_assertions() {
        let stay = TemporalFixtures::four_night_stay();
        assert_stays_overlap(&stay, &TemporalFixtures::overlapping_stay());
        assert_stays_disjoint(&stay, &TemporalFixtures::back_to_back_stay());
    }

    #[test]
    fn test_assert_ok_macro() {
        let value = assert_ok!(Ok::<i32, String>(42));
        assert_eq!(value, 42);
    }

    #[test]
    fn test_assert_err_macro() {
        let error = assert_err!(Err::<i32, String>("boom".to_string()));
        assert_eq!(error, "boom");
    }
}

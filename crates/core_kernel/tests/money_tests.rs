//! Comprehensive unit tests for the Money module
//!
//! Tests cover money creation, arithmetic operations, saturating
//! subtraction, currency handling, and edge cases.

use core_kernel::{Money, Currency, MoneyError};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_creates_money_with_correct_amount() {
        let m = Money::new(dec!(500.50), Currency::PHP);
        assert_eq!(m.amount(), dec!(500.50));
        assert_eq!(m.currency(), Currency::PHP);
    }

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789), Currency::PHP);
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_from_minor_converts_centavos_correctly() {
        let m = Money::from_minor(50050, Currency::PHP);
        assert_eq!(m.amount(), dec!(500.50));
    }

    #[test]
    fn test_from_minor_handles_jpy_no_decimals() {
        let m = Money::from_minor(10000, Currency::JPY);
        assert_eq!(m.amount(), dec!(10000));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::PHP);
        assert!(m.is_zero());
        assert_eq!(m.currency(), Currency::PHP);
    }

    #[test]
    fn test_negative_amount_creation() {
        let m = Money::new(dec!(-100.00), Currency::PHP);
        assert!(m.is_negative());
        assert_eq!(m.amount(), dec!(-100.00));
    }
}

mod predicates {
    use super::*;

    #[test]
    fn test_is_zero_true_for_zero_amount() {
        let m = Money::zero(Currency::PHP);
        assert!(m.is_zero());
        assert!(!m.is_positive());
    }

    #[test]
    fn test_is_positive_false_for_zero() {
        let m = Money::zero(Currency::PHP);
        assert!(!m.is_positive());
    }

    #[test]
    fn test_abs_of_negative_amount() {
        let m = Money::new(dec!(-250.00), Currency::PHP);
        assert_eq!(m.abs().amount(), dec!(250.00));
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_add_same_currency() {
        let a = Money::new(dec!(500.00), Currency::PHP);
        let b = Money::new(dec!(300.00), Currency::PHP);

        let sum = a.checked_add(&b).unwrap();
        assert_eq!(sum.amount(), dec!(800.00));
    }

    #[test]
    fn test_checked_add_rejects_currency_mismatch() {
        let a = Money::new(dec!(500.00), Currency::PHP);
        let b = Money::new(dec!(300.00), Currency::USD);

        assert!(matches!(
            a.checked_add(&b),
            Err(MoneyError::CurrencyMismatch(_, _))
        ));
    }

    #[test]
    fn test_checked_sub_can_go_negative() {
        let a = Money::new(dec!(300.00), Currency::PHP);
        let b = Money::new(dec!(500.00), Currency::PHP);

        let diff = a.checked_sub(&b).unwrap();
        assert_eq!(diff.amount(), dec!(-200.00));
    }

    #[test]
    fn test_saturating_sub_floors_at_zero() {
        let a = Money::new(dec!(300.00), Currency::PHP);
        let b = Money::new(dec!(500.00), Currency::PHP);

        let diff = a.saturating_sub(&b).unwrap();
        assert!(diff.is_zero());
    }

    #[test]
    fn test_saturating_sub_exact_amount_is_zero() {
        let a = Money::new(dec!(500.00), Currency::PHP);
        let b = Money::new(dec!(500.00), Currency::PHP);

        assert!(a.saturating_sub(&b).unwrap().is_zero());
    }

    #[test]
    fn test_saturating_sub_rejects_currency_mismatch() {
        let a = Money::new(dec!(500.00), Currency::PHP);
        let b = Money::new(dec!(300.00), Currency::EUR);

        assert!(a.saturating_sub(&b).is_err());
    }

    #[test]
    fn test_multiply_by_scalar() {
        let rate = Money::new(dec!(800.00), Currency::PHP);
        let total = rate.multiply(dec!(4));
        assert_eq!(total.amount(), dec!(3200.00));
    }

    #[test]
    fn test_multiply_by_zero_nights() {
        let rate = Money::new(dec!(800.00), Currency::PHP);
        assert!(rate.multiply(dec!(0)).is_zero());
    }

    #[test]
    fn test_neg_flips_sign() {
        let m = Money::new(dec!(100.00), Currency::PHP);
        assert_eq!((-m).amount(), dec!(-100.00));
    }
}

mod display {
    use super::*;

    #[test]
    fn test_php_display_with_symbol() {
        let m = Money::new(dec!(1234.50), Currency::PHP);
        assert_eq!(m.to_string(), "₱ 1234.50");
    }

    #[test]
    fn test_jpy_display_no_decimals() {
        let m = Money::new(dec!(10000), Currency::JPY);
        assert_eq!(m.to_string(), "¥ 10000");
    }

    #[test]
    fn test_currency_display_is_iso_code() {
        assert_eq!(Currency::PHP.to_string(), "PHP");
        assert_eq!(Currency::USD.to_string(), "USD");
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_round_to_currency_two_places() {
        let m = Money::new(dec!(100.1275), Currency::PHP);
        assert_eq!(m.round_to_currency().amount(), dec!(100.13));
    }

    #[test]
    fn test_round_to_currency_jpy_whole_units() {
        let m = Money::new(dec!(100.4), Currency::JPY);
        assert_eq!(m.round_to_currency().amount(), dec!(100));
    }
}

//! The billing ledger projection
//!
//! A reservation's financial fields are stored for querying but fully
//! derived: the nightly rate from the assigned bed prices, the total from
//! rate times nights, the balance from total minus payments received. This
//! module is the single place that derivation happens. Call sites never
//! patch the stored fields with inline arithmetic; they rebuild the whole
//! projection through one of the constructors here.
//!
//! # Invariants
//!
//! - `total_billings = daily_rate × nights`, nights floored at zero
//! - `remaining_balance = max(0, total_billings − total paid)`
//! - Recomputation is pure: the same inputs always produce the same
//!   projection, so it is safe to re-run after every mutating event

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, MoneyError, StayPeriod};

/// The derived financial state of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerProjection {
    /// Sum of the nightly prices of all non-exempted guests' beds
    pub daily_rate: Money,
    /// Daily rate times the billable length of stay
    pub total_billings: Money,
    /// What is still owed, floored at zero
    pub remaining_balance: Money,
}

impl LedgerProjection {
    /// An empty ledger for a reservation with no beds assigned yet
    pub fn zero(currency: Currency) -> Self {
        Self {
            daily_rate: Money::zero(currency),
            total_billings: Money::zero(currency),
            remaining_balance: Money::zero(currency),
        }
    }

    /// Recomputes the projection from the priced beds of non-exempted guests
    ///
    /// Beds without a price contribute nothing; callers pass the prices that
    /// exist. `total_paid` is the sum of all payments received to date.
    pub fn recompute(
        bed_prices: &[Money],
        stay: &StayPeriod,
        total_paid: Money,
    ) -> Result<Self, MoneyError> {
        let currency = total_paid.currency();
        let mut daily_rate = Money::zero(currency);
        for price in bed_prices {
            daily_rate = daily_rate.checked_add(price)?;
        }
        Self::from_daily_rate(daily_rate, stay, total_paid)
    }

    /// Recomputes the projection after a guest's bed cost is waived
    ///
    /// The waived price comes off the prior daily rate, floored at zero, and
    /// the rest of the derivation runs unchanged against the payments
    /// already received. Money collected beyond the new total is absorbed,
    /// not refunded.
    pub fn recompute_after_waiver(
        prior_daily_rate: Money,
        waived_price: Money,
        stay: &StayPeriod,
        total_paid: Money,
    ) -> Result<Self, MoneyError> {
        let daily_rate = prior_daily_rate.saturating_sub(&waived_price)?;
        Self::from_daily_rate(daily_rate, stay, total_paid)
    }

    /// Derives totals and balance from an already-known daily rate
    ///
    /// This is the single derivation every recompute path funnels through.
    pub fn from_daily_rate(
        daily_rate: Money,
        stay: &StayPeriod,
        total_paid: Money,
    ) -> Result<Self, MoneyError> {
        let nights = Decimal::from(stay.billable_nights());
        let total_billings = daily_rate.multiply(nights);
        let remaining_balance = total_billings.saturating_sub(&total_paid)?;

        Ok(Self {
            daily_rate,
            total_billings,
            remaining_balance,
        })
    }

    /// Returns the projection after a payment shrinks the balance
    ///
    /// The payment recorder validates `amount ≤ remaining_balance` under a
    /// row lock before calling this; the floor is a backstop, not a policy.
    pub fn after_payment(&self, amount: Money) -> Result<Self, MoneyError> {
        let remaining_balance = self.remaining_balance.saturating_sub(&amount)?;
        Ok(Self {
            daily_rate: self.daily_rate,
            total_billings: self.total_billings,
            remaining_balance,
        })
    }

    /// Returns true if nothing is owed
    pub fn is_settled(&self) -> bool {
        self.remaining_balance.is_zero()
    }

    /// Checks the core invariant against a known paid total
    pub fn holds_invariant(&self, total_paid: Money) -> bool {
        self.total_billings
            .saturating_sub(&total_paid)
            .map(|expected| expected == self.remaining_balance)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn php(amount: Decimal) -> Money {
        Money::new(amount, Currency::PHP)
    }

    fn four_night_stay() -> StayPeriod {
        StayPeriod::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_recompute_from_bed_prices() {
        let ledger = LedgerProjection::recompute(
            &[php(dec!(500)), php(dec!(300))],
            &four_night_stay(),
            Money::zero(Currency::PHP),
        )
        .unwrap();

        assert_eq!(ledger.daily_rate, php(dec!(800)));
        assert_eq!(ledger.total_billings, php(dec!(3200)));
        assert_eq!(ledger.remaining_balance, php(dec!(3200)));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let prices = [php(dec!(500)), php(dec!(300))];
        let stay = four_night_stay();
        let paid = php(dec!(1200));

        let first = LedgerProjection::recompute(&prices, &stay, paid).unwrap();
        let second = LedgerProjection::recompute(&prices, &stay, paid).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_waiver_follows_worked_scenario() {
        // Two beds at 500 and 300 for four nights, 1200 already paid,
        // then the 300 bed is waived.
        let stay = four_night_stay();
        let paid = php(dec!(1200));

        let ledger = LedgerProjection::recompute_after_waiver(
            php(dec!(800)),
            php(dec!(300)),
            &stay,
            paid,
        )
        .unwrap();

        assert_eq!(ledger.daily_rate, php(dec!(500)));
        assert_eq!(ledger.total_billings, php(dec!(2000)));
        assert_eq!(ledger.remaining_balance, php(dec!(800)));
    }

    #[test]
    fn test_waiver_floors_daily_rate_at_zero() {
        let ledger = LedgerProjection::recompute_after_waiver(
            php(dec!(300)),
            php(dec!(500)),
            &four_night_stay(),
            Money::zero(Currency::PHP),
        )
        .unwrap();

        assert!(ledger.daily_rate.is_zero());
        assert!(ledger.total_billings.is_zero());
        assert!(ledger.remaining_balance.is_zero());
    }

    #[test]
    fn test_overpaid_total_absorbed_not_refunded() {
        // 3200 collected, then billings recomputed down to 2000
        let ledger = LedgerProjection::recompute_after_waiver(
            php(dec!(800)),
            php(dec!(300)),
            &four_night_stay(),
            php(dec!(3200)),
        )
        .unwrap();

        assert!(ledger.remaining_balance.is_zero());
    }

    #[test]
    fn test_after_payment_shrinks_balance() {
        let ledger = LedgerProjection::recompute(
            &[php(dec!(800))],
            &four_night_stay(),
            Money::zero(Currency::PHP),
        )
        .unwrap();

        let updated = ledger.after_payment(php(dec!(1200))).unwrap();
        assert_eq!(updated.remaining_balance, php(dec!(2000)));
        assert_eq!(updated.total_billings, ledger.total_billings);
        assert_eq!(updated.daily_rate, ledger.daily_rate);
    }

    #[test]
    fn test_zero_night_stay_bills_nothing() {
        let stay = StayPeriod::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
        .unwrap();

        let ledger =
            LedgerProjection::recompute(&[php(dec!(500))], &stay, Money::zero(Currency::PHP))
                .unwrap();

        assert!(ledger.total_billings.is_zero());
    }

    #[test]
    fn test_invariant_check() {
        let paid = php(dec!(1200));
        let ledger = LedgerProjection::recompute(
            &[php(dec!(500)), php(dec!(300))],
            &four_night_stay(),
            paid,
        )
        .unwrap();

        assert!(ledger.holds_invariant(paid));
        assert!(!ledger.holds_invariant(php(dec!(0))));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn arb_stay() -> impl Strategy<Value = StayPeriod> {
        (0i64..365, 0i64..60).prop_map(|(offset, len)| {
            let check_in = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
                + chrono::Duration::days(offset);
            StayPeriod::new(check_in, check_in + chrono::Duration::days(len)).unwrap()
        })
    }

    proptest! {
        #[test]
        fn balance_never_negative(
            prices in proptest::collection::vec(0i64..1_000_000, 0..6),
            paid in 0i64..10_000_000,
            stay in arb_stay()
        ) {
            let prices: Vec<Money> = prices
                .into_iter()
                .map(|p| Money::from_minor(p, Currency::PHP))
                .collect();
            let paid = Money::from_minor(paid, Currency::PHP);

            let ledger = LedgerProjection::recompute(&prices, &stay, paid).unwrap();
            prop_assert!(!ledger.remaining_balance.is_negative());
            prop_assert!(ledger.holds_invariant(paid));
        }

        #[test]
        fn waiver_never_raises_rate(
            rate in 0i64..1_000_000,
            waived in 0i64..1_000_000,
            stay in arb_stay()
        ) {
            let rate = Money::from_minor(rate, Currency::PHP);
            let waived = Money::from_minor(waived, Currency::PHP);

            let ledger = LedgerProjection::recompute_after_waiver(
                rate,
                waived,
                &stay,
                Money::zero(Currency::PHP),
            )
            .unwrap();

            prop_assert!(ledger.daily_rate.amount() <= rate.amount());
            prop_assert!(!ledger.daily_rate.is_negative());
        }
    }
}

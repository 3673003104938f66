//! Payment snapshot captured when a booking is created.
//!
//! Payment state is orthogonal to the lifecycle: no status transition
//! requires a payment threshold.

use serde::{Deserialize, Serialize};

use salon_core::error::AppError;

/// How much of the booking has been paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Nothing paid yet.
    None,
    /// A deposit was paid.
    Partial,
    /// Fully paid.
    Paid,
}

/// Channel used for the payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Airtel mobile money.
    Airtel,
    /// Cash at the salon.
    Cash,
}

/// Payment choice made by the client at reservation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOption {
    /// Pay everything up front.
    Full,
    /// Pay a deposit now, the balance at the salon.
    Deposit,
    /// Pay everything in cash at the salon.
    Cash,
}

/// Amounts copied onto a booking. `balance_remaining` is always
/// `amount_total - deposit_paid` and never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSnapshot {
    pub amount_total: i64,
    pub deposit_paid: i64,
    pub balance_remaining: i64,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
}

impl PaymentSnapshot {
    /// Compute the snapshot for a service priced at `price`.
    ///
    /// `deposit_amount` only applies to [`PaymentOption::Deposit`]; when it
    /// is absent the deposit is `price * default_ratio`, rounded.
    pub fn compute(
        price: i64,
        option: PaymentOption,
        deposit_amount: Option<i64>,
        default_ratio: f64,
    ) -> Result<Self, AppError> {
        if price < 0 {
            return Err(AppError::validation("Price cannot be negative"));
        }

        let (deposit_paid, payment_method) = match option {
            PaymentOption::Full => (price, PaymentMethod::Airtel),
            PaymentOption::Cash => (0, PaymentMethod::Cash),
            PaymentOption::Deposit => {
                let deposit = deposit_amount
                    .unwrap_or_else(|| (price as f64 * default_ratio).round() as i64);
                if deposit < 0 {
                    return Err(AppError::validation("Deposit cannot be negative"));
                }
                if deposit > price {
                    return Err(AppError::validation("Deposit cannot exceed the total amount"));
                }
                (deposit, PaymentMethod::Airtel)
            }
        };

        let payment_status = if deposit_paid == 0 {
            PaymentStatus::None
        } else if deposit_paid == price {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Partial
        };

        Ok(Self {
            amount_total: price,
            deposit_paid,
            balance_remaining: price - deposit_paid,
            payment_status,
            payment_method,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payment() {
        let snap = PaymentSnapshot::compute(5000, PaymentOption::Full, None, 0.5).unwrap();
        assert_eq!(snap.deposit_paid, 5000);
        assert_eq!(snap.balance_remaining, 0);
        assert_eq!(snap.payment_status, PaymentStatus::Paid);
        assert_eq!(snap.payment_method, PaymentMethod::Airtel);
    }

    #[test]
    fn test_default_deposit_ratio() {
        let snap = PaymentSnapshot::compute(5001, PaymentOption::Deposit, None, 0.5).unwrap();
        assert_eq!(snap.deposit_paid, 2501);
        assert_eq!(snap.balance_remaining, 2500);
        assert_eq!(snap.payment_status, PaymentStatus::Partial);
    }

    #[test]
    fn test_cash_pays_nothing_up_front() {
        let snap = PaymentSnapshot::compute(3000, PaymentOption::Cash, Some(999), 0.5).unwrap();
        assert_eq!(snap.deposit_paid, 0);
        assert_eq!(snap.balance_remaining, 3000);
        assert_eq!(snap.payment_status, PaymentStatus::None);
        assert_eq!(snap.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn test_deposit_above_total_rejected() {
        assert!(PaymentSnapshot::compute(1000, PaymentOption::Deposit, Some(1001), 0.5).is_err());
        assert!(PaymentSnapshot::compute(1000, PaymentOption::Deposit, Some(-1), 0.5).is_err());
    }

    #[test]
    fn test_balance_invariant_holds() {
        for option in [PaymentOption::Full, PaymentOption::Deposit, PaymentOption::Cash] {
            for price in [0, 1, 999, 10_000] {
                let snap = PaymentSnapshot::compute(price, option, None, 0.5).unwrap();
                assert_eq!(snap.balance_remaining, snap.amount_total - snap.deposit_paid);
                assert!(snap.balance_remaining >= 0);
            }
        }
    }
}

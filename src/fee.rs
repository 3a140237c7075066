use rust_decimal::Decimal;

use crate::account::AccountCategory;

/// Fee charged on outgoing value movement. The commission is taken out of
/// the gross amount and credited to no account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fee {
    pub percent: Decimal,
    pub commission: Decimal,
    pub net: Decimal,
}

impl Fee {
    /// Returns `None` if computing the commission overflows.
    pub fn charge(amount: Decimal, percent: Decimal) -> Option<Self> {
        let commission = amount
            .checked_mul(percent)?
            .checked_div(Decimal::ONE_HUNDRED)?;
        Some(Self {
            percent,
            commission,
            net: amount.checked_sub(commission)?,
        })
    }
}

impl AccountCategory {
    pub fn fee_percent(self) -> Decimal {
        match self {
            AccountCategory::Savings => Decimal::new(15, 1),
            AccountCategory::Checking => Decimal::new(20, 1),
            AccountCategory::Business => Decimal::new(25, 1),
        }
    }
}

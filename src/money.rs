use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

/// Displays a monetary amount rounded to exactly three decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money(pub Decimal);

impl Money {
    pub const DECIMAL_PLACES: u32 = 3;
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(Self::DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{rounded:.3}")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("100", "100.000")]
    #[case("0.5", "0.500")]
    #[case("49.25", "49.250")]
    #[case("1.0005", "1.001")]
    #[case("2.12345", "2.123")]
    #[case("0", "0.000")]
    fn renders_three_decimals(#[case] amount: &str, #[case] expected: &str) {
        let money = Money(Decimal::from_str(amount).unwrap());
        assert_eq!(money.to_string(), expected);
    }
}

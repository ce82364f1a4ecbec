use rust_decimal::Decimal;
use serde::Serialize;

pub type Price = Decimal;

pub const PRICE_PRECISION: u32 = 2;

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulkTier {
    pub min_quantity: u32,
    pub percentage: Decimal,
}

/// Quantity tiers in ascending order of `min_quantity`.
pub const BULK_TIERS: [BulkTier; 4] = [
    BulkTier {
        min_quantity: 5,
        percentage: Decimal::from_parts(5, 0, 0, false, 0),
    },
    BulkTier {
        min_quantity: 10,
        percentage: Decimal::from_parts(10, 0, 0, false, 0),
    },
    BulkTier {
        min_quantity: 20,
        percentage: Decimal::from_parts(15, 0, 0, false, 0),
    },
    BulkTier {
        min_quantity: 50,
        percentage: Decimal::from_parts(20, 0, 0, false, 0),
    },
];

pub fn round_price(amount: Price) -> Price {
    amount.round_dp(PRICE_PRECISION)
}

/// Dollar label for an amount, rounded the same way as computed prices.
pub fn format_price(amount: Price) -> String {
    format!("${:.2}", round_price(amount))
}

pub fn percent_factor(percentage: Decimal) -> Decimal {
    percentage / Decimal::ONE_HUNDRED
}

/// Highest tier whose threshold does not exceed `quantity`.
pub fn bulk_tier_for(quantity: u32) -> Option<&'static BulkTier> {
    BULK_TIERS
        .iter()
        .rev()
        .find(|tier| tier.min_quantity <= quantity)
}

pub fn bulk_discount_percentage(quantity: u32) -> Decimal {
    bulk_tier_for(quantity).map_or(Decimal::ZERO, |tier| tier.percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn bulk_tiers_pick_highest_threshold() {
        assert_eq!(bulk_discount_percentage(1), dec!(0));
        assert_eq!(bulk_discount_percentage(4), dec!(0));
        assert_eq!(bulk_discount_percentage(5), dec!(5));
        assert_eq!(bulk_discount_percentage(9), dec!(5));
        assert_eq!(bulk_discount_percentage(10), dec!(10));
        assert_eq!(bulk_discount_percentage(12), dec!(10));
        assert_eq!(bulk_discount_percentage(49), dec!(15));
        assert_eq!(bulk_discount_percentage(50), dec!(20));
        assert_eq!(bulk_discount_percentage(10_000), dec!(20));
    }

    #[test]
    fn round_price_uses_two_places() {
        assert_eq!(round_price(dec!(10.123)), dec!(10.12));
        assert_eq!(round_price(dec!(10.129)), dec!(10.13));
        assert_eq!(round_price(dec!(10.125)), dec!(10.12));
        assert_eq!(round_price(dec!(10.135)), dec!(10.14));
    }

    #[test]
    fn format_price_rounds_before_padding() {
        assert_eq!(format_price(dec!(5)), "$5.00");
        assert_eq!(format_price(dec!(99.995)), "$100.00");
        assert_eq!(format_price(dec!(5.015)), "$5.02");
        assert_eq!(format_price(dec!(5.006)), "$5.01");
    }
}

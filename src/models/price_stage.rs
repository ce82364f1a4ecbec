use rust_decimal::Decimal;
use serde::Serialize;
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::{
    error::PricingError,
    utils::price::{
        Price, bulk_discount_percentage, format_price, percent_factor, round_price,
    },
};

pub const BASE_PRICE_LABEL: &str = "Base Price";

/// Leaf of every pipeline. Passes the price through unrounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseStage;

impl BaseStage {
    pub fn compute(&self, price: Price) -> Result<Price, PricingError> {
        if price < Decimal::ZERO {
            return Err(PricingError::invalid("Price cannot be negative"));
        }
        Ok(price)
    }

    pub fn describe(&self) -> String {
        BASE_PRICE_LABEL.to_string()
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PriceModifier {
    Discount { percentage: Decimal },
    Tax { percentage: Decimal },
    FlatShipping { amount: Decimal },
    PercentageShipping { percentage: Decimal },
    BulkDiscount { quantity: u32 },
}

impl PriceModifier {
    pub fn discount(percentage: Decimal) -> Result<Self, PricingError> {
        if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
            return Err(PricingError::invalid(
                "Discount percentage must be between 0 and 100",
            ));
        }
        Ok(PriceModifier::Discount { percentage })
    }

    pub fn tax(percentage: Decimal) -> Result<Self, PricingError> {
        if percentage < Decimal::ZERO {
            return Err(PricingError::invalid("Tax percentage cannot be negative"));
        }
        Ok(PriceModifier::Tax { percentage })
    }

    pub fn flat_shipping(amount: Decimal) -> Result<Self, PricingError> {
        if amount < Decimal::ZERO {
            return Err(PricingError::invalid("Shipping cost cannot be negative"));
        }
        Ok(PriceModifier::FlatShipping { amount })
    }

    pub fn percentage_shipping(percentage: Decimal) -> Result<Self, PricingError> {
        if percentage < Decimal::ZERO {
            return Err(PricingError::invalid(
                "Shipping percentage cannot be negative",
            ));
        }
        Ok(PriceModifier::PercentageShipping { percentage })
    }

    pub fn bulk_discount(quantity: u32) -> Result<Self, PricingError> {
        if quantity < 1 {
            return Err(PricingError::invalid("Quantity must be at least 1"));
        }
        Ok(PriceModifier::BulkDiscount { quantity })
    }

    /// Adjusts the output of the wrapped stage and rounds to cents.
    pub fn apply(&self, price: Price) -> Result<Price, PricingError> {
        let adjusted = match self {
            PriceModifier::Discount { percentage } => {
                scale(price, Decimal::ONE - percent_factor(*percentage))
            }
            PriceModifier::Tax { percentage } | PriceModifier::PercentageShipping { percentage } => {
                Decimal::ONE
                    .checked_add(percent_factor(*percentage))
                    .and_then(|factor| scale(price, factor))
            }
            PriceModifier::FlatShipping { amount } => price.checked_add(*amount),
            PriceModifier::BulkDiscount { quantity } => scale(
                price,
                Decimal::ONE - percent_factor(bulk_discount_percentage(*quantity)),
            ),
        };
        adjusted.map(round_price).ok_or_else(|| {
            PricingError::invalid(format!("{} overflows the price range", self.label()))
        })
    }

    pub fn label(&self) -> String {
        match self {
            PriceModifier::Discount { percentage } => {
                format!("Discount {}%", percentage.normalize())
            }
            PriceModifier::Tax { percentage } => format!("Tax {}%", percentage.normalize()),
            PriceModifier::FlatShipping { amount } => {
                format!("Shipping {}", format_price(*amount))
            }
            PriceModifier::PercentageShipping { percentage } => {
                format!("Shipping {}%", percentage.normalize())
            }
            PriceModifier::BulkDiscount { quantity } => {
                let percentage = bulk_discount_percentage(*quantity);
                if percentage.is_zero() {
                    "No Bulk Discount".to_string()
                } else {
                    format!(
                        "Bulk Discount {}% (Qty: {quantity})",
                        percentage.normalize()
                    )
                }
            }
        }
    }

    pub fn kind(&self) -> ModifierKind {
        match self {
            PriceModifier::Discount { .. } => ModifierKind::Discount,
            PriceModifier::Tax { .. } => ModifierKind::Tax,
            PriceModifier::FlatShipping { .. } => ModifierKind::FlatShipping,
            PriceModifier::PercentageShipping { .. } => ModifierKind::PercentageShipping,
            PriceModifier::BulkDiscount { .. } => ModifierKind::BulkDiscount,
        }
    }
}

fn scale(price: Price, factor: Decimal) -> Option<Price> {
    price.checked_mul(factor)
}

impl fmt::Display for PriceModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Error)]
pub enum ModifierParseError {
    #[error("Invalid modifier kind: {0}")]
    InvalidKind(String),

    #[error("Invalid modifier value: {0}")]
    InvalidValue(String),

    #[error("Modifier must be written as kind:value, got {0}")]
    Malformed(String),

    #[error(transparent)]
    Rejected(#[from] PricingError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKind {
    Discount,
    Tax,
    FlatShipping,
    PercentageShipping,
    BulkDiscount,
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind_str = match self {
            ModifierKind::Discount => "discount",
            ModifierKind::Tax => "tax",
            ModifierKind::FlatShipping => "shipping",
            ModifierKind::PercentageShipping => "shipping-pct",
            ModifierKind::BulkDiscount => "bulk",
        };
        write!(f, "{kind_str}")
    }
}

impl FromStr for ModifierKind {
    type Err = ModifierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discount" => Ok(ModifierKind::Discount),
            "tax" => Ok(ModifierKind::Tax),
            "shipping" => Ok(ModifierKind::FlatShipping),
            "shipping-pct" => Ok(ModifierKind::PercentageShipping),
            "bulk" => Ok(ModifierKind::BulkDiscount),
            other => Err(ModifierParseError::InvalidKind(other.to_string())),
        }
    }
}

/// Parses `kind:value`, e.g. `discount:10` or `bulk:12`.
impl FromStr for PriceModifier {
    type Err = ModifierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind_str, value_str) = s
            .split_once(':')
            .ok_or_else(|| ModifierParseError::Malformed(s.to_string()))?;
        let kind = kind_str.trim().to_lowercase().parse::<ModifierKind>()?;
        let value_str = value_str.trim();

        let invalid_value = || ModifierParseError::InvalidValue(value_str.to_string());
        let decimal_value = || value_str.parse::<Decimal>().map_err(|_| invalid_value());

        let modifier = match kind {
            ModifierKind::Discount => PriceModifier::discount(decimal_value()?)?,
            ModifierKind::Tax => PriceModifier::tax(decimal_value()?)?,
            ModifierKind::FlatShipping => PriceModifier::flat_shipping(decimal_value()?)?,
            ModifierKind::PercentageShipping => {
                PriceModifier::percentage_shipping(decimal_value()?)?
            }
            ModifierKind::BulkDiscount => {
                let quantity = value_str.parse::<u32>().map_err(|_| invalid_value())?;
                PriceModifier::bulk_discount(quantity)?
            }
        };
        Ok(modifier)
    }
}

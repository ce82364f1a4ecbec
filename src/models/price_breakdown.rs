use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::PricingError,
    models::{price_request::PriceRequest, price_stage::PriceModifier},
    utils::price::{Price, format_price, round_price},
};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownStep {
    pub step_name: String,
    pub value: Price,
    pub change: Price,
}

/// Step-by-step itemization of a price request for display.
///
/// This re-derives the arithmetic from the request instead of tracing a
/// [`PricePipeline`](crate::models::price_pipeline::PricePipeline), and always
/// walks the adjustments in the same order: discount, bulk discount, tax, flat
/// shipping, percentage shipping. Bulk discount produces no step.
#[derive(Debug, Clone, Default)]
pub struct PriceBreakdown {
    steps: Vec<BreakdownStep>,
}

impl PriceBreakdown {
    pub fn from_request(request: &PriceRequest) -> Result<Self, PricingError> {
        let base_price = request.base_price;
        if base_price < Decimal::ZERO {
            return Err(PricingError::invalid("Price cannot be negative"));
        }

        let mut breakdown = PriceBreakdown {
            steps: vec![BreakdownStep {
                step_name: format!("Base Price {}", format_price(base_price)),
                value: base_price,
                change: Decimal::ZERO,
            }],
        };

        if let Some(percentage) = request.discount_percentage {
            breakdown.push(PriceModifier::discount(percentage)?)?;
        }

        // Bulk discount is validated but not itemized.
        request.quantity()?;

        if let Some(percentage) = request.tax_percentage {
            breakdown.push(PriceModifier::tax(percentage)?)?;
        }
        if let Some(amount) = request.flat_shipping_cost {
            breakdown.push(PriceModifier::flat_shipping(amount)?)?;
        }
        if let Some(percentage) = request.shipping_percentage {
            breakdown.push(PriceModifier::percentage_shipping(percentage)?)?;
        }

        Ok(breakdown)
    }

    fn push(&mut self, modifier: PriceModifier) -> Result<(), PricingError> {
        let previous = self.current_value();
        let value = round_price(modifier.apply(previous)?);
        self.steps.push(BreakdownStep {
            step_name: modifier.label(),
            value,
            change: round_price(value - previous),
        });
        Ok(())
    }

    pub fn current_value(&self) -> Price {
        self.steps
            .last()
            .map_or(Decimal::ZERO, |step| step.value)
    }

    pub fn steps(&self) -> &[BreakdownStep] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<BreakdownStep> {
        self.steps
    }
}

pub fn savings(base_price: Price, final_price: Price) -> Price {
    (base_price - final_price).max(Decimal::ZERO)
}

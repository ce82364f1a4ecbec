use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    error::PricingError,
    models::price_stage::{BaseStage, PriceModifier},
    utils::price::Price,
};

/// Ordered chain of price modifiers wrapped around a [`BaseStage`].
///
/// Modifiers apply in the order they were attached, and `describe` lists them
/// in that same order. Built fresh for every calculation.
#[derive(Debug, Clone, Default)]
pub struct PricePipeline {
    base: BaseStage,
    modifiers: Vec<PriceModifier>,
    applied: Vec<String>,
}

impl PricePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_discount(self, percentage: Decimal) -> Result<Self, PricingError> {
        Ok(self.with_modifier(PriceModifier::discount(percentage)?))
    }

    pub fn with_tax(self, percentage: Decimal) -> Result<Self, PricingError> {
        Ok(self.with_modifier(PriceModifier::tax(percentage)?))
    }

    pub fn with_flat_shipping(self, amount: Decimal) -> Result<Self, PricingError> {
        Ok(self.with_modifier(PriceModifier::flat_shipping(amount)?))
    }

    pub fn with_percentage_shipping(self, percentage: Decimal) -> Result<Self, PricingError> {
        Ok(self.with_modifier(PriceModifier::percentage_shipping(percentage)?))
    }

    pub fn with_bulk_discount(self, quantity: u32) -> Result<Self, PricingError> {
        Ok(self.with_modifier(PriceModifier::bulk_discount(quantity)?))
    }

    pub fn with_modifier(mut self, modifier: PriceModifier) -> Self {
        let applied = format!("{}: {}", modifier.kind(), modifier.label());
        debug!("pipeline modifier attached {applied}");
        self.applied.push(applied);
        self.modifiers.push(modifier);
        self
    }

    pub fn calculate(&self, base_price: Price) -> Result<Price, PricingError> {
        let price = self.base.compute(base_price)?;
        self.modifiers
            .iter()
            .try_fold(price, |price, modifier| modifier.apply(price))
    }

    pub fn describe(&self) -> String {
        self.modifiers
            .iter()
            .fold(self.base.describe(), |description, modifier| {
                format!("{description} → {}", modifier.label())
            })
    }

    pub fn reset(&mut self) {
        self.modifiers.clear();
        self.applied.clear();
    }

    pub fn modifiers(&self) -> &[PriceModifier] {
        &self.modifiers
    }

    pub fn applied(&self) -> &[String] {
        &self.applied
    }
}

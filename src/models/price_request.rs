use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{error::PricingError, models::price_pipeline::PricePipeline, utils::price::Price};

/// Parameters of one price calculation. Everything except `base_price` is optional.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    pub base_price: Price,
    #[serde(default)]
    pub discount_percentage: Option<Decimal>,
    #[serde(default)]
    pub tax_percentage: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub flat_shipping_cost: Option<Decimal>,
    #[serde(default)]
    pub shipping_percentage: Option<Decimal>,
}

impl PriceRequest {
    pub fn new(base_price: Price) -> Self {
        Self {
            base_price,
            ..Default::default()
        }
    }

    /// Validated quantity, if one was supplied.
    pub fn quantity(&self) -> Result<Option<u32>, PricingError> {
        self.quantity
            .map(|q| match u32::try_from(q) {
                Ok(q) if q >= 1 => Ok(q),
                Err(_) if q > 0 => Err(PricingError::invalid(format!(
                    "Quantity cannot exceed {}",
                    u32::MAX
                ))),
                _ => Err(PricingError::invalid("Quantity must be at least 1")),
            })
            .transpose()
    }

    /// Builds the pipeline in the canonical order: discount, bulk discount,
    /// tax, flat shipping, percentage shipping.
    pub fn pipeline(&self) -> Result<PricePipeline, PricingError> {
        if self.base_price < Decimal::ZERO {
            return Err(PricingError::invalid("Price cannot be negative"));
        }

        let mut pipeline = PricePipeline::new();

        if let Some(percentage) = self.discount_percentage {
            pipeline = pipeline.with_discount(percentage)?;
        }
        if let Some(quantity) = self.quantity()? {
            pipeline = pipeline.with_bulk_discount(quantity)?;
        }
        if let Some(percentage) = self.tax_percentage {
            pipeline = pipeline.with_tax(percentage)?;
        }
        if let Some(amount) = self.flat_shipping_cost {
            pipeline = pipeline.with_flat_shipping(amount)?;
        }
        if let Some(percentage) = self.shipping_percentage {
            pipeline = pipeline.with_percentage_shipping(percentage)?;
        }

        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn deserializes_camel_case_body() {
        let request: PriceRequest = serde_json::from_str(
            r#"{"basePrice": 100.0, "discountPercentage": 10, "quantity": 12}"#,
        )
        .unwrap();

        assert_eq!(request.base_price, dec!(100));
        assert_eq!(request.discount_percentage, Some(dec!(10)));
        assert_eq!(request.quantity, Some(12));
        assert_eq!(request.tax_percentage, None);
    }

    #[test]
    fn pipeline_uses_canonical_order() {
        let request = PriceRequest {
            shipping_percentage: Some(dec!(3)),
            flat_shipping_cost: Some(dec!(5)),
            tax_percentage: Some(dec!(8)),
            quantity: Some(20),
            discount_percentage: Some(dec!(10)),
            ..PriceRequest::new(dec!(100))
        };

        assert_eq!(
            request.pipeline().unwrap().describe(),
            "Base Price → Discount 10% → Bulk Discount 15% (Qty: 20) → Tax 8% → Shipping $5.00 → Shipping 3%"
        );
    }

    #[test]
    fn rejects_invalid_parameters() {
        let negative_base = PriceRequest::new(dec!(-0.01));
        assert!(negative_base.pipeline().is_err());

        let zero_quantity = PriceRequest {
            quantity: Some(0),
            ..PriceRequest::new(dec!(10))
        };
        assert_eq!(
            zero_quantity.pipeline().unwrap_err().to_string(),
            "Quantity must be at least 1"
        );

        let negative_quantity = PriceRequest {
            quantity: Some(-3),
            ..PriceRequest::new(dec!(10))
        };
        assert_eq!(
            negative_quantity.quantity().unwrap_err().to_string(),
            "Quantity must be at least 1"
        );

        let huge_quantity = PriceRequest {
            quantity: Some(i64::from(u32::MAX) + 1),
            ..PriceRequest::new(dec!(10))
        };
        assert_eq!(
            huge_quantity.pipeline().unwrap_err().to_string(),
            "Quantity cannot exceed 4294967295"
        );

        let largest_quantity = PriceRequest {
            quantity: Some(i64::from(u32::MAX)),
            ..PriceRequest::new(dec!(10))
        };
        assert_eq!(largest_quantity.quantity().unwrap(), Some(u32::MAX));

        let negative_shipping = PriceRequest {
            flat_shipping_cost: Some(dec!(-5)),
            ..PriceRequest::new(dec!(10))
        };
        assert_eq!(
            negative_shipping.pipeline().unwrap_err().to_string(),
            "Shipping cost cannot be negative"
        );
    }
}

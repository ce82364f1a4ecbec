use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::PricingError,
    models::{
        price_breakdown::{BreakdownStep, PriceBreakdown, savings},
        price_request::PriceRequest,
    },
    utils::price::Price,
};

#[derive(Debug, Error)]
pub enum CalculateError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Invalid request body: {0}")]
    Body(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for CalculateError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl From<JsonRejection> for CalculateError {
    fn from(rejection: JsonRejection) -> Self {
        CalculateError::Body(rejection.body_text())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub final_price: Price,
    pub description: String,
    pub breakdown: Vec<BreakdownStep>,
    pub savings: Price,
}

pub fn calculate_price(request: &PriceRequest) -> Result<CalculateResponse, PricingError> {
    let pipeline = request.pipeline()?;
    let final_price = pipeline.calculate(request.base_price)?;
    let breakdown = PriceBreakdown::from_request(request)?;

    if breakdown.current_value() != final_price {
        warn!(
            "breakdown total {} differs from pipeline price {final_price}",
            breakdown.current_value()
        );
    }

    Ok(CalculateResponse {
        final_price,
        description: pipeline.describe(),
        breakdown: breakdown.into_steps(),
        savings: savings(request.base_price, final_price),
    })
}

pub async fn handle_calculate(
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>, CalculateError> {
    let request_id = Uuid::new_v4();
    let Json(request) = payload.inspect_err(|e| {
        warn!("calculate request {request_id} rejected: {e}");
    })?;

    let response = calculate_price(&request).inspect_err(|e| {
        warn!("calculate request {request_id} invalid: {e}");
    })?;

    info!(
        "calculate request {request_id}: {} -> {} ({})",
        request.base_price, response.final_price, response.description
    );

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn end_to_end_scenario() {
        let request = PriceRequest {
            discount_percentage: Some(dec!(10)),
            tax_percentage: Some(dec!(10)),
            flat_shipping_cost: Some(dec!(5.00)),
            ..PriceRequest::new(dec!(100.00))
        };

        let response = calculate_price(&request).unwrap();

        assert_eq!(response.final_price, dec!(104.00));
        assert_eq!(
            response.description,
            "Base Price → Discount 10% → Tax 10% → Shipping $5.00"
        );
        assert_eq!(response.breakdown.len(), 4);
        assert_eq!(response.savings, dec!(0));
    }

    #[test]
    fn savings_reported_for_discounts() {
        let request = PriceRequest {
            discount_percentage: Some(dec!(25)),
            ..PriceRequest::new(dec!(80))
        };

        let response = calculate_price(&request).unwrap();

        assert_eq!(response.final_price, dec!(60.00));
        assert_eq!(response.savings, dec!(20.00));
    }

    #[test]
    fn validation_errors_become_bad_request() {
        let request = PriceRequest {
            discount_percentage: Some(dec!(101)),
            ..PriceRequest::new(dec!(10))
        };

        let err = CalculateError::from(calculate_price(&request).unwrap_err());
        assert_eq!(
            err.to_string(),
            "Discount percentage must be between 0 and 100"
        );
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod utils;

pub use error::PricingError;
pub use models::{
    price_breakdown::{BreakdownStep, PriceBreakdown, savings},
    price_pipeline::PricePipeline,
    price_request::PriceRequest,
    price_stage::{BaseStage, PriceModifier},
};
pub use utils::price::Price;

pub mod price_breakdown;
pub mod price_pipeline;
pub mod price_request;
pub mod price_stage;

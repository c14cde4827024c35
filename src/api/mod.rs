mod client;
mod types;

pub use client::{HttpPredictionClient, PREDICTION_FAILED, PredictionApi, failure_reason};
pub use types::{CropTypes, HealthStatus, PredictionRequest, PredictionResponse, SoilTypes};

use super::types::*;
use crate::{Error, Result, config::ApiConfig};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Reason shown when a rejected prediction carries no usable `detail`.
pub const PREDICTION_FAILED: &str = "Prediction failed";

#[async_trait]
pub trait PredictionApi: Send + Sync {
    async fn crop_types(&self) -> Result<CropTypes>;

    async fn soil_types(&self) -> Result<SoilTypes>;

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse>;

    async fn health(&self) -> Result<HealthStatus>;
}

pub struct HttpPredictionClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpPredictionClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        debug!("Created prediction client for: {}", config.base_url);

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.config.endpoint(path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl PredictionApi for HttpPredictionClient {
    async fn crop_types(&self) -> Result<CropTypes> {
        self.get_json("/api/crop-types").await
    }

    async fn soil_types(&self) -> Result<SoilTypes> {
        self.get_json("/api/soil-types").await
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
        let url = self.config.endpoint("/api/predict");
        debug!(
            "POST {} (soil_type={}, crop_type={})",
            url, request.soil_type, request.crop_type
        );

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        // The body is decoded before the status is inspected: an error status
        // with a non-JSON body surfaces the decode failure.
        let data: Value = serde_json::from_slice(&body)?;

        if !status.is_success() {
            let reason = failure_reason(&data);
            debug!("Prediction rejected with {}: {}", status, reason);
            return Err(Error::api(reason));
        }

        let prediction: PredictionResponse = serde_json::from_value(data)?;
        debug!(
            "Prediction received: {} ({} classes)",
            prediction.predicted_fertilizer,
            prediction.probabilities.len()
        );
        Ok(prediction)
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.get_json("/api/health").await
    }
}

/// Extracts the `detail` of an error body, falling back to
/// [`PREDICTION_FAILED`] when it is missing or falsy.
pub fn failure_reason(body: &Value) -> String {
    match body.get("detail") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => PREDICTION_FAILED.to_string(),
        Some(Value::String(s)) if s.is_empty() => PREDICTION_FAILED.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => PREDICTION_FAILED.to_string(),
        Some(other) => other.to_string(),
    }
}

use async_trait::async_trait;
use fertilizer_advisor::{
    Error, Result,
    api::{CropTypes, HealthStatus, PredictionApi, PredictionRequest, PredictionResponse, SoilTypes},
};
use std::sync::{Arc, Mutex};

/// Mock prediction service for testing
#[derive(Debug, Clone)]
pub struct MockPredictionApi {
    pub responses: Arc<Mutex<Vec<Result<PredictionResponse>>>>,
    pub requests: Arc<Mutex<Vec<PredictionRequest>>>,
    pub crop_types: Option<Vec<String>>,
    pub soil_types: Option<Vec<String>>,
    pub health: Option<HealthStatus>,
}

impl MockPredictionApi {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            crop_types: Some(vec!["Rice".to_string(), "Wheat".to_string()]),
            soil_types: Some(vec!["Sandy".to_string()]),
            health: Some(HealthStatus {
                status: "healthy".to_string(),
                model_loaded: true,
            }),
        }
    }

    pub fn with_response(self, response: PredictionResponse) -> Self {
        self.responses.lock().unwrap().push(Ok(response));
        self
    }

    pub fn with_error(self, error: Error) -> Self {
        self.responses.lock().unwrap().push(Err(error));
        self
    }

    pub fn without_crop_types(mut self) -> Self {
        self.crop_types = None;
        self
    }

    pub fn without_soil_types(mut self) -> Self {
        self.soil_types = None;
        self
    }

    pub fn without_health(mut self) -> Self {
        self.health = None;
        self
    }

    pub fn get_requests(&self) -> Vec<PredictionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PredictionApi for MockPredictionApi {
    async fn crop_types(&self) -> Result<CropTypes> {
        self.crop_types
            .clone()
            .map(|crop_types| CropTypes { crop_types })
            .ok_or_else(|| Error::internal("crop types unavailable"))
    }

    async fn soil_types(&self) -> Result<SoilTypes> {
        self.soil_types
            .clone()
            .map(|soil_types| SoilTypes { soil_types })
            .ok_or_else(|| Error::internal("soil types unavailable"))
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
        self.requests.lock().unwrap().push(request.clone());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::internal("No more mock responses available"));
        }

        responses.remove(0)
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.health
            .clone()
            .ok_or_else(|| Error::api("Service unavailable"))
    }
}

impl Default for MockPredictionApi {
    fn default() -> Self {
        Self::new()
    }
}

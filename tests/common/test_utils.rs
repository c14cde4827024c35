use fertilizer_advisor::{
    api::PredictionResponse,
    config::{ApiConfig, FormConfig, FormDefaults},
    controller::FormController,
    form::FormField,
};
use serde_json::{Value, json};
use std::sync::Arc;

use super::mocks::MockPredictionApi;

/// API configuration pointing at a mock server
pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    }
}

/// Form defaults resembling a typical sample from the training data
pub fn sample_defaults() -> FormDefaults {
    FormDefaults {
        n: "37".to_string(),
        p: "0".to_string(),
        k: "0".to_string(),
        temperature: "26".to_string(),
        humidity: "52".to_string(),
        moisture: "38".to_string(),
        soil_type: "Sandy".to_string(),
        crop_type: "Maize".to_string(),
    }
}

pub fn form_config(fence_stale_responses: bool) -> FormConfig {
    FormConfig {
        fence_stale_responses,
        defaults: sample_defaults(),
    }
}

/// Build a controller over a mock API, returning the mock for inspection
pub fn create_controller(mock: MockPredictionApi, fence: bool) -> (FormController, MockPredictionApi) {
    let controller = FormController::new(&form_config(fence), Arc::new(mock.clone()))
        .expect("Failed to create controller");
    (controller, mock)
}

/// Fill every field of the form
pub fn fill_form(controller: &mut FormController, values: &[(FormField, &str)]) {
    for (field, value) in values {
        controller
            .form_mut()
            .set(*field, value)
            .expect("Failed to set form field");
    }
}

pub fn prediction(fertilizer: &str, confidence: f64, probabilities: &[(&str, f64)]) -> PredictionResponse {
    PredictionResponse {
        predicted_fertilizer: fertilizer.to_string(),
        confidence,
        probabilities: probabilities
            .iter()
            .map(|(name, p)| (name.to_string(), *p))
            .collect(),
    }
}

/// Sample successful prediction body as the service returns it
pub fn sample_prediction_body() -> Value {
    json!({
        "predicted_fertilizer": "Urea",
        "confidence": 0.8567,
        "probabilities": {
            "DAP": 0.1,
            "Urea": 0.8567,
            "28-28": 0.043
        }
    })
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
api:
  base_url: "http://127.0.0.1:8000"
  timeout_secs: 10

form:
  fence_stale_responses: true
  defaults:
    n: "37"
    soil_type: "Loamy"
    crop_type: "Wheat"

logs:
  level: "debug"
  format: "pretty"
"#;

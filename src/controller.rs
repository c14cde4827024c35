use crate::{
    Result,
    api::{HealthStatus, PredictionApi, PredictionRequest, PredictionResponse},
    config::FormConfig,
    form::FormFields,
    ui::{PredictionView, UiEvent, UiState, UiStateMachine},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Reference option lists fetched at startup. A list is `None` when its
/// request failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedOptions {
    pub crop_types: Option<Vec<String>>,
    pub soil_types: Option<Vec<String>>,
}

/// Fetches the crop and soil type lists concurrently.
///
/// Failures are logged and swallowed; the form keeps its preset options
/// either way.
pub async fn load_options(api: &dyn PredictionApi) -> LoadedOptions {
    let (crops, soils) = tokio::join!(api.crop_types(), api.soil_types());

    let crop_types = match crops {
        Ok(list) => {
            debug!("Loaded {} crop types", list.crop_types.len());
            Some(list.crop_types)
        }
        Err(e) => {
            error!("Error loading crop types: {}", e);
            None
        }
    };

    let soil_types = match soils {
        Ok(list) => {
            debug!("Loaded {} soil types", list.soil_types.len());
            Some(list.soil_types)
        }
        Err(e) => {
            error!("Error loading soil types: {}", e);
            None
        }
    };

    LoadedOptions {
        crop_types,
        soil_types,
    }
}

/// A submission that has entered `Loading` and awaits its response.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub seq: u64,
    pub request: PredictionRequest,
}

pub struct FormController {
    api: Arc<dyn PredictionApi>,
    form: FormFields,
    ui: UiStateMachine,
    fence_stale_responses: bool,
    latest_seq: u64,
}

impl FormController {
    pub fn new(config: &FormConfig, api: Arc<dyn PredictionApi>) -> Result<Self> {
        Ok(Self {
            api,
            form: FormFields::from_defaults(&config.defaults)?,
            ui: UiStateMachine::new(),
            fence_stale_responses: config.fence_stale_responses,
            latest_seq: 0,
        })
    }

    pub fn api(&self) -> Arc<dyn PredictionApi> {
        Arc::clone(&self.api)
    }

    pub fn form(&self) -> &FormFields {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormFields {
        &mut self.form
    }

    pub fn state(&self) -> &UiState {
        self.ui.current_state()
    }

    /// Snapshots the form into a request and shows the loading panel.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission> {
        let request = self.form.to_request();
        self.ui.transition(UiEvent::Submit)?;
        self.latest_seq += 1;

        debug!("Submission #{} started", self.latest_seq);
        Ok(PendingSubmission {
            seq: self.latest_seq,
            request,
        })
    }

    /// Applies the outcome of submission `seq`. Always leaves `Loading`
    /// unless the outcome is fenced off as stale.
    pub fn complete_submit(
        &mut self,
        seq: u64,
        outcome: Result<PredictionResponse>,
    ) -> Result<&UiState> {
        if self.fence_stale_responses && seq < self.latest_seq {
            warn!(
                "Dropping response for submission #{} (latest is #{})",
                seq, self.latest_seq
            );
            return Ok(self.ui.current_state());
        }

        let event = match outcome {
            Ok(response) => {
                info!(
                    "Submission #{} predicted {} ({:.3})",
                    seq, response.predicted_fertilizer, response.confidence
                );
                UiEvent::Succeeded(PredictionView::from_response(&response))
            }
            Err(e) => {
                warn!("Submission #{} failed: {}", seq, e);
                UiEvent::Failed(e.panel_message())
            }
        };

        self.ui.transition(event)?;
        Ok(self.ui.current_state())
    }

    pub async fn submit(&mut self) -> Result<&UiState> {
        let pending = self.begin_submit()?;
        let outcome = self.api.predict(&pending.request).await;
        self.complete_submit(pending.seq, outcome)
    }

    /// Restores form defaults and hides the result and error panels.
    pub fn reset(&mut self) -> Result<()> {
        self.ui.transition(UiEvent::Reset)?;
        self.form.reset();
        Ok(())
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        self.api.health().await
    }
}

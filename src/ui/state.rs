use super::view::PredictionView;
use crate::{Error, Result};
use tracing::{debug, info, warn};

/// Which panel is visible. Exactly one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Idle,
    Loading,
    Result(PredictionView),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Submit,
    Succeeded(PredictionView),
    Failed(String),
    Reset,
}

impl UiState {
    pub fn name(&self) -> &'static str {
        match self {
            UiState::Idle => "Idle",
            UiState::Loading => "Loading",
            UiState::Result(_) => "Result",
            UiState::Error(_) => "Error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn result(&self) -> Option<&PredictionView> {
        match self {
            UiState::Result(view) => Some(view),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Submit => "Submit",
            UiEvent::Succeeded(_) => "Succeeded",
            UiEvent::Failed(_) => "Failed",
            UiEvent::Reset => "Reset",
        }
    }
}

pub struct UiStateMachine {
    state: UiState,
}

impl UiStateMachine {
    pub fn new() -> Self {
        Self {
            state: UiState::Idle,
        }
    }

    pub fn current_state(&self) -> &UiState {
        &self.state
    }

    pub fn transition(&mut self, event: UiEvent) -> Result<()> {
        let old_state = self.state.name();
        debug!("UI processing event {} in state {}", event.name(), old_state);

        // Completions are accepted from any state: with no request fencing
        // the last response to land decides what is shown.
        let new_state = match (&self.state, event) {
            (_, UiEvent::Submit) => UiState::Loading,
            (_, UiEvent::Succeeded(view)) => UiState::Result(view),
            (_, UiEvent::Failed(message)) => UiState::Error(message),
            (UiState::Loading, UiEvent::Reset) => {
                warn!("Invalid UI transition from Loading with event Reset");
                return Err(Error::InvalidTransition {
                    current: old_state.to_string(),
                    requested: "Reset".to_string(),
                });
            }
            (_, UiEvent::Reset) => UiState::Idle,
        };

        if old_state != new_state.name() {
            info!("UI state transition: {} -> {}", old_state, new_state.name());
        }

        self.state = new_state;
        Ok(())
    }
}

impl Default for UiStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

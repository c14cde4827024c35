mod render;
pub mod state;
mod view;

pub use render::{LOADING_TEXT, render};
pub use state::{UiEvent, UiState, UiStateMachine};
pub use view::{PredictionView, ProbabilityRow, format_percent};

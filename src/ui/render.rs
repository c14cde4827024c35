use super::state::UiState;
use std::fmt::Write;

pub const LOADING_TEXT: &str = "Analyzing soil and crop conditions...";

/// Renders the visible panel as text. `Idle` renders nothing.
pub fn render(state: &UiState) -> String {
    match state {
        UiState::Idle => String::new(),
        UiState::Loading => format!("{}\n", LOADING_TEXT),
        UiState::Error(message) => format!("Error: {}\n", message),
        UiState::Result(view) => {
            let mut out = String::new();
            let _ = writeln!(out, "Recommended Fertilizer: {}", view.fertilizer);
            let _ = writeln!(out, "Confidence: {}", view.confidence);

            if !view.probabilities.is_empty() {
                let width = view
                    .probabilities
                    .iter()
                    .map(|row| row.fertilizer.chars().count())
                    .max()
                    .unwrap_or(0);

                let _ = writeln!(out, "All Probabilities:");
                for row in &view.probabilities {
                    let _ = writeln!(
                        out,
                        "  {:<width$}  {:>6}",
                        row.fertilizer,
                        row.percent,
                        width = width
                    );
                }
            }
            out
        }
    }
}

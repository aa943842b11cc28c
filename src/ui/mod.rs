/// egui rendering. Panels and plots read [`crate::state::AppState`] and call
/// its setters; they never filter the table themselves.
pub mod panels;
pub mod plot;

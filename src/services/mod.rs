pub mod form_decoder;
pub mod prompt;
pub mod providers;
pub mod render;
pub mod suggestions;

pub use suggestions::{DegradedKind, DegradedOutput, Outcome, SuggestionService};

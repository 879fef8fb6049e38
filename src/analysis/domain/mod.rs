//! Domain model for analysis outcomes and prompt templates.

mod analysis;
mod prompt;

pub use analysis::Analysis;
pub use prompt::{PromptRenderError, PromptTemplate};

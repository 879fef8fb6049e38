//! Port contracts for the text-analysis collaborator.

pub mod text_analyzer;

pub use text_analyzer::{AnalysisError, AnalysisResult, TextAnalyzer};

//! Application services for text analysis.

mod client;

pub use client::AnalysisClient;

//! Adapter implementations for the text-analysis port.

pub mod http;
pub mod memory;

pub use http::HttpTextAnalyzer;
pub use memory::ScriptedTextAnalyzer;

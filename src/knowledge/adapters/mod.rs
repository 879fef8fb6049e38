//! Adapter implementations of the knowledge ports.

pub mod memory;

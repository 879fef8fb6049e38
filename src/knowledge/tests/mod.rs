//! Unit tests for the knowledge store.

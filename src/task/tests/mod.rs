//! Unit tests for the task queue.

mod domain_tests;

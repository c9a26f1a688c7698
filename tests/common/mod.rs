//! Common utilities for integration tests

#![allow(dead_code)]

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{CountingModel, Level};
pub use test_helpers::{assert_traces_close, ethanol, grid};

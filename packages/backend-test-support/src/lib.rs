//! Shared helpers for tokengate unit and integration tests.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;

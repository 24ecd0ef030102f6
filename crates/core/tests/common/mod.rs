//! Common test utilities and helpers for resolver integration tests.
//!
//! This module provides shared functionality across integration tests:
//! - Manifest builders and on-disk sample projects
//! - Assertions over resolution results

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
pub use fixtures::*;

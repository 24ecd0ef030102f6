//! # ar-protocol
//!
//! Core protocol definitions and data models for agent-resolver.
//!
//! This crate defines all shared data structures used for:
//! - Agent manifest parsing (YAML/JSON OSSA manifests)
//! - Resolver configuration (`config.toml`)
//! - Validation, breaking-change and graph export results
//!
//! ## Modules
//!
//! - [`manifest_models`]: Agent manifests, dependencies and messaging contracts
//! - [`config_models`]: Resolver settings from config.toml
//! - [`resolution_models`]: Conflicts, cycles, missing dependencies, violations
//! - [`breaking_models`]: Breaking changes between two manifest versions
//! - [`graph_models`]: JSON dependency graph export
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, serde_json and ts-rs
//! - TypeScript generation: All types derive `TS` for client compatibility
//! - Independent compilation: No dependencies on other agent-resolver crates

pub mod breaking_models;
pub mod config_models;
pub mod graph_models;
pub mod manifest_models;
pub mod resolution_models;

// Re-export all public types for convenience
pub use breaking_models::*;
pub use config_models::*;
pub use graph_models::*;
pub use manifest_models::*;
pub use resolution_models::*;

//! # ar-core
//!
//! Dependency and contract compatibility resolution for agent manifests.
//!
//! This crate provides:
//! - Project loading from the `.agent-deps/` directory
//! - Version range intersection and conflict detection
//! - Structural schema compatibility in two directions
//! - Dependency graph export, cycle detection and deployment batching
//! - Breaking-change detection between two versions of an agent
//!
//! ## Modules
//!
//! - [`config`]: Project loading
//! - [`constraints`]: Version range parsing and interval intersection
//! - [`schema`]: Schema compilation and compatibility
//! - [`graph`]: Dependency graph construction and DOT/JSON export
//! - [`cycles`]: Cycle detection
//! - [`batching`]: Deployment batching
//! - [`contract`]: Contract extraction
//! - [`validator`]: The validation pass
//! - [`breaking`]: Breaking-change detection
//! - [`resolver`]: The API facade over all of the above

pub mod batching;
pub mod breaking;
pub mod config;
pub mod constraints;
pub mod contract;
pub mod cycles;
pub mod error;
pub mod graph;
pub mod resolver;
pub mod schema;
pub mod validator;

pub use error::{ResolveError, ResolveResult};
pub use resolver::Resolver;

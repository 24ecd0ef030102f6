//! Project loading.
//!
//! This module reads resolver settings and agent manifests from the
//! `.agent-deps/` directory structure. The resolver itself never touches the
//! filesystem; callers load a project here and pass the manifests in.

pub mod error;
pub mod loader;
pub mod models;

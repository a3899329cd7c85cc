//! Workflow modules for tfms.
//!
//! - `execute`: init, plan and confirmed apply for a single feature

pub mod execute;

// Re-export workflow functions
pub use execute::{ExecutionContext, execute_feature};

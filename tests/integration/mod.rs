//! Integration Tests Module
//!
//! End-to-end tests that drive the launch workflow, the mention notifier and
//! the HTTP router against in-memory collaborators.

pub mod launch_flow;

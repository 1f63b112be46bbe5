//! Test modules for portal mentions.
//!
//! This module contains the crate-internal test suites:
//! - Configuration loading and validation
//! - Error types and their messages
//! - Property-based tests for the prefix matcher using proptest
//! - Shared fixtures and strategies


// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{key_strategy, record_strategy, TestFixture};

//! Shared test utilities for the zconf workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`system`] - [`TestSystem`](system::TestSystem) builder for a fake
//!   filesystem root holding zypper configuration files

pub mod system;

pub use system::{DEFAULT_HOME, TestSystem};

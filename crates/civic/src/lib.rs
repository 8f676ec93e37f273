//! # Civic Shared Library
//!
//! Shared infrastructure for civic engine components:
//! - **error**: Common error type
//! - **tracing**: Logging setup with civic segment prefixes
//! - **config**: Loading [`EngineConfig`] from JSON, a file, or the environment
//!
//! ## Usage
//!
//! ```rust,no_run
//! civic::tracing::init();
//! let config = civic::config::from_env()?;
//! assert!(config.page_size > 0);
//! # Ok::<(), civic::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod tracing;

// Re-export commonly used items at crate root
pub use civic_core::EngineConfig;
pub use error::{Error, Result};

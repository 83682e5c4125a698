//! stamp rewrites placeholder tokens of the form `_{NAME}_` inside a file
//! or directory tree, pulling replacement values from exactly one source:
//! environment variables, a YAML document, or a JSON document.
//! It is intended for post-build configuration injection, such as stamping
//! runtime configuration into static assets before deployment.

/// Command-line interface module for the stamp application
pub mod cli;

/// Startup configuration captured from the process environment
/// and mode detection (YAML / JSON / environment)
pub mod config;

/// Error types and handling for the stamp application
pub mod error;

/// Value-source resolvers producing the replacement map
pub mod resolver;

/// Token replacement over in-memory buffers and in-place file rewrites
pub mod substitute;

/// Target dispatch and recursive directory traversal
pub mod processor;

/// Operator-facing startup banner
pub mod banner;

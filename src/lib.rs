//! portero - Identity and session API
//!
//! A thin authentication service: email sign-up with verification,
//! cookie/bearer sessions, password recovery, and an admin surface.
//! Credential-setting routes pass a password policy gate before their
//! handlers run; server-rendered callers resolve the session through a
//! per-request memoized accessor.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, cache)
//! - **jobs**: Background email jobs
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Start the email worker
//! cargo run -- worker
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, Session, User, UserRole};
pub use errors::{AppError, AppResult};

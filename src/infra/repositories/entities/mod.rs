//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod auth_token;
pub mod session;
pub mod user;

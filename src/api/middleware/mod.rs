//! API middleware.

mod password_gate;
mod rate_limit;
mod session;

pub use password_gate::{evaluate, password_gate_middleware, GateOutcome};
pub use rate_limit::rate_limit_auth_middleware;
pub use session::{session_context_middleware, SessionAccessor};

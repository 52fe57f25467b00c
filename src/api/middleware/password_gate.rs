//! Password policy gate.
//!
//! Inspects requests to the credential-setting routes before their
//! handlers run and rejects weak passwords with a fixed 400 response.
//! The decision itself is a pure function over path + parsed body so it
//! can be exercised without a running server.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use crate::config::{
    FIELD_NEW_PASSWORD, FIELD_PASSWORD, GATE_BODY_LIMIT, GUARDED_PATHS, PATH_SIGN_UP_EMAIL,
    WEAK_PASSWORD_MESSAGE,
};
use crate::domain::password;
use crate::errors::AppError;

/// Decision of the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Forward the request unchanged
    Accepted,
    /// Halt with a client error carrying this message
    Rejected { message: &'static str },
}

/// Body fields that may carry the password candidate, in preference
/// order. Reset and change never fall back to `password`: that field
/// is not theirs, and a strong value there must not mask a missing
/// `newPassword`.
fn candidate_fields(path: &str) -> &'static [&'static str] {
    if path == PATH_SIGN_UP_EMAIL {
        &[FIELD_NEW_PASSWORD, FIELD_PASSWORD]
    } else {
        &[FIELD_NEW_PASSWORD]
    }
}

/// Evaluate the gate for a request path and parsed JSON body.
///
/// Pure: same inputs, same outcome. Non-guarded paths are accepted
/// without looking at the body at all.
pub fn evaluate(path: &str, body: &Value) -> GateOutcome {
    if !GUARDED_PATHS.contains(&path) {
        return GateOutcome::Accepted;
    }

    let candidate = candidate_fields(path)
        .iter()
        .find_map(|field| {
            body.get(*field)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or("");

    match password::check_strength(candidate) {
        Ok(()) => GateOutcome::Accepted,
        Err(_) => GateOutcome::Rejected {
            message: WEAK_PASSWORD_MESSAGE,
        },
    }
}

/// Axum adapter for the gate.
///
/// Buffers the JSON body on guarded routes, consults [`evaluate`], and
/// reconstructs the request unchanged for the downstream handler when
/// accepted. Runs before any handler/persistence side effect.
pub async fn password_gate_middleware(request: Request, next: Next) -> Result<Response, AppError> {
    if !GUARDED_PATHS.contains(&request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, GATE_BODY_LIMIT)
        .await
        .map_err(|_| AppError::BadRequest("Request body is too large or unreadable".to_string()))?;

    // A body the handler could not parse either will fail the policy here;
    // candidates are only read from JSON objects
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    match evaluate(parts.uri.path(), &json) {
        GateOutcome::Accepted => {
            let request = Request::from_parts(parts, Body::from(bytes));
            Ok(next.run(request).await)
        }
        GateOutcome::Rejected { message } => {
            tracing::debug!(path = %parts.uri.path(), "Password policy rejected request");
            Err(AppError::BadRequest(message.to_string()))
        }
    }
}

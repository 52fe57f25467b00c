//! Rate limiting for authentication endpoints, backed by Redis.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::api::AppState;
use crate::config::{RATE_LIMIT_AUTH_REQUESTS, RATE_LIMIT_AUTH_WINDOW_SECONDS};

/// Rate limit error response
#[derive(Debug)]
pub struct RateLimitError {
    pub retry_after: u64,
}

impl IntoResponse for RateLimitError {
    fn into_response(self) -> Response {
        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            "Too many requests. Please try again later.",
        )
            .into_response();

        if let Ok(value) = HeaderValue::from_str(&self.retry_after.to_string()) {
            response.headers_mut().insert("Retry-After", value);
        }

        response
    }
}

/// Extract client identifier for rate limiting.
/// Uses forwarded headers when behind a proxy, otherwise the socket IP.
fn client_identifier(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|chain| chain.split(',').next())
        .map(|ip| ip.trim().to_string());

    if let Some(ip) = forwarded {
        return ip;
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Throttle authentication endpoints per client.
///
/// Fails closed: when Redis is unreachable the request is denied rather
/// than letting brute-force traffic through unmetered.
pub async fn rate_limit_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    let client = client_identifier(&request);
    let key = format!("auth:{}", client);

    let verdict = match state
        .cache
        .throttle(&key, RATE_LIMIT_AUTH_REQUESTS, RATE_LIMIT_AUTH_WINDOW_SECONDS)
        .await
    {
        Ok(verdict) => verdict,
        Err(e) => {
            tracing::error!(error = %e, "Auth rate limit check failed - denying request");
            return Err(RateLimitError {
                retry_after: RATE_LIMIT_AUTH_WINDOW_SECONDS,
            });
        }
    };

    if !verdict.allowed {
        tracing::warn!(client = %client, count = verdict.count, "Auth rate limit exceeded");
        return Err(RateLimitError {
            retry_after: RATE_LIMIT_AUTH_WINDOW_SECONDS,
        });
    }

    let mut response = next.run(request).await;

    let remaining = RATE_LIMIT_AUTH_REQUESTS.saturating_sub(verdict.count);
    if let Ok(value) = HeaderValue::from_str(&remaining.to_string()) {
        response.headers_mut().insert("X-RateLimit-Remaining", value);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_error_response() {
        let error = RateLimitError { retry_after: 60 };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get("Retry-After").unwrap(), "60");
    }
}

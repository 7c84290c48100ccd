use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use wheel_shared::constants::{API_WHEEL_PREFIX, SEGMENTS_ENDPOINT, SPIN_ENDPOINT};
use wheel_shared::rate_limit::{create_rate_limit_error, get_rate_limit_key, RateLimitCheck, RateLimitType};

use crate::error::Error;
use crate::AppState;

pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Prefers "cf-connecting-ip", then the first "x-forwarded-for" hop, then
/// "x-real-ip".
pub fn client_ip(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    header("cf-connecting-ip")
        .or_else(|| header("x-forwarded-for").and_then(|v| v.split(',').next()).map(str::trim))
        .or_else(|| header("x-real-ip"))
        .unwrap_or("unknown")
        .to_string()
}

/// `path` may or may not still carry the `/wheel` prefix; nested routers see
/// it stripped.
pub fn limit_type_for(method: &Method, path: &str) -> RateLimitType {
    let spin = SPIN_ENDPOINT.trim_start_matches(API_WHEEL_PREFIX);
    let segments = SEGMENTS_ENDPOINT.trim_start_matches(API_WHEEL_PREFIX);

    if method == Method::POST && path.ends_with(spin) {
        RateLimitType::Spin
    } else if method == Method::PUT && path.ends_with(segments) {
        RateLimitType::Save
    } else {
        RateLimitType::Api
    }
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(request.headers());
    let limit_type = limit_type_for(request.method(), request.uri().path());
    let key = get_rate_limit_key(limit_type, &ip);

    let check = match state.store.hit(&key, limit_type.get_window()).await {
        Ok(attempts) => RateLimitCheck::new(attempts, limit_type),
        // Fails open when the store is unavailable
        Err(e) => {
            tracing::warn!("Rate limit check skipped: {}", e);
            return next.run(request).await;
        }
    };

    if check.is_locked {
        tracing::warn!("🚫 Rate limit hit for {} ({:?})", ip, limit_type);
        return Error::RateLimited(create_rate_limit_error(limit_type, None)).into_response();
    }

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(RATE_LIMIT_REMAINING_HEADER, HeaderValue::from(check.remaining_attempts));
    response
}

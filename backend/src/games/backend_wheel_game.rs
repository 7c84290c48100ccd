use axum::{
    debug_handler,
    extract::{rejection::JsonRejection, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use rand::rngs::OsRng;
use validator::Validate;
use wheel_shared::constants::{API_WHEEL_PREFIX, LAYOUT_ENDPOINT, SEGMENTS_ENDPOINT, SPIN_ENDPOINT};
use wheel_shared::shared_wheel_game::*;

use crate::error::Error;
use crate::middleware::rate_limit_middleware;
use crate::services::segment_service;
use crate::AppState;

fn route_path(endpoint: &'static str) -> &'static str {
    endpoint.trim_start_matches(API_WHEEL_PREFIX)
}

/// Routes nested under `/wheel`
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(route_path(SEGMENTS_ENDPOINT), get(get_segments).put(save_segments))
        .route(route_path(LAYOUT_ENDPOINT), get(get_layout))
        .route(route_path(SPIN_ENDPOINT), post(spin_wheel))
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware))
}

#[debug_handler]
async fn get_segments(State(state): State<AppState>) -> Json<SegmentsResponse> {
    let loaded = segment_service::load_segments(&state.store).await;
    Json(SegmentsResponse {
        is_default: loaded.is_default(),
        segments: loaded.segments,
    })
}

#[debug_handler]
async fn save_segments(
    State(state): State<AppState>,
    payload: Result<Json<SaveSegmentsRequest>, JsonRejection>,
) -> Result<Json<SaveSegmentsResponse>, Error> {
    let Json(request) = payload.map_err(|e| Error::BadRequest(e.body_text()))?;
    request.validate()?;

    let segments: Vec<Segment> = request
        .segments
        .into_iter()
        .map(|segment| Segment {
            label: segment.label.trim().to_string(),
            color: segment.color.trim().to_string(),
            ..segment
        })
        .collect();

    segment_service::save_segments(&state.store, &segments).await?;

    Ok(Json(SaveSegmentsResponse {
        success: true,
        message: Some("Wheel saved".to_string()),
        segments,
    }))
}

#[debug_handler]
async fn get_layout(State(state): State<AppState>) -> Json<WheelLayoutResponse> {
    let loaded = segment_service::load_segments(&state.store).await;
    Json(WheelLayoutResponse::for_segment_count(loaded.segments.len()))
}

#[debug_handler]
async fn spin_wheel(
    State(state): State<AppState>,
    payload: Result<Json<SpinRequest>, JsonRejection>,
) -> Result<Json<SpinResponse>, Error> {
    let Json(request) = payload.map_err(|e| Error::BadRequest(e.body_text()))?;
    if !request.current_rotation_deg.is_finite() {
        return Err(Error::BadRequest("currentRotationDeg must be a finite number".to_string()));
    }

    let loaded = segment_service::load_segments(&state.store).await;

    // The winner is fixed here, before the client starts animating
    let mut rng = OsRng;
    let plan = plan_spin(
        &loaded.segments,
        request.current_rotation_deg,
        state.config.full_rotations,
        &mut rng,
    )
    .ok_or(Error::NotPlayable)?;

    tracing::info!(
        "🎡 WHEEL SPIN: landed on \"{}\" (segment {} of {}, reward {}) turning {:.1}°",
        plan.segment.label,
        plan.selected_index + 1,
        loaded.segments.len(),
        plan.segment.reward_value,
        plan.delta_deg
    );

    let message = Some(format!("You got: {}", plan.segment.label));
    Ok(Json(SpinResponse {
        success: true,
        plan: Some(plan),
        duration_ms: SPIN_DURATION_MS,
        message,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wheel_shared::constants::default_segments;
    use wheel_shared::rate_limit::SPIN_MAX_REQUESTS;
    use wheel_shared::wheel_math::segment_at_pointer;

    use crate::config::Config;
    use crate::middleware::RATE_LIMIT_REMAINING_HEADER;
    use crate::store::KeyValueStore;
    use crate::{build_app, AppState};

    fn test_app() -> Router {
        let state = AppState {
            store: KeyValueStore::memory(),
            config: Arc::new(Config::from_lookup(|_| None).unwrap()),
        };
        build_app(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-real-ip", "10.1.1.1");
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn custom_wheel() -> Value {
        json!({
            "segments": [
                { "id": "a", "label": " Tea ", "color": "#A7F3D0", "rewardValue": 1 },
                { "id": "b", "label": "Coffee", "color": "#FBCFE8", "rewardValue": 2.5 },
                { "id": "c", "label": "Juice", "color": "#7DD3FC", "rewardValue": 0 }
            ]
        })
    }

    #[tokio::test]
    async fn test_get_segments_defaults() {
        let app = test_app();
        let response = send(&app, "GET", "/wheel/segments", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: SegmentsResponse = serde_json::from_value(json_body(response).await).unwrap();
        assert!(body.is_default);
        assert_eq!(body.segments, default_segments());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let app = test_app();
        let response = send(&app, "PUT", "/wheel/segments", Some(custom_wheel())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let saved: SaveSegmentsResponse = serde_json::from_value(json_body(response).await).unwrap();
        assert!(saved.success);
        assert_eq!(saved.segments[0].label, "Tea");

        let response = send(&app, "GET", "/wheel/segments", None).await;
        let body: SegmentsResponse = serde_json::from_value(json_body(response).await).unwrap();
        assert!(!body.is_default);
        assert_eq!(body.segments, saved.segments);
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_wheels() {
        let app = test_app();

        let single = json!({ "segments": [{ "id": "a", "label": "Tea", "color": "#A7F3D0", "rewardValue": 1 }] });
        let response = send(&app, "PUT", "/wheel/segments", Some(single)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["codes"], json!(["too_few_segments"]));

        let mut bad_color = custom_wheel();
        bad_color["segments"][1]["color"] = json!("blue");
        let response = send(&app, "PUT", "/wheel/segments", Some(bad_color)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["codes"], json!(["invalid_segment"]));

        let response = send(&app, "PUT", "/wheel/segments", Some(json!({ "nope": true }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Nothing was persisted
        let response = send(&app, "GET", "/wheel/segments", None).await;
        let body: SegmentsResponse = serde_json::from_value(json_body(response).await).unwrap();
        assert!(body.is_default);
    }

    #[tokio::test]
    async fn test_layout_follows_saved_wheel() {
        let app = test_app();
        let response = send(&app, "GET", "/wheel/layout", None).await;
        let layout: WheelLayoutResponse = serde_json::from_value(json_body(response).await).unwrap();
        assert_eq!(layout.arcs.len(), 6);
        assert_eq!(layout.sweep_deg, 60.0);
        assert_eq!(layout.pointer_angle_deg, -90.0);

        send(&app, "PUT", "/wheel/segments", Some(custom_wheel())).await;
        let response = send(&app, "GET", "/wheel/layout", None).await;
        let layout: WheelLayoutResponse = serde_json::from_value(json_body(response).await).unwrap();
        assert_eq!(layout.arcs.len(), 3);
        assert_eq!(layout.sweep_deg, 120.0);
    }

    #[tokio::test]
    async fn test_spin_lands_on_selected_segment() {
        let app = test_app();
        let segments = default_segments();
        let mut rotation = 0.0;

        for _ in 0..10 {
            let response = send(&app, "POST", "/wheel/spin", Some(json!({ "currentRotationDeg": rotation }))).await;
            assert_eq!(response.status(), StatusCode::OK);
            let body: SpinResponse = serde_json::from_value(json_body(response).await).unwrap();
            assert!(body.success);
            assert_eq!(body.duration_ms, SPIN_DURATION_MS);

            let plan = body.plan.unwrap();
            assert_eq!(plan.segment_count, segments.len());
            assert!(plan.matches_wheel(&segments));
            assert_eq!(plan.start_rotation_deg, rotation);
            assert_eq!(plan.full_rotations, FULL_ROTATIONS);
            assert!(plan.delta_deg >= 360.0 * FULL_ROTATIONS as f64);
            assert!(plan.delta_deg < 360.0 * (FULL_ROTATIONS + 1) as f64);
            assert_eq!(plan.segment, segments[plan.selected_index]);
            assert_eq!(segment_at_pointer(plan.target_rotation_deg, segments.len()), plan.selected_index);

            rotation = plan.target_rotation_deg;
        }
    }

    #[tokio::test]
    async fn test_spin_rejects_bad_rotation() {
        let app = test_app();
        let response = send(&app, "POST", "/wheel/spin", Some(json!({ "currentRotationDeg": "fast" }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_spin_is_rate_limited() {
        let app = test_app();
        for attempt in 1..=SPIN_MAX_REQUESTS {
            let response = send(&app, "POST", "/wheel/spin", Some(json!({ "currentRotationDeg": 0.0 }))).await;
            assert_eq!(response.status(), StatusCode::OK);
            let remaining = (SPIN_MAX_REQUESTS - attempt).to_string();
            assert_eq!(response.headers()[RATE_LIMIT_REMAINING_HEADER], remaining.as_str());
        }

        let response = send(&app, "POST", "/wheel/spin", Some(json!({ "currentRotationDeg": 0.0 }))).await;
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(json_body(response).await["retryAfterSecs"], 60);

        // Reads are counted separately
        let response = send(&app, "GET", "/wheel/segments", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app();
        let response = send(&app, "GET", "/api/health_check", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;
use wheel_shared::constants::{default_segments, SEGMENTS_ENDPOINT};
use wheel_shared::shared_wheel_game::{Segment, SegmentsResponse};
use yew::prelude::*;

use crate::config::api_url;

/// The wheel shared by the play and editor screens
#[derive(Clone, PartialEq)]
pub struct WheelContext {
    pub segments: Vec<Segment>,
    pub is_default: bool,
    pub loading: bool,
    pub set_segments: Callback<Vec<Segment>>,
    /// Adopts a freshly fetched server response as is
    pub apply_response: Callback<SegmentsResponse>,
}

pub async fn fetch_segments() -> Result<SegmentsResponse, String> {
    let response = Request::get(&api_url(SEGMENTS_ENDPOINT))
        .send()
        .await
        .map_err(|e| format!("Network error: {:?}", e))?;

    if !response.ok() {
        return Err(format!("Error status: {}", response.status()));
    }

    response
        .json::<SegmentsResponse>()
        .await
        .map_err(|e| format!("Error parsing segments: {:?}", e))
}

#[hook]
pub fn use_segments() -> WheelContext {
    let segments = use_state(default_segments);
    let is_default = use_state(|| true);
    let loading = use_state(|| true);

    {
        let segments = segments.clone();
        let is_default = is_default.clone();
        let loading = loading.clone();

        use_effect_with((), move |_| {
            loading.set(true);

            spawn_local(async move {
                match fetch_segments().await {
                    Ok(response) => {
                        segments.set(response.segments);
                        is_default.set(response.is_default);
                    }
                    Err(err) => {
                        log::warn!("Could not load the wheel, using defaults: {}", err);
                        segments.set(default_segments());
                        is_default.set(true);
                    }
                }
                loading.set(false);
            });

            || ()
        });
    }

    let set_segments = {
        let segments = segments.clone();
        let is_default = is_default.clone();
        Callback::from(move |list: Vec<Segment>| {
            segments.set(list);
            is_default.set(false);
        })
    };

    let apply_response = {
        let segments = segments.clone();
        let is_default = is_default.clone();
        Callback::from(move |response: SegmentsResponse| {
            segments.set(response.segments);
            is_default.set(response.is_default);
        })
    };

    WheelContext {
        segments: (*segments).clone(),
        is_default: *is_default,
        loading: *loading,
        set_segments,
        apply_response,
    }
}

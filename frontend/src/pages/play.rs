use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::Request;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use wheel_shared::constants::{NETWORK_ERROR, SPIN_ENDPOINT, SPIN_FAILED_ERROR, WHEEL_CHANGED_ERROR};
use wheel_shared::shared_wheel_game::*;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::wheel_canvas::animated_rotation;
use crate::components::{ResultModal, SpinButton, WheelCanvas};
use crate::config::api_url;
use crate::hooks::{fetch_segments, WheelContext};
use crate::styles;
use crate::Route;

enum SpinFailure {
    /// The backend could not be reached; the spin can still be resolved locally
    Offline(String),
    Rejected(String),
}

async fn request_spin(current_rotation_deg: f64) -> Result<SpinPlan, SpinFailure> {
    let request = Request::post(&api_url(SPIN_ENDPOINT))
        .json(&SpinRequest { current_rotation_deg })
        .map_err(|e| SpinFailure::Rejected(format!("Failed to build request: {:?}", e)))?;

    let response = request
        .send()
        .await
        .map_err(|e| SpinFailure::Offline(format!("{:?}", e)))?;

    if !response.ok() {
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| SPIN_FAILED_ERROR.to_string());
        return Err(SpinFailure::Rejected(message));
    }

    let body = response
        .json::<SpinResponse>()
        .await
        .map_err(|e| SpinFailure::Rejected(format!("Error parsing spin response: {:?}", e)))?;

    match body.plan {
        Some(plan) if body.success => Ok(plan),
        _ => Err(SpinFailure::Rejected(
            body.message.unwrap_or_else(|| SPIN_FAILED_ERROR.to_string()),
        )),
    }
}

/// Drives the displayed rotation with requestAnimationFrame until the plan's
/// target is reached, then hands the plan to `on_done`.
fn animate_spin(plan: SpinPlan, rotation: UseStateHandle<f64>, on_done: Callback<SpinPlan>) {
    let start_time = js_sys::Date::now();
    let duration = SPIN_DURATION_MS as f64;

    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let elapsed = js_sys::Date::now() - start_time;

        if elapsed < duration {
            rotation.set(animated_rotation(plan.start_rotation_deg, plan.delta_deg, elapsed, duration));
            if let Some(window) = web_sys::window() {
                if let Some(callback) = f.borrow().as_ref() {
                    let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
                }
            }
        } else {
            rotation.set(plan.target_rotation_deg);
            on_done.emit(plan.clone());
        }
    }) as Box<dyn FnMut()>));

    if let Some(window) = web_sys::window() {
        if let Some(callback) = g.borrow().as_ref() {
            let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }
}

#[function_component(Play)]
pub fn play() -> Html {
    let wheel = use_context::<WheelContext>();

    // Authoritative spin state; the handles below only mirror it for rendering
    let game = use_mut_ref(WheelGame::new);
    let rotation = use_state(|| 0.0_f64);
    let is_spinning = use_state(|| false);
    let result = use_state(|| None::<Segment>);
    let error_message = use_state(|| None::<String>);

    let Some(wheel) = wheel else {
        log::error!("Play page rendered without a wheel context");
        return html! {};
    };

    let segment_count = wheel.segments.len();
    let playable = is_playable(segment_count);

    let on_spin = {
        let game = game.clone();
        let rotation = rotation.clone();
        let is_spinning = is_spinning.clone();
        let result = result.clone();
        let error_message = error_message.clone();
        let segments = wheel.segments.clone();
        let apply_response = wheel.apply_response.clone();

        Callback::from(move |_: MouseEvent| {
            if !game.borrow_mut().start_spin(segments.len()) {
                return;
            }

            is_spinning.set(true);
            result.set(None);
            error_message.set(None);

            let current = game.borrow().rotation_deg;
            let game = game.clone();
            let rotation = rotation.clone();
            let is_spinning = is_spinning.clone();
            let result = result.clone();
            let error_message = error_message.clone();
            let segments = segments.clone();
            let apply_response = apply_response.clone();

            spawn_local(async move {
                let plan = match request_spin(current).await {
                    Ok(plan) if plan.matches_wheel(&segments) => plan,
                    // The server resolved against a different wheel; show that wheel before animating
                    Ok(plan) => {
                        log::warn!("Local wheel is out of date, refreshing before the spin");
                        match fetch_segments().await {
                            Ok(fresh) if plan.matches_wheel(&fresh.segments) => {
                                apply_response.emit(fresh);
                                plan
                            }
                            Ok(fresh) => {
                                apply_response.emit(fresh);
                                game.borrow_mut().cancel_pending_spin();
                                is_spinning.set(false);
                                error_message.set(Some(WHEEL_CHANGED_ERROR.to_string()));
                                return;
                            }
                            Err(err) => {
                                log::error!("Could not refresh the wheel: {}", err);
                                game.borrow_mut().cancel_pending_spin();
                                is_spinning.set(false);
                                error_message.set(Some(NETWORK_ERROR.to_string()));
                                return;
                            }
                        }
                    }
                    Err(SpinFailure::Offline(err)) => {
                        log::warn!("Spin request failed, resolving locally: {}", err);
                        match plan_spin(&segments, current, FULL_ROTATIONS, &mut rand::thread_rng()) {
                            Some(plan) => plan,
                            None => {
                                game.borrow_mut().cancel_pending_spin();
                                is_spinning.set(false);
                                error_message.set(Some(NETWORK_ERROR.to_string()));
                                return;
                            }
                        }
                    }
                    Err(SpinFailure::Rejected(message)) => {
                        game.borrow_mut().cancel_pending_spin();
                        is_spinning.set(false);
                        error_message.set(Some(message));
                        return;
                    }
                };

                let on_done = {
                    let game = game.clone();
                    Callback::from(move |plan: SpinPlan| {
                        game.borrow_mut().complete_spin(&plan);
                        is_spinning.set(false);
                        result.set(Some(plan.segment));
                    })
                };

                animate_spin(plan, rotation, on_done);
            });
        })
    };

    let on_close_result = {
        let result = result.clone();
        Callback::from(move |_| result.set(None))
    };

    html! {
        <div class={styles::CONTAINER}>
            <div class={styles::PAGE}>
                <div class={styles::PAGE_HEADER}>
                    <h1 class={styles::TEXT_H1}>{"Lucky Wheel"}</h1>
                    <Link<Route> to={Route::Editor} classes={styles::BUTTON_SECONDARY}>{"Edit wheel"}</Link<Route>>
                </div>

                if wheel.is_default && !wheel.loading {
                    <p class={styles::TEXT_SMALL}>{"Playing with the default wheel"}</p>
                }

                <div class={styles::WHEEL_FRAME}>
                    <WheelCanvas
                        segments={wheel.segments.clone()}
                        rotation={*rotation}
                        is_spinning={*is_spinning}
                    />
                </div>

                <SpinButton
                    is_spinning={*is_spinning}
                    disabled={!playable || wheel.loading}
                    onclick={on_spin}
                />

                if !playable {
                    <div class={styles::ALERT_WARNING}>{"Add at least 2 segments in the editor to spin."}</div>
                }

                if let Some(message) = (*error_message).clone() {
                    <div class={styles::ALERT_ERROR}>{message}</div>
                }
            </div>

            <ResultModal segment={(*result).clone()} on_close={on_close_result} />
        </div>
    }
}

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use wheel_shared::constants::{default_segments, INVALID_WHEEL_ERROR, SAVE_FAILED_ERROR, SEGMENTS_ENDPOINT};
use wheel_shared::shared_wheel_game::{SaveSegmentsRequest, SaveSegmentsResponse, Segment};
use wheel_shared::wheel_editor::{SegmentInput, WheelDraft};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::{SegmentForm, SegmentList, WheelCanvas};
use crate::config::api_url;
use crate::hooks::{use_form_state, WheelContext};
use crate::styles;
use crate::Route;

async fn put_segments(segments: Vec<Segment>) -> Result<Vec<Segment>, String> {
    let request = Request::put(&api_url(SEGMENTS_ENDPOINT))
        .json(&SaveSegmentsRequest { segments })
        .map_err(|e| format!("Failed to build request: {:?}", e))?;

    let response = request.send().await.map_err(|e| {
        log::error!("Save request failed: {:?}", e);
        SAVE_FAILED_ERROR.to_string()
    })?;

    if !response.ok() {
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| SAVE_FAILED_ERROR.to_string());
        return Err(message);
    }

    response
        .json::<SaveSegmentsResponse>()
        .await
        .map(|body| body.segments)
        .map_err(|e| format!("Error parsing save response: {:?}", e))
}

#[function_component(Editor)]
pub fn editor() -> Html {
    let wheel = use_context::<WheelContext>();
    let draft = {
        let initial = wheel.as_ref().map(|w| w.segments.clone()).unwrap_or_default();
        use_state(move || WheelDraft::new(initial))
    };
    let dirty = use_state(|| false);
    let editing_id = use_state(|| None::<String>);
    let form_version = use_state(|| 0u32);
    let saving = use_state(|| false);
    let form_state = use_form_state();
    let navigator = use_navigator();

    // Follow the shared wheel until the user starts editing
    {
        let draft = draft.clone();
        let dirty = *dirty;
        use_effect_with(
            wheel.as_ref().map(|w| (w.loading, w.segments.clone())),
            move |snapshot| {
                if let Some((false, segments)) = snapshot {
                    if !dirty && draft.segments != *segments {
                        draft.set(WheelDraft::new(segments.clone()));
                    }
                }
                || ()
            },
        );
    }

    let Some(wheel) = wheel else {
        log::error!("Editor rendered without a wheel context");
        return html! {};
    };

    // Bumping the version remounts the form with fresh fields
    let reset_form = {
        let editing_id = editing_id.clone();
        let form_version = form_version.clone();
        Callback::from(move |_| {
            editing_id.set(None);
            form_version.set(form_version.wrapping_add(1));
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let dirty = dirty.clone();
        let editing_id = editing_id.clone();
        let reset_form = reset_form.clone();
        Callback::from(move |input: SegmentInput| {
            let mut next = (*draft).clone();
            let applied = match editing_id.as_deref() {
                Some(id) => input.into_segment(Some(id)).map(|segment| next.update(segment)).unwrap_or(false),
                None => match input.into_segment(None) {
                    Some(segment) => {
                        next.add(segment);
                        true
                    }
                    None => false,
                },
            };
            if applied {
                draft.set(next);
                dirty.set(true);
                reset_form.emit(());
            }
        })
    };

    let on_edit = {
        let editing_id = editing_id.clone();
        let form_version = form_version.clone();
        Callback::from(move |id: String| {
            editing_id.set(Some(id));
            form_version.set(form_version.wrapping_add(1));
        })
    };

    let on_remove = {
        let draft = draft.clone();
        let dirty = dirty.clone();
        let editing_id = editing_id.clone();
        let reset_form = reset_form.clone();
        Callback::from(move |id: String| {
            let mut next = (*draft).clone();
            if next.remove(&id) {
                draft.set(next);
                dirty.set(true);
                if editing_id.as_deref() == Some(id.as_str()) {
                    reset_form.emit(());
                }
            }
        })
    };

    let on_restore_defaults = {
        let draft = draft.clone();
        let dirty = dirty.clone();
        let reset_form = reset_form.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set(WheelDraft::new(default_segments()));
            dirty.set(true);
            reset_form.emit(());
        })
    };

    let on_save = {
        let draft = draft.clone();
        let saving = saving.clone();
        let form_state = form_state.clone();
        let set_segments = wheel.set_segments.clone();
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            if *saving {
                return;
            }
            if !draft.can_save() {
                form_state.handle_error.emit(INVALID_WHEEL_ERROR.to_string());
                return;
            }

            saving.set(true);
            form_state.clear.emit(());

            let segments = draft.segments.clone();
            let saving = saving.clone();
            let form_state = form_state.clone();
            let set_segments = set_segments.clone();
            let navigator = navigator.clone();

            spawn_local(async move {
                match put_segments(segments).await {
                    Ok(saved) => {
                        log::info!("Saved wheel with {} segments", saved.len());
                        set_segments.emit(saved);
                        form_state.handle_success.emit("Wheel saved".to_string());
                        TimeoutFuture::new(600).await;
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Play);
                        }
                    }
                    Err(message) => form_state.handle_error.emit(message),
                }
                saving.set(false);
            });
        })
    };

    let on_cancel_edit = {
        let reset_form = reset_form.clone();
        Callback::from(move |_| reset_form.emit(()))
    };

    let form_initial = editing_id
        .as_deref()
        .and_then(|id| draft.get(id))
        .map(SegmentInput::from_segment)
        .unwrap_or_default();

    html! {
        <div class={styles::CONTAINER}>
            <div class={styles::PAGE}>
                <div class={styles::PAGE_HEADER}>
                    <h1 class={styles::TEXT_H1}>{"Edit wheel"}</h1>
                    <Link<Route> to={Route::Play} classes={styles::BUTTON_SECONDARY}>{"Back"}</Link<Route>>
                </div>

                <div class={styles::WHEEL_FRAME}>
                    <WheelCanvas segments={draft.segments.clone()} rotation={0.0} size={280} />
                </div>

                <div class={classes!(styles::CARD, "w-full")}>
                    <h3 class={styles::TEXT_H3}>
                        { if editing_id.is_some() { "Edit segment" } else { "New segment" } }
                    </h3>
                    <SegmentForm
                        key={form_version.to_string()}
                        initial={form_initial}
                        is_editing={editing_id.is_some()}
                        on_submit={on_submit}
                        on_cancel={on_cancel_edit}
                    />
                </div>

                <div class={classes!(styles::CARD, "w-full")}>
                    <h3 class={styles::TEXT_H3}>{format!("Segments ({})", draft.segments.len())}</h3>
                    <SegmentList
                        segments={draft.segments.clone()}
                        editing_id={(*editing_id).clone()}
                        on_edit={on_edit}
                        on_remove={on_remove}
                    />
                    <p class={styles::TEXT_HINT}>{"A wheel needs at least 2 segments."}</p>
                </div>

                if let Some(err) = form_state.error() {
                    <div class={classes!(styles::ALERT_ERROR, "w-full")}>{err.to_string()}</div>
                }
                if let Some(msg) = form_state.success() {
                    <div class={classes!(styles::ALERT_SUCCESS, "w-full")}>{msg.to_string()}</div>
                }

                <div class="w-full flex justify-between">
                    <button type="button" class={styles::BUTTON_SECONDARY} onclick={on_restore_defaults}>
                        {"Restore defaults"}
                    </button>
                    <button
                        type="button"
                        class={styles::BUTTON_PRIMARY}
                        disabled={!draft.can_save() || *saving}
                        onclick={on_save}
                    >
                        { if *saving { "Saving..." } else { "Save wheel" } }
                    </button>
                </div>
            </div>
        </div>
    }
}

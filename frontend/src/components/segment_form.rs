use web_sys::HtmlInputElement;
use wheel_shared::constants::PRESET_COLORS;
use wheel_shared::validation::{is_valid_color, validate_label};
use wheel_shared::wheel_editor::SegmentInput;
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct SegmentFormProps {
    pub initial: SegmentInput,
    pub is_editing: bool,
    pub on_submit: Callback<SegmentInput>,
    pub on_cancel: Callback<()>,
}

/// User-facing message for a label, `None` when it is fine or still empty.
pub fn label_error(label: &str) -> Option<String> {
    if label.is_empty() {
        return None;
    }
    validate_label(label).err().map(|err| match &*err.code {
        "empty_label" => "Please enter a name".to_string(),
        "label_too_long" => "Name is too long".to_string(),
        "inappropriate_label" => "Please choose a different name".to_string(),
        _ => "Invalid name".to_string(),
    })
}

pub fn reward_error(reward: &str) -> Option<&'static str> {
    match reward.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => None,
        _ => Some("Reward must be a number"),
    }
}

#[function_component(SegmentForm)]
pub fn segment_form(props: &SegmentFormProps) -> Html {
    let input = use_state(|| props.initial.clone());

    let on_label = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            input.set(SegmentInput { label: value, ..(*input).clone() });
        })
    };

    let on_reward = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            input.set(SegmentInput { reward_value: value, ..(*input).clone() });
        })
    };

    let label_err = label_error(&input.label);
    let reward_err = reward_error(&input.reward_value);
    let can_submit = input.is_valid() && is_valid_color(&input.color) && label_err.is_none();

    let on_submit = {
        let input = input.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit((*input).clone());
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    let color_options = PRESET_COLORS.iter().map(|color| {
        let selected = input.color == *color;
        let onclick = {
            let input = input.clone();
            let color = color.to_string();
            Callback::from(move |_: MouseEvent| {
                input.set(SegmentInput { color: color.clone(), ..(*input).clone() });
            })
        };
        html! {
            <button
                type="button"
                key={*color}
                class={if selected { styles::COLOR_OPTION_SELECTED } else { styles::COLOR_OPTION }}
                style={format!("background-color: {}", color)}
                title={*color}
                {onclick}
            />
        }
    });

    html! {
        <form class="space-y-4" onsubmit={on_submit}>
            <div>
                <label class={styles::TEXT_LABEL}>{"Name"}</label>
                <input
                    type="text"
                    class={if label_err.is_some() { styles::INPUT_ERROR } else { styles::INPUT }}
                    placeholder="e.g. Free coffee"
                    value={input.label.clone()}
                    oninput={on_label}
                />
                if let Some(err) = label_err {
                    <p class={styles::TEXT_ERROR}>{err}</p>
                }
            </div>
            <div>
                <label class={styles::TEXT_LABEL}>{"Reward value"}</label>
                <input
                    type="text"
                    inputmode="decimal"
                    class={if reward_err.is_some() { styles::INPUT_ERROR } else { styles::INPUT }}
                    value={input.reward_value.clone()}
                    oninput={on_reward}
                />
                if let Some(err) = reward_err {
                    <p class={styles::TEXT_ERROR}>{err}</p>
                }
            </div>
            <div>
                <label class={styles::TEXT_LABEL}>{"Color"}</label>
                <div class="mt-2 flex flex-wrap gap-2">{ for color_options }</div>
            </div>
            <div class="flex gap-2 justify-end">
                if props.is_editing {
                    <button type="button" class={styles::BUTTON_SECONDARY} onclick={on_cancel}>{"Cancel"}</button>
                }
                <button type="submit" class={styles::BUTTON_PRIMARY} disabled={!can_submit}>
                    { if props.is_editing { "Update segment" } else { "Add segment" } }
                </button>
            </div>
        </form>
    }
}

use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub is_spinning: bool,
    pub disabled: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let is_disabled = props.disabled || props.is_spinning;
    let button_text = if props.is_spinning { "Spinning..." } else { "Spin" };
    let button_class = if is_disabled {
        styles::SPIN_BUTTON_DISABLED
    } else {
        styles::SPIN_BUTTON
    };

    html! {
        <button
            onclick={props.onclick.clone()}
            disabled={is_disabled}
            class={button_class}
        >
            <span class="flex items-center justify-center">
                if props.is_spinning {
                    <svg class="inline-block mr-2 animate-spin" xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                        <circle cx="12" cy="12" r="10" />
                        <path d="M12 6v6l4 2" />
                    </svg>
                }
                {button_text}
            </span>
        </button>
    }
}

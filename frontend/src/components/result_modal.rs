use wheel_shared::shared_wheel_game::Segment;
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct ResultModalProps {
    pub segment: Option<Segment>,
    pub on_close: Callback<()>,
}

pub fn format_reward(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[function_component(ResultModal)]
pub fn result_modal(props: &ResultModalProps) -> Html {
    let Some(segment) = &props.segment else {
        return html! {};
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class={styles::MODAL_BACKDROP}>
            <div class={styles::MODAL_CARD}>
                <div
                    class="mx-auto w-16 h-16 rounded-full border-4 border-white shadow"
                    style={format!("background-color: {}", segment.color)}
                />
                <h3 class={styles::TEXT_H3}>{"You got"}</h3>
                <p class="text-2xl font-bold text-gray-900 dark:text-white">{&segment.label}</p>
                <p class={styles::TEXT_SMALL}>{format!("Reward: {}", format_reward(segment.reward_value))}</p>
                <button class={styles::BUTTON_PRIMARY} onclick={on_close}>{"Spin again"}</button>
            </div>
        </div>
    }
}

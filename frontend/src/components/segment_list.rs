use wheel_shared::shared_wheel_game::Segment;
use yew::prelude::*;

use crate::components::result_modal::format_reward;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct SegmentListProps {
    pub segments: Vec<Segment>,
    pub editing_id: Option<String>,
    pub on_edit: Callback<String>,
    pub on_remove: Callback<String>,
}

#[function_component(SegmentList)]
pub fn segment_list(props: &SegmentListProps) -> Html {
    if props.segments.is_empty() {
        return html! { <p class={styles::TEXT_SMALL}>{"No segments yet"}</p> };
    }

    let rows = props.segments.iter().map(|segment| {
        let is_editing = props.editing_id.as_deref() == Some(segment.id.as_str());
        let on_edit = {
            let on_edit = props.on_edit.clone();
            let id = segment.id.clone();
            Callback::from(move |_: MouseEvent| on_edit.emit(id.clone()))
        };
        let on_remove = {
            let on_remove = props.on_remove.clone();
            let id = segment.id.clone();
            Callback::from(move |_: MouseEvent| on_remove.emit(id.clone()))
        };

        html! {
            <li key={segment.id.clone()} class={classes!(styles::SEGMENT_ROW, is_editing.then_some("bg-blue-50 dark:bg-blue-900/30"))}>
                <div class="flex items-center gap-3 min-w-0">
                    <span class={styles::COLOR_SWATCH} style={format!("background-color: {}", segment.color)} />
                    <span class="truncate text-gray-900 dark:text-white">{&segment.label}</span>
                    <span class={styles::TEXT_SMALL}>{format_reward(segment.reward_value)}</span>
                </div>
                <div class="flex gap-2 shrink-0">
                    <button type="button" class={styles::BUTTON_SECONDARY} onclick={on_edit}>{"Edit"}</button>
                    <button type="button" class={styles::BUTTON_DANGER} onclick={on_remove}>{"Remove"}</button>
                </div>
            </li>
        }
    });

    html! {
        <ul class="divide-y divide-gray-100 dark:divide-gray-700">{ for rows }</ul>
    }
}

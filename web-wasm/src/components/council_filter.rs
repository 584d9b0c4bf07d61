//! 自治体フィルタコンポーネント

use leptos::prelude::*;
use property_map_common::CouncilOption;

#[component]
pub fn CouncilFilter<F>(
    options: Vec<CouncilOption>,
    selected: Memo<String>,
    on_change: F,
) -> impl IntoView
where
    F: Fn(String) + 'static + Clone + Send,
{
    view! {
        <div class="form-group council-filter">
            <label for="council-select">"Council"</label>
            <select
                id="council-select"
                prop:value=move || selected.get()
                on:change=move |ev| on_change(event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|option| {
                        let value = option.value().to_string();
                        let label = option.label().to_string();
                        let is_selected = {
                            let value = value.clone();
                            move || selected.get() == value
                        };
                        view! {
                            <option value=value selected=is_selected>{label}</option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

//! 地図読み込み中のプレースホルダ

use leptos::prelude::*;

#[component]
pub fn MapSkeleton(message: Option<String>) -> impl IntoView {
    let unavailable = message.is_some();
    view! {
        <div class="map-skeleton" class:unavailable=unavailable>
            {message.map(|m| view! { <p class="text-muted">{m}</p> })}
        </div>
    }
}

//! 地図コンポーネント
//!
//! Google Maps 上にフィルタ済みの物件をピンとして描画する。

use crate::maps::{self, JsMapOptions, MAP_CONTAINER_ID};
use leptos::prelude::*;
use property_map_common::{LatLng, MarkerDescriptor};

#[component]
pub fn PropertyMap<F, E>(
    markers: Memo<Vec<MarkerDescriptor>>,
    center: LatLng,
    zoom: u8,
    on_activate: F,
    on_error: E,
) -> impl IntoView
where
    F: Fn(String) + 'static + Clone + Send,
    E: Fn(String) + 'static + Send,
{
    Effect::new(move |prev: Option<()>| {
        let list = markers.get();

        // 初回のみ地図を作成してハンドラを登録
        if prev.is_none() {
            // 作成に失敗したらプレースホルダ表示に戻す
            if let Err(e) = maps::create_map(MAP_CONTAINER_ID, &JsMapOptions::bare(center, zoom)) {
                gloo::console::error!(e.clone());
                on_error(e);
                return;
            }
            maps::set_marker_handler(on_activate.clone());
        }

        if let Err(e) = maps::set_markers(&list) {
            gloo::console::warn!(e);
        }
    });

    on_cleanup(maps::destroy_map);

    view! {
        <div id=MAP_CONTAINER_ID class="map-container"></div>
    }
}

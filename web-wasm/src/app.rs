//! メインアプリケーションコンポーネント

use crate::components::{
    council_filter::CouncilFilter,
    detail_drawer::DetailDrawer,
    map_skeleton::MapSkeleton,
    property_map::PropertyMap,
};
use crate::maps::{self, MapStatus};
use leptos::prelude::*;
use property_map_common::{PropertyId, RecordSet, SelectionController, DEFAULT_CENTER, DEFAULT_ZOOM};
use std::sync::Arc;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    match RecordSet::bundled() {
        Ok(records) => view! { <MapViewer records=Arc::new(records) /> }.into_any(),
        Err(e) => {
            gloo::console::error!(e.to_string());
            view! {
                <p class="error">{format!("Failed to load property data: {}", e)}</p>
            }
            .into_any()
        }
    }
}

/// フィルタ・地図・詳細パネルをまとめた画面
#[component]
fn MapViewer(records: Arc<RecordSet>) -> impl IntoView {
    // 選択状態はコントローラひとつに集約
    let controller = RwSignal::new(SelectionController::new(records));
    let (map_status, set_map_status) = signal(MapStatus::Loading);

    // 地図スクリプトの読み込み
    wasm_bindgen_futures::spawn_local(async move {
        let status = maps::initialize(maps::api_key()).await;
        if let MapStatus::Unavailable(reason) = &status {
            gloo::console::warn!(reason.clone());
        }
        set_map_status.set(status);
    });

    let council_options = controller.with_untracked(|c| c.council_options());
    let selected_council = Memo::new(move |_| controller.with(|c| c.selected_council().to_string()));
    let markers = Memo::new(move |_| controller.with(|c| c.markers()));
    let visible_count = Memo::new(move |_| controller.with(|c| c.visible_count()));
    let panel_open = Memo::new(move |_| controller.with(|c| c.panel_open()));
    let detail = Memo::new(move |_| controller.with(|c| c.detail()));

    // フィルタ変更ハンドラ
    let on_council_change = move |value: String| {
        controller.update(|c| c.on_council_change(value));
    };

    // ピン選択ハンドラ
    let on_marker_activate = move |id: String| {
        controller.update(|c| {
            if let Err(e) = c.activate_by_id(&PropertyId::new(id)) {
                gloo::console::warn!(e.to_string());
            }
        });
    };

    // 地図作成失敗ハンドラ
    let on_map_error = move |reason: String| {
        set_map_status.set(MapStatus::Unavailable(reason));
    };

    // パネルを閉じるハンドラ
    let on_panel_dismiss = move |_: ()| {
        controller.update(|c| c.on_panel_dismiss());
    };

    view! {
        <div class="app">
            <div class="toolbar">
                <CouncilFilter
                    options=council_options
                    selected=selected_council
                    on_change=on_council_change
                />
                <span class="pin-count">
                    {move || format!("{} properties", visible_count.get())}
                </span>
            </div>

            <div class="map-area">
                {move || match map_status.get() {
                    MapStatus::Loading => view! { <MapSkeleton message=None /> }.into_any(),
                    MapStatus::Unavailable(reason) => {
                        view! { <MapSkeleton message=Some(reason) /> }.into_any()
                    }
                    MapStatus::Ready => view! {
                        <PropertyMap
                            markers=markers
                            center=DEFAULT_CENTER
                            zoom=DEFAULT_ZOOM
                            on_activate=on_marker_activate
                            on_error=on_map_error
                        />
                    }
                    .into_any(),
                }}
            </div>

            <DetailDrawer open=panel_open detail=detail on_close=on_panel_dismiss />
        </div>
    }
}

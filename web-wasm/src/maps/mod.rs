//! 地図ウィジェット連携

pub mod js_bindings;

pub use js_bindings::{
    create_map, destroy_map, load_google_maps, set_marker_handler, set_markers, JsMapOptions,
};

/// 地図を描画するコンテナ要素のID
pub const MAP_CONTAINER_ID: &str = "property-map";

/// ビルド時に埋め込む地図APIキー
pub fn api_key() -> Option<&'static str> {
    option_env!("GOOGLE_MAPS_API_KEY").filter(|key| !key.is_empty())
}

/// 地図スクリプトの読み込み状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapStatus {
    Loading,
    Ready,
    Unavailable(String),
}

/// 読み込み・地図作成の結果から状態を決める
impl From<Result<(), String>> for MapStatus {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => MapStatus::Ready,
            Err(message) => MapStatus::Unavailable(message),
        }
    }
}

pub const MISSING_KEY_MESSAGE: &str = "Map unavailable: GOOGLE_MAPS_API_KEY was not set at build time";

/// APIキーの有無とスクリプト読み込みから状態を決める
///
/// キーがなければJSを呼ばずに `Unavailable` を返す。
pub async fn initialize(api_key: Option<&str>) -> MapStatus {
    let Some(key) = api_key else {
        return MapStatus::Unavailable(MISSING_KEY_MESSAGE.into());
    };
    load_google_maps(key).await.into()
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn wasm_initialize_without_key_is_unavailable() {
        let status = initialize(None).await;
        assert_eq!(status, MapStatus::Unavailable(MISSING_KEY_MESSAGE.into()));
    }

    #[wasm_bindgen_test]
    fn wasm_create_map_without_container_is_unavailable() {
        let result = create_map("missing-map-container", &JsMapOptions::bare(property_map_common::DEFAULT_CENTER, 15));
        match MapStatus::from(result) {
            MapStatus::Unavailable(message) => assert!(message.contains("missing-map-container")),
            other => panic!("Unavailableのはず: {:?}", other),
        }
    }
}

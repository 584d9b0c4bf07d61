//! JavaScript Bridge バインディング
//!
//! Google Maps の読み込み・地図作成・ピン描画を JavaScript 側に委譲する。

use property_map_common::{LatLng, MarkerDescriptor};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ============================================
// データ型定義
// ============================================

/// google.maps.Map に渡すオプション
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsMapOptions {
    pub center: LatLng,
    pub zoom: u8,
    pub zoom_control: bool,
    pub street_view_control: bool,
    pub map_type_control: bool,
    pub fullscreen_control: bool,
}

impl JsMapOptions {
    /// 操作コントロールをすべて隠した地図
    pub fn bare(center: LatLng, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            zoom_control: false,
            street_view_control: false,
            map_type_control: false,
            fullscreen_control: false,
        }
    }
}

// ============================================
// JavaScript関数のextern宣言
// ============================================

#[wasm_bindgen(module = "/js/google-maps.js")]
extern "C" {
    #[wasm_bindgen(js_name = "loadGoogleMaps", catch)]
    async fn load_google_maps_js(api_key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "createMap", catch)]
    fn create_map_js(container_id: &str, options: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = "setMarkerHandler")]
    fn set_marker_handler_js(handler: &Closure<dyn Fn(String)>);

    #[wasm_bindgen(js_name = "setMarkers")]
    fn set_markers_js(descriptors: JsValue);

    #[wasm_bindgen(js_name = "destroyMap")]
    fn destroy_map_js();
}

// ============================================
// ラッパー
// ============================================

/// JS例外をメッセージ文字列に変換
fn js_error_message(err: JsValue) -> String {
    match err.dyn_ref::<js_sys::Error>() {
        Some(e) => String::from(e.message()),
        None => format!("{:?}", err),
    }
}

pub async fn load_google_maps(api_key: &str) -> Result<(), String> {
    load_google_maps_js(api_key)
        .await
        .map(|_| ())
        .map_err(|e| format!("Map unavailable: {}", js_error_message(e)))
}

pub fn create_map(container_id: &str, options: &JsMapOptions) -> Result<(), String> {
    let options = serde_wasm_bindgen::to_value(options)
        .map_err(|e| format!("Map options serialization failed: {}", e))?;
    create_map_js(container_id, options).map_err(js_error_message)
}

/// ピンのクリックで呼ばれるハンドラを登録（物件IDが渡される）
pub fn set_marker_handler<F>(handler: F)
where
    F: Fn(String) + 'static,
{
    let closure = Closure::<dyn Fn(String)>::new(handler);
    set_marker_handler_js(&closure);
    closure.forget();
}

pub fn set_markers(markers: &[MarkerDescriptor]) -> Result<(), String> {
    let value = markers_to_js(markers)?;
    set_markers_js(value);
    Ok(())
}

pub fn destroy_map() {
    destroy_map_js();
}

// ============================================
// ヘルパー関数
// ============================================

pub fn markers_to_js(markers: &[MarkerDescriptor]) -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(markers).map_err(|e| format!("Marker serialization failed: {}", e))
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use property_map_common::PropertyId;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_markers_to_js_uses_plain_objects() {
        let markers = vec![MarkerDescriptor {
            property_id: PropertyId::from("210451"),
            position: LatLng::new(-37.93, 145.44),
        }];

        let value = markers_to_js(&markers).expect("変換失敗");
        let array: js_sys::Array = value.dyn_into().expect("配列のはず");
        assert_eq!(array.length(), 1);
        let first = array.get(0);
        let id = js_sys::Reflect::get(&first, &JsValue::from_str("propertyId")).expect("propertyIdあり");
        assert_eq!(id.as_string().as_deref(), Some("210451"));
    }
}

//! 選択状態遷移テスト
//!
//! フィルタ・ピン選択・パネル操作のシナリオを検証

use property_map::session;
use property_map_common::{
    apply_filter, derive_council_options, CouncilOption, PropertyId, SelectionController,
};
use std::io::Write;
use tempfile::NamedTempFile;

const SCENARIO: &str = r#"[
    {"property_id": 1, "lat": -37.931, "lng": 145.441, "council": "A", "full_address": "1 Main Street, Emerald VIC 3782", "postcode": 3782},
    {"property_id": 2, "lat": -37.932, "lng": 145.442, "council": "B", "full_address": "2 Kings Road, Macclesfield VIC 3782", "postcode": 3782},
    {"property_id": 3, "lat": -37.933, "lng": 145.443, "council": "A", "full_address": "3 Church Street, Emerald VIC 3782", "postcode": "3782"}
]"#;

fn scenario_session() -> SelectionController {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(SCENARIO.as_bytes()).expect("書き込み失敗");
    session::open_session(Some(file.path())).expect("読み込み失敗")
}

fn ids(controller: &SelectionController) -> Vec<String> {
    controller
        .filtered()
        .iter()
        .map(|r| r.property_id.to_string())
        .collect()
}

/// 選択肢は All + 初出順の自治体
#[test]
fn test_scenario_council_options() {
    let c = scenario_session();
    let options = c.council_options();
    assert_eq!(
        options,
        vec![
            CouncilOption::All,
            CouncilOption::Council("A".into()),
            CouncilOption::Council("B".into()),
        ]
    );
    assert_eq!(options, derive_council_options(c.records().records()));
}

/// "A" で絞り込むと 1, 3 が元の順で残る
#[test]
fn test_scenario_filter_a() {
    let mut c = scenario_session();
    c.on_council_change("A");
    assert_eq!(ids(&c), vec!["1", "3"]);
}

/// 空文字は全件
#[test]
fn test_scenario_filter_all() {
    let mut c = scenario_session();
    c.on_council_change("A");
    c.on_council_change("");
    assert_eq!(ids(&c), vec!["1", "2", "3"]);
}

/// 存在しない自治体は空
#[test]
fn test_scenario_unknown_council() {
    let mut c = scenario_session();
    c.on_council_change("Z");
    assert!(c.filtered().is_empty());
    assert!(apply_filter(c.records().records(), "Z").is_empty());
}

/// ピン選択 → パネル表示 → 閉じる
#[test]
fn test_scenario_activate_and_dismiss() {
    let mut c = scenario_session();
    let record2 = c.records().records()[1].clone();

    c.on_marker_activate(&record2);
    assert_eq!(c.state().selected_record(), Some(&record2));
    assert!(c.state().panel_open());

    c.on_panel_dismiss();
    assert!(!c.state().panel_open());
    assert!(c.detail().is_none());
}

/// フィルタ変更はパネルに影響しない
#[test]
fn test_filter_change_keeps_panel() {
    let mut c = scenario_session();
    c.activate_by_id(&PropertyId::from("2")).expect("存在するID");
    c.on_council_change("A");
    assert!(c.panel_open());
    let detail = c.detail().expect("パネルは開いたまま");
    assert_eq!(detail.fields[0].value, "2");
}

/// 同梱データでもフィルタの分割が成り立つ
#[test]
fn test_bundled_partition() {
    let c = session::open_session(None).expect("同梱データ");
    let total: usize = c
        .council_options()
        .iter()
        .skip(1)
        .map(|o| apply_filter(c.records().records(), o.value()).len())
        .sum();
    assert_eq!(total, c.records().len());
}

//! フィルタ・選択コントローラ
//!
//! 自治体ドロップダウン・地図ピン・詳細パネルを結ぶ状態遷移。
//! 状態は `SelectionState` ひとつにまとめ、変更は次の3操作のみ:
//! - on_council_change: フィルタ値の変更
//! - on_marker_activate: ピン選択（パネルを開く）
//! - on_panel_dismiss: パネルを閉じる（選択データは保持）

use crate::error::{Error, Result};
use crate::fixture::RecordSet;
use crate::geo::LatLng;
use crate::index::CouncilIndex;
use crate::types::{PropertyId, PropertyRecord};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// 「全自治体」選択肢の表示名
pub const ALL_COUNCILS_LABEL: &str = "All Councils";

/// フィルタの選択肢
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouncilOption {
    /// フィルタなし（値は空文字）
    All,
    Council(String),
}

impl CouncilOption {
    /// フィルタ値
    pub fn value(&self) -> &str {
        match self {
            CouncilOption::All => "",
            CouncilOption::Council(name) => name,
        }
    }

    /// 表示名
    pub fn label(&self) -> &str {
        match self {
            CouncilOption::All => ALL_COUNCILS_LABEL,
            CouncilOption::Council(name) => name,
        }
    }
}

/// 自治体の選択肢を作成（先頭は All、以降は初出順・重複なし）
pub fn derive_council_options(records: &[PropertyRecord]) -> Vec<CouncilOption> {
    let mut seen = HashSet::new();
    std::iter::once(CouncilOption::All)
        .chain(records.iter().filter_map(|r| {
            if seen.insert(r.council.as_str()) {
                Some(CouncilOption::Council(r.council.clone()))
            } else {
                None
            }
        }))
        .collect()
}

/// 自治体で絞り込み（空文字なら全件、完全一致・大文字小文字区別）
pub fn apply_filter<'a>(records: &'a [PropertyRecord], selected_council: &str) -> Vec<&'a PropertyRecord> {
    records
        .iter()
        .filter(|r| selected_council.is_empty() || r.council == selected_council)
        .collect()
}

/// UIセッション1回分の選択状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    selected_council: String,
    selected_record: Option<PropertyRecord>,
    panel_open: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_council(&self) -> &str {
        &self.selected_council
    }

    /// パネルを閉じても保持される
    pub fn selected_record(&self) -> Option<&PropertyRecord> {
        self.selected_record.as_ref()
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    /// 選択・パネル状態には触れない
    pub fn on_council_change(&mut self, value: impl Into<String>) {
        self.selected_council = value.into();
    }

    pub fn on_marker_activate(&mut self, record: &PropertyRecord) {
        self.selected_record = Some(record.clone());
        self.panel_open = true;
    }

    pub fn on_panel_dismiss(&mut self) {
        self.panel_open = false;
    }
}

/// 地図ウィジェットに渡すピン情報
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerDescriptor {
    pub property_id: PropertyId,
    pub position: LatLng,
}

impl From<&PropertyRecord> for MarkerDescriptor {
    fn from(record: &PropertyRecord) -> Self {
        Self {
            property_id: record.property_id.clone(),
            position: record.position(),
        }
    }
}

/// 詳細パネルの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

/// 詳細パネルの表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub fields: Vec<DetailField>,
}

impl From<&PropertyRecord> for DetailView {
    fn from(record: &PropertyRecord) -> Self {
        let field = |label, value: String| DetailField { label, value };
        Self {
            fields: vec![
                field("Property ID", record.property_id.to_string()),
                field("Council", record.council.clone()),
                field("Address", record.full_address.clone()),
                field("Postcode", record.postcode.to_string()),
            ],
        }
    }
}

/// レコードセットと選択状態をまとめて持つコントローラ
#[derive(Debug, Clone)]
pub struct SelectionController {
    records: Arc<RecordSet>,
    index: CouncilIndex,
    state: SelectionState,
}

impl SelectionController {
    pub fn new(records: Arc<RecordSet>) -> Self {
        let index = CouncilIndex::build(records.records());
        Self {
            records,
            index,
            state: SelectionState::new(),
        }
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selected_council(&self) -> &str {
        &self.state.selected_council
    }

    pub fn panel_open(&self) -> bool {
        self.state.panel_open
    }

    pub fn council_options(&self) -> Vec<CouncilOption> {
        std::iter::once(CouncilOption::All)
            .chain(self.index.councils().iter().cloned().map(CouncilOption::Council))
            .collect()
    }

    /// 現在のフィルタで表示するレコード
    pub fn filtered(&self) -> Vec<&PropertyRecord> {
        self.index.filter(self.records.records(), &self.state.selected_council)
    }

    pub fn visible_count(&self) -> usize {
        if self.state.selected_council.is_empty() {
            self.records.len()
        } else {
            self.index.count(&self.state.selected_council)
        }
    }

    pub fn markers(&self) -> Vec<MarkerDescriptor> {
        self.filtered().into_iter().map(MarkerDescriptor::from).collect()
    }

    /// パネルに表示中のレコード（閉じているときはNone）
    pub fn detail_record(&self) -> Option<&PropertyRecord> {
        self.state
            .selected_record
            .as_ref()
            .filter(|_| self.state.panel_open)
    }

    pub fn detail(&self) -> Option<DetailView> {
        self.detail_record().map(DetailView::from)
    }

    pub fn on_council_change(&mut self, value: impl Into<String>) {
        self.state.on_council_change(value);
    }

    pub fn on_marker_activate(&mut self, record: &PropertyRecord) {
        self.state.on_marker_activate(record);
    }

    /// ピンから返されたIDで選択（フィルタ前の全件から探す）
    pub fn activate_by_id(&mut self, id: &PropertyId) -> Result<()> {
        let record = self
            .records
            .get(id)
            .ok_or_else(|| Error::UnknownProperty(id.to_string()))?;
        self.state.on_marker_activate(record);
        Ok(())
    }

    pub fn on_panel_dismiss(&mut self) {
        self.state.on_panel_dismiss();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Postcode;

    fn record(id: u32, council: &str) -> PropertyRecord {
        PropertyRecord {
            property_id: PropertyId::from(id),
            lat: -37.93 - f64::from(id) * 0.001,
            lng: 145.44 + f64::from(id) * 0.001,
            council: council.to_string(),
            full_address: format!("{} Main Street, Emerald VIC 3782", id),
            postcode: Postcode::new("3782"),
        }
    }

    fn scenario() -> Vec<PropertyRecord> {
        vec![record(1, "A"), record(2, "B"), record(3, "A")]
    }

    fn ids(records: &[&PropertyRecord]) -> Vec<String> {
        records.iter().map(|r| r.property_id.to_string()).collect()
    }

    fn controller() -> SelectionController {
        let set = RecordSet::new(scenario()).expect("有効なレコード");
        SelectionController::new(Arc::new(set))
    }

    // =============================================
    // 純粋関数
    // =============================================

    #[test]
    fn test_council_options_scenario() {
        let options = derive_council_options(&scenario());
        assert_eq!(
            options,
            vec![
                CouncilOption::All,
                CouncilOption::Council("A".to_string()),
                CouncilOption::Council("B".to_string()),
            ]
        );
        assert_eq!(options[0].value(), "");
        assert_eq!(options[0].label(), "All Councils");
        assert_eq!(options[2].label(), "B");
    }

    #[test]
    fn test_council_options_empty() {
        assert_eq!(derive_council_options(&[]), vec![CouncilOption::All]);
    }

    #[test]
    fn test_council_options_distinct_count() {
        let records = vec![record(1, "X"), record(2, "Y"), record(3, "X"), record(4, "Z"), record(5, "Y")];
        let options = derive_council_options(&records);
        assert_eq!(options.len(), 1 + 3);
        let values: Vec<&str> = options.iter().skip(1).map(|o| o.value()).collect();
        assert_eq!(values, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_apply_filter_scenario() {
        let records = scenario();
        assert_eq!(ids(&apply_filter(&records, "A")), vec!["1", "3"]);
        assert_eq!(ids(&apply_filter(&records, "B")), vec!["2"]);
    }

    #[test]
    fn test_apply_filter_empty_is_identity() {
        let records = scenario();
        let filtered = apply_filter(&records, "");
        assert_eq!(filtered.len(), records.len());
        for (a, b) in filtered.iter().zip(records.iter()) {
            assert_eq!(*a, b);
        }
    }

    #[test]
    fn test_apply_filter_unknown_council_is_empty() {
        assert!(apply_filter(&scenario(), "Z").is_empty());
    }

    #[test]
    fn test_apply_filter_is_case_sensitive() {
        assert!(apply_filter(&scenario(), "a").is_empty());
    }

    #[test]
    fn test_apply_filter_predicate_partition() {
        let set = RecordSet::bundled().expect("同梱データ");
        for option in derive_council_options(set.records()) {
            let f = option.value();
            let kept = apply_filter(set.records(), f);
            // 部分列で順序を保つ
            let mut it = set.records().iter();
            for k in &kept {
                assert!(it.any(|r| r == *k));
            }
            // 含まれる ⇔ 述語を満たす
            for r in set.records() {
                let matches = f.is_empty() || r.council == f;
                assert_eq!(kept.contains(&r), matches);
            }
        }
    }

    // =============================================
    // 状態遷移
    // =============================================

    #[test]
    fn test_initial_state() {
        let state = SelectionState::new();
        assert_eq!(state.selected_council(), "");
        assert!(state.selected_record().is_none());
        assert!(!state.panel_open());
    }

    #[test]
    fn test_council_change_does_not_touch_selection() {
        let records = scenario();
        let mut state = SelectionState::new();
        state.on_marker_activate(&records[1]);
        state.on_council_change("A");
        assert_eq!(state.selected_council(), "A");
        assert_eq!(state.selected_record(), Some(&records[1]));
        assert!(state.panel_open());
    }

    #[test]
    fn test_council_change_idempotent() {
        let mut c = controller();
        c.on_council_change("A");
        let first = c.state().clone();
        let first_ids = ids(&c.filtered());
        c.on_council_change("A");
        assert_eq!(c.state(), &first);
        assert_eq!(ids(&c.filtered()), first_ids);
    }

    #[test]
    fn test_activate_then_dismiss() {
        let records = scenario();
        let mut state = SelectionState::new();
        state.on_marker_activate(&records[1]);
        assert_eq!(state.selected_record(), Some(&records[1]));
        assert!(state.panel_open());

        state.on_panel_dismiss();
        assert!(!state.panel_open());
        // 選択データは保持する
        assert_eq!(state.selected_record(), Some(&records[1]));
    }

    // =============================================
    // コントローラ
    // =============================================

    #[test]
    fn test_controller_options_and_filter() {
        let mut c = controller();
        assert_eq!(c.council_options().len(), 3);
        assert_eq!(c.council_options(), derive_council_options(c.records().records()));
        assert_eq!(c.visible_count(), 3);

        c.on_council_change("A");
        assert_eq!(ids(&c.filtered()), vec!["1", "3"]);
        assert_eq!(c.visible_count(), 2);

        c.on_council_change("Z");
        assert!(c.filtered().is_empty());
        assert!(c.markers().is_empty());
        assert_eq!(c.visible_count(), 0);
    }

    #[test]
    fn test_controller_markers_follow_filter_order() {
        let mut c = controller();
        c.on_council_change("A");
        let markers = c.markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].property_id, PropertyId::from(1u32));
        assert_eq!(markers[1].property_id, PropertyId::from(3u32));
        assert_eq!(markers[1].position, c.records().records()[2].position());
    }

    #[test]
    fn test_marker_descriptor_json() {
        let marker = MarkerDescriptor::from(&record(7, "A"));
        let json = serde_json::to_string(&marker).expect("シリアライズ失敗");
        assert!(json.contains("\"propertyId\":\"7\""));
        assert!(json.contains("\"position\":{\"lat\":"));
    }

    #[test]
    fn test_controller_detail_gated_on_panel() {
        let mut c = controller();
        assert!(c.detail().is_none());

        c.activate_by_id(&PropertyId::from(2u32)).expect("存在するID");
        let detail = c.detail().expect("パネルが開いている");
        let labels: Vec<&str> = detail.fields.iter().map(|f| f.label).collect();
        assert_eq!(labels, vec!["Property ID", "Council", "Address", "Postcode"]);
        assert_eq!(detail.fields[0].value, "2");
        assert_eq!(detail.fields[1].value, "B");
        assert_eq!(detail.fields[3].value, "3782");

        assert_eq!(c.detail_record().map(|r| r.council.as_str()), Some("B"));

        c.on_panel_dismiss();
        assert!(!c.panel_open());
        assert!(c.detail().is_none());
        assert!(c.detail_record().is_none());
        assert!(c.state().selected_record().is_some());
    }

    #[test]
    fn test_activate_by_id_ignores_filter() {
        let mut c = controller();
        c.on_council_change("A");
        // 2番はBなのでフィルタで非表示だが選択はできる
        c.activate_by_id(&PropertyId::from(2u32)).expect("全件から検索");
        assert_eq!(
            c.state().selected_record().map(|r| r.council.as_str()),
            Some("B")
        );
        assert_eq!(c.selected_council(), "A");
    }

    #[test]
    fn test_activate_by_unknown_id() {
        let mut c = controller();
        let err = c.activate_by_id(&PropertyId::from("999")).unwrap_err();
        assert!(matches!(err, Error::UnknownProperty(ref id) if id == "999"));
        assert!(!c.panel_open());
    }

    #[test]
    fn test_reactivation_replaces_selection() {
        let mut c = controller();
        let records = c.records().records().to_vec();
        c.on_marker_activate(&records[0]);
        c.on_panel_dismiss();
        c.on_marker_activate(&records[2]);
        assert!(c.panel_open());
        assert_eq!(c.detail().expect("開いている").fields[0].value, "3");
    }
}

//! 物件レコードセット
//!
//! 起動時に一度だけ読み込み、以後は変更しない。
//! 同梱データ（data/properties.json）はバイナリに埋め込まれる。

use crate::error::{Error, Result};
use crate::types::{PropertyId, PropertyRecord};
use std::collections::HashSet;

/// 同梱の物件データ
const BUNDLED_PROPERTIES: &str = include_str!("../data/properties.json");

/// 検証済みの物件レコード列
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<PropertyRecord>,
}

impl RecordSet {
    /// IDの一意性と座標範囲を検証して作成
    pub fn new(records: Vec<PropertyRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.property_id.clone()) {
                return Err(Error::DuplicatePropertyId(record.property_id.to_string()));
            }
            if !record.position().is_valid() {
                return Err(Error::InvalidCoordinate {
                    id: record.property_id.to_string(),
                    lat: record.lat,
                    lng: record.lng,
                });
            }
        }
        Ok(Self { records })
    }

    /// JSON配列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<PropertyRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// JSONファイルから読み込み（非WASM環境のみ）
    #[cfg(not(feature = "wasm"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 同梱データを読み込み
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_PROPERTIES)
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &PropertyId) -> Option<&PropertyRecord> {
        self.records.iter().find(|r| &r.property_id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PropertyRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a PropertyRecord;
    type IntoIter = std::slice::Iter<'a, PropertyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_fixture_is_valid() {
        let set = RecordSet::bundled().expect("同梱データの検証に失敗");
        assert!(!set.is_empty());
        assert_eq!(set.len(), set.records().len());
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let json = r#"[
            {"property_id": 1, "lat": -37.9, "lng": 145.4, "council": "A", "full_address": "a", "postcode": 3782},
            {"property_id": "1", "lat": -37.8, "lng": 145.3, "council": "B", "full_address": "b", "postcode": 3782}
        ]"#;
        let err = RecordSet::from_json(json).unwrap_err();
        assert!(matches!(err, Error::DuplicatePropertyId(ref id) if id == "1"));
    }

    #[test]
    fn test_from_json_rejects_out_of_range_coordinates() {
        let json = r#"[
            {"property_id": 1, "lat": -137.9, "lng": 145.4, "council": "A", "full_address": "a", "postcode": 3782}
        ]"#;
        let err = RecordSet::from_json(json).unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_from_json_empty_array() {
        let set = RecordSet::from_json("[]").expect("空配列は有効");
        assert!(set.is_empty());
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(RecordSet::from_json("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_get_by_id() {
        let set = RecordSet::bundled().expect("同梱データ");
        let first = set.records()[0].clone();
        assert_eq!(set.get(&first.property_id), Some(&first));
        assert!(set.get(&PropertyId::from("does-not-exist")).is_none());
    }
}

//! 自治体インデックス
//!
//! 読み込み時に一度だけ「自治体名 → レコード位置」を作っておき、
//! フィルタ変更のたびに全件を走査しないようにする。

use crate::types::PropertyRecord;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouncilIndex {
    /// 初出順の自治体名
    order: Vec<String>,
    /// 自治体名 → 元の並び順でのレコード位置
    positions: HashMap<String, Vec<usize>>,
}

impl CouncilIndex {
    pub fn build(records: &[PropertyRecord]) -> Self {
        let mut index = Self::default();
        for (i, record) in records.iter().enumerate() {
            match index.positions.get_mut(&record.council) {
                Some(list) => list.push(i),
                None => {
                    index.order.push(record.council.clone());
                    index.positions.insert(record.council.clone(), vec![i]);
                }
            }
        }
        index
    }

    /// 初出順の自治体名一覧
    pub fn councils(&self) -> &[String] {
        &self.order
    }

    pub fn count(&self, council: &str) -> usize {
        self.positions.get(council).map_or(0, Vec::len)
    }

    /// `records` はインデックス作成時と同じスライスであること
    pub fn filter<'a>(&self, records: &'a [PropertyRecord], council: &str) -> Vec<&'a PropertyRecord> {
        if council.is_empty() {
            return records.iter().collect();
        }
        self.positions
            .get(council)
            .map(|list| list.iter().filter_map(|&i| records.get(i)).collect())
            .unwrap_or_default()
    }
}

//! レコードセットの読み込みとコントローラ生成

use crate::error::Result;
use property_map_common::{RecordSet, SelectionController};
use std::path::Path;
use std::sync::Arc;

/// `--data` 指定があればそのファイル、なければ同梱データ
pub fn load_records(data: Option<&Path>) -> Result<RecordSet> {
    let records = match data {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading records from file");
            RecordSet::from_file(path)?
        }
        None => RecordSet::bundled()?,
    };
    tracing::debug!(count = records.len(), "records loaded");
    Ok(records)
}

pub fn open_session(data: Option<&Path>) -> Result<SelectionController> {
    let records = load_records(data)?;
    Ok(SelectionController::new(Arc::new(records)))
}

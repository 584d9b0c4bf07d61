use anyhow::{Context, Result};
use std::path::Path;

use property_map_common::RecordSet;

pub fn load_record_set(path: &Path) -> Result<RecordSet> {
    RecordSet::from_file(path).with_context(|| format!("load {}", path.display()))
}

pub fn bundled_record_set() -> Result<RecordSet> {
    RecordSet::bundled().context("load bundled properties")
}

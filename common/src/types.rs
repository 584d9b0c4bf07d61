//! 物件レコードの型定義
//!
//! CLI・Web(WASM)・デスクトップで共有される型:
//! - PropertyId: 物件ID（JSON上は文字列・整数どちらでも可）
//! - Postcode: 郵便番号（同上）
//! - PropertyRecord: 地図上の1ピンに対応する物件データ

use crate::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON上で文字列または整数として書かれる値
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Int(i64),
}

impl From<TextOrNumber> for String {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Int(n) => n.to_string(),
        }
    }
}

/// 物件ID（レコードセット内で一意）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "TextOrNumber", into = "String")]
pub struct PropertyId(String);

impl PropertyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<TextOrNumber> for PropertyId {
    fn from(value: TextOrNumber) -> Self {
        Self(value.into())
    }
}

impl From<PropertyId> for String {
    fn from(id: PropertyId) -> Self {
        id.0
    }
}

impl From<&str> for PropertyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u32> for PropertyId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 郵便番号
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "TextOrNumber", into = "String")]
pub struct Postcode(String);

impl Postcode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<TextOrNumber> for Postcode {
    fn from(value: TextOrNumber) -> Self {
        Self(value.into())
    }
}

impl From<Postcode> for String {
    fn from(code: Postcode) -> Self {
        code.0
    }
}

impl fmt::Display for Postcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 物件レコード（読み取り専用の固定データ）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub property_id: PropertyId,
    pub lat: f64,
    pub lng: f64,
    /// 自治体名（フィルタキー、一意ではない）
    pub council: String,
    pub full_address: String,
    pub postcode: Postcode,
}

impl PropertyRecord {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

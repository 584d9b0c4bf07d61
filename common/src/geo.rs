//! 地図座標ユーティリティ
//!
//! 緯度経度と外接矩形。画面への投影は各フロントエンドの地図ウィジェットが行う。

use serde::{Deserialize, Serialize};

/// 地図の初期中心（Emerald, VIC）
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: -37.9373447811622,
    lng: 145.449895817713,
};

/// 地図の初期ズーム
pub const DEFAULT_ZOOM: u8 = 15;

/// 緯度経度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// 緯度 [-90, 90]・経度 [-180, 180] の範囲内か
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// 緯度経度の外接矩形
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// 点群から外接矩形を作る（空ならNone）
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            south: first.lat,
            west: first.lng,
            north: first.lat,
            east: first.lng,
        };
        for p in iter {
            bounds.south = bounds.south.min(p.lat);
            bounds.north = bounds.north.max(p.lat);
            bounds.west = bounds.west.min(p.lng);
            bounds.east = bounds.east.max(p.lng);
        }
        Some(bounds)
    }

    pub fn center(&self) -> LatLng {
        LatLng::new((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }

    pub fn contains(&self, p: LatLng) -> bool {
        (self.south..=self.north).contains(&p.lat) && (self.west..=self.east).contains(&p.lng)
    }
}

//! 地図上の物件ピン
//!
//! walkers の Plugin としてピンを描き、クリック・ホバー・全体表示のズームを返す。

use eframe::egui::{Color32, Painter, Pos2, Response, Stroke, Vec2};
use property_map_common::{Bounds, LatLng};
use walkers::{Plugin, Position, Projector};

pub const PIN_RADIUS: f32 = 7.0;
pub const MIN_ZOOM: f64 = 3.0;
pub const MAX_ZOOM: f64 = 19.0;

const PIN_COLOR: Color32 = Color32::from_rgb(234, 67, 53);
const PIN_SELECTED_COLOR: Color32 = Color32::from_rgb(246, 196, 69);

/// 全体表示で地図端に残す余白(px)
const FIT_MARGIN: f32 = 48.0;

pub fn to_position(p: LatLng) -> Position {
    Position::from_lon_lat(p.lng, p.lat)
}

/// 1フレーム分のピン操作結果
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PinEvents {
    pub hovered: Option<usize>,
    pub clicked: Option<usize>,
    /// 全体表示に必要なズームの増減
    pub fit_zoom_delta: Option<f64>,
}

pub struct PinLayer<'a> {
    pins: Vec<(Position, bool)>,
    fit: Option<(Position, Position)>,
    events: &'a mut PinEvents,
}

impl<'a> PinLayer<'a> {
    /// `selected` が true のピンは強調表示
    pub fn new(pins: impl IntoIterator<Item = (LatLng, bool)>, events: &'a mut PinEvents) -> Self {
        Self {
            pins: pins.into_iter().map(|(p, selected)| (to_position(p), selected)).collect(),
            fit: None,
            events,
        }
    }

    /// 外接矩形の北西・南東端を画面に収めるズームを求める
    pub fn fit_to(mut self, bounds: Option<Bounds>) -> Self {
        self.fit = bounds.map(|b| {
            (
                to_position(LatLng::new(b.north, b.west)),
                to_position(LatLng::new(b.south, b.east)),
            )
        });
        self
    }
}

impl Plugin for PinLayer<'_> {
    fn run(&mut self, response: &Response, painter: Painter, projector: &Projector) {
        let screen: Vec<Pos2> = self
            .pins
            .iter()
            .map(|(p, _)| projector.project(*p).to_pos2())
            .collect();

        let viewport = response.rect;
        for (center, (_, selected)) in screen.iter().zip(&self.pins) {
            if !viewport.expand(PIN_RADIUS).contains(*center) {
                continue;
            }
            let fill = if *selected { PIN_SELECTED_COLOR } else { PIN_COLOR };
            painter.circle(*center, PIN_RADIUS, fill, Stroke::new(1.5, Color32::WHITE));
        }

        let radius = PIN_RADIUS + 2.0;
        self.events.hovered = response
            .hover_pos()
            .and_then(|pointer| nearest_pin(&screen, pointer, radius));
        if response.clicked() {
            self.events.clicked = response
                .interact_pointer_pos()
                .and_then(|pointer| nearest_pin(&screen, pointer, radius));
        }

        if let Some((north_west, south_east)) = self.fit {
            let span = projector.project(south_east) - projector.project(north_west);
            self.events.fit_zoom_delta = Some(fit_zoom_delta(span, viewport.size()));
        }
    }
}

/// `radius` 以内で最も近いピンの番号
pub fn nearest_pin(screen: &[Pos2], pointer: Pos2, radius: f32) -> Option<usize> {
    screen
        .iter()
        .enumerate()
        .map(|(i, p)| (i, p.distance(pointer)))
        .filter(|(_, d)| *d <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// 現在のズームで `span` px の範囲を `viewport` に収めるためのズーム増減
///
/// ズームが1段上がると画面上の距離は2倍になる。幅・高さが0なら上限まで寄せる。
pub fn fit_zoom_delta(span: Vec2, viewport: Vec2) -> f64 {
    let avail_x = f64::from((viewport.x - FIT_MARGIN).max(1.0));
    let avail_y = f64::from((viewport.y - FIT_MARGIN).max(1.0));
    let ratio_x = avail_x / f64::from(span.x.abs());
    let ratio_y = avail_y / f64::from(span.y.abs());
    let ratio = ratio_x.min(ratio_y);
    if ratio.is_finite() { ratio.log2().floor() } else { MAX_ZOOM }
}

/// 全体表示後のズーム
pub fn fitted_zoom(current: f64, delta: f64) -> f64 {
    (current + delta).clamp(MIN_ZOOM, MAX_ZOOM)
}

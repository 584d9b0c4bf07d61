use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, FontId, RichText};
use walkers::sources::OpenStreetMap;
use walkers::{HttpTiles, Map, MapMemory};

use crate::io::{bundled_record_set, load_record_set};
use crate::pins::{PinEvents, PinLayer, fitted_zoom, to_position};
use property_map_common::{Bounds, DEFAULT_CENTER, DEFAULT_ZOOM, PropertyRecord, RecordSet, SelectionController};

const DRAWER_WIDTH: f32 = 250.0;

pub struct DesktopApp {
    controller: SelectionController,
    tiles: HttpTiles,
    map_memory: MapMemory,
    status: String,
    source_path: Option<PathBuf>,
    fit_pending: bool,
}

impl DesktopApp {
    pub fn new(records: RecordSet, ctx: &egui::Context) -> Self {
        let mut map_memory = MapMemory::default();
        if map_memory.set_zoom(f64::from(DEFAULT_ZOOM)).is_err() {
            tracing::warn!(zoom = DEFAULT_ZOOM, "zoom out of range");
        }

        Self {
            controller: SelectionController::new(Arc::new(records)),
            tiles: HttpTiles::new(OpenStreetMap, ctx.clone()),
            map_memory,
            status: String::new(),
            source_path: None,
            fit_pending: false,
        }
    }

    fn open_json(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            match load_record_set(&path) {
                Ok(records) => {
                    self.status = format!("Loaded {} ({} properties)", path.display(), records.len());
                    self.replace_records(records);
                    self.source_path = Some(path);
                }
                Err(err) => {
                    tracing::warn!("{err:#}");
                    self.status = format!("Load failed: {err:#}");
                }
            }
        }
    }

    fn load_bundled(&mut self) {
        match bundled_record_set() {
            Ok(records) => {
                self.status = format!("Loaded bundled data ({} properties)", records.len());
                self.replace_records(records);
                self.source_path = None;
            }
            Err(err) => self.status = format!("Load failed: {err:#}"),
        }
    }

    /// 新しいレコードセットでは選択状態を作り直す
    fn replace_records(&mut self, records: RecordSet) {
        self.controller = SelectionController::new(Arc::new(records));
        self.fit_pending = true;
    }

    fn render_filter(&mut self, ui: &mut egui::Ui) {
        let options = self.controller.council_options();
        let mut selected = self.controller.selected_council().to_string();
        let selected_label = options
            .iter()
            .find(|o| o.value() == selected)
            .map(|o| o.label().to_string())
            .unwrap_or_else(|| selected.clone());

        egui::ComboBox::from_label("Council")
            .width(200.0)
            .selected_text(selected_label)
            .show_ui(ui, |ui| {
                for option in &options {
                    ui.selectable_value(&mut selected, option.value().to_string(), option.label());
                }
            });

        if selected != self.controller.selected_council() {
            tracing::debug!(council = %selected, "council changed");
            self.controller.on_council_change(selected);
        }
    }

    fn render_map(&mut self, ui: &mut egui::Ui) {
        let pins: Vec<PropertyRecord> = self.controller.filtered().into_iter().cloned().collect();

        // パネル表示中の物件だけ強調
        let selected_id = self
            .controller
            .detail_record()
            .map(|r| r.property_id.clone());
        let layer_pins = pins
            .iter()
            .map(|r| (r.position(), selected_id.as_ref() == Some(&r.property_id)));

        let fit = if self.fit_pending {
            Bounds::from_points(pins.iter().map(PropertyRecord::position))
        } else {
            None
        };

        let mut events = PinEvents::default();
        let map_rect = ui.available_rect_before_wrap();
        let response = ui.add(
            Map::new(Some(&mut self.tiles), &mut self.map_memory, to_position(DEFAULT_CENTER))
                .with_plugin(PinLayer::new(layer_pins, &mut events).fit_to(fit)),
        );

        if let Some(bounds) = fit {
            if let Some(delta) = events.fit_zoom_delta {
                let zoom = fitted_zoom(self.map_memory.zoom(), delta);
                if self.map_memory.set_zoom(zoom).is_err() {
                    tracing::warn!(zoom, "zoom out of range");
                }
                self.map_memory.center_at(to_position(bounds.center()));
                ui.ctx().request_repaint();
            }
            self.fit_pending = false;
        }

        if let Some(index) = events.clicked {
            tracing::debug!(property_id = %pins[index].property_id, "marker activated");
            self.controller.on_marker_activate(&pins[index]);
        }

        ui.painter().text(
            map_rect.left_bottom() + egui::vec2(8.0, -8.0),
            Align2::LEFT_BOTTOM,
            format!("{} properties  |  zoom {:.1}", pins.len(), self.map_memory.zoom()),
            FontId::proportional(12.0),
            Color32::from_gray(60),
        );
        ui.painter().text(
            map_rect.right_bottom() - egui::vec2(5.0, 5.0),
            Align2::RIGHT_BOTTOM,
            "© OpenStreetMap contributors",
            FontId::proportional(10.0),
            Color32::from_black_alpha(150),
        );

        if let Some(index) = events.hovered {
            response.on_hover_text_at_pointer(pins[index].full_address.clone());
        }
    }

    fn render_drawer(&mut self, ctx: &egui::Context) {
        let Some(detail) = self.controller.detail() else {
            return;
        };

        let mut close = false;
        egui::SidePanel::right("detail")
            .exact_width(DRAWER_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    if ui.button("✕").on_hover_text("Close").clicked() {
                        close = true;
                    }
                });
                ui.separator();
                egui::Grid::new("detail_grid")
                    .num_columns(2)
                    .spacing([8.0, 8.0])
                    .show(ui, |ui| {
                        for field in &detail.fields {
                            ui.label(RichText::new(format!("{}:", field.label)).color(Color32::from_gray(120)));
                            ui.label(field.value.as_str());
                            ui.end_row();
                        }
                    });
            });

        if close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.on_panel_dismiss();
            tracing::debug!("panel dismissed");
        }
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open JSON").clicked() {
                        self.open_json();
                        ui.close_menu();
                    }
                    if ui.button("Load Bundled Data").clicked() {
                        self.load_bundled();
                        ui.close_menu();
                    }
                });
                ui.separator();
                self.render_filter(ui);
                if ui.button("Fit Pins").clicked() {
                    self.fit_pending = true;
                }
                ui.separator();
                if let Some(path) = &self.source_path {
                    ui.label(RichText::new(path.display().to_string()).color(Color32::from_gray(150)));
                }
                if !self.status.is_empty() {
                    ui.label(RichText::new(&self.status).color(Color32::from_gray(170)));
                }
            });
        });

        self.render_drawer(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.render_map(ui);
            });
    }
}

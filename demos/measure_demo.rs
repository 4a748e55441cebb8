//! Interactive measurement demo
//!
//! Click to add vertices, double-click to finish a shape. Distance and area
//! labels update live while drawing and stay on the map once a shape is
//! committed.

use eframe::egui;
use tapeline::{DrawKind, LatLng, Map, MapWidget, Point};

struct MeasureDemo {
    map: Map,
}

impl MeasureDemo {
    fn new() -> Self {
        Self {
            map: Map::new(
                LatLng::new(32.81890764151014, -96.6345990807462),
                9.0,
                Point::new(1024.0, 768.0),
            ),
        }
    }
}

impl eframe::App for MeasureDemo {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let tool = self.map.active_tool();
                if ui
                    .selectable_label(tool == Some(DrawKind::Line), "Measure distance")
                    .clicked()
                {
                    self.map.start_measure(DrawKind::Line);
                }
                if ui
                    .selectable_label(tool == Some(DrawKind::Polygon), "Measure area")
                    .clicked()
                {
                    self.map.start_measure(DrawKind::Polygon);
                }
                if ui.button("Clear").clicked() {
                    self.map.clear();
                }
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                ui.add(MapWidget::new(&mut self.map));
            });

        // tiles arrive on a background thread
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 768.0]),
        ..Default::default()
    };
    eframe::run_native(
        "tapeline measure demo",
        options,
        Box::new(|_cc| Box::new(MeasureDemo::new())),
    )
}

//! Immediate-mode egui widget around [`Map`]
//!
//! Translates egui pointer input into [`InputEvent`]s, pumps the tile layer,
//! and paints tiles, committed features, the in-progress sketch, and the
//! measurement labels every frame.

use crate::{
    core::{
        geo::{Point, TileCoord},
        map::Map,
    },
    input::events::{InputEvent, MouseButton},
    interactions::draw::DrawKind,
    layers::vector::LineStyle,
    ui::label::{LabelAnchor, MeasureLabel},
};
use egui::{Color32, FontId, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Vec2, Widget};

const TILE_PLACEHOLDER: Color32 = Color32::from_gray(230);
const PREVIEW_DASH: f32 = 8.0;
const PREVIEW_GAP: f32 = 4.0;

/// Renders a [`Map`] into the available space and feeds input back into it
pub struct MapWidget<'a> {
    map: &'a mut Map,
}

impl<'a> MapWidget<'a> {
    pub fn new(map: &'a mut Map) -> Self {
        Self { map }
    }
}

impl Widget for MapWidget<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let size = ui.available_size();
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        let map = self.map;

        let widget_size = Point::new(rect.width() as f64, rect.height() as f64);
        if map.viewport.size != widget_size {
            let _ = map.handle_input(&InputEvent::Resize { size: widget_size });
        }

        let to_local =
            |pos: Pos2| Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);
        let to_screen = |p: Point| Pos2::new(rect.min.x + p.x as f32, rect.min.y + p.y as f32);

        // default interactions: drag pans, scroll zooms around the pointer
        let drag_delta = response.drag_delta();
        if drag_delta.length_sq() > 0.5 {
            let _ = map.handle_input(&InputEvent::Drag {
                delta: Point::new(drag_delta.x as f64, drag_delta.y as f64),
            });
        }
        if let Some(hover) = response.hover_pos() {
            let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);
            if scroll_delta.abs() > 0.1 {
                let _ = map.handle_input(&InputEvent::Scroll {
                    delta: scroll_delta as f64,
                    position: to_local(hover),
                });
            }

            let _ = map.handle_input(&InputEvent::MouseMove {
                position: to_local(hover),
            });
        }

        // a double click arrives as click-then-double-click; the draw
        // interaction deduplicates the trailing vertex
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let _ = map.handle_input(&InputEvent::Click {
                    position: to_local(pos),
                    button: MouseButton::Left,
                });
            }
        }
        if response.double_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let _ = map.handle_input(&InputEvent::DoubleClick {
                    position: to_local(pos),
                });
            }
        }

        map.update();

        let painter = ui.painter_at(rect);
        let ctx = ui.ctx().clone();

        // base tiles
        let visible = map.tile_layer().visible_tiles(&map.viewport);
        for coord in visible {
            let nw = map.viewport.lat_lng_to_pixel(&coord.to_lat_lng());
            let se_coord = TileCoord::new(coord.x + 1, coord.y + 1, coord.z);
            let se = map.viewport.lat_lng_to_pixel(&se_coord.to_lat_lng());
            let tile_rect = Rect::from_two_pos(to_screen(nw), to_screen(se));

            match map.tile_layer_mut().texture(&ctx, &coord) {
                Some(texture) => {
                    painter.image(
                        texture.id(),
                        tile_rect,
                        Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
                None => {
                    painter.rect_filled(tile_rect, 0.0, TILE_PLACEHOLDER);
                }
            }
        }

        // committed measurements
        let stroke = stroke_of(map.feature_layer().stroke());
        let committed: Vec<(Vec<Pos2>, bool)> = map
            .feature_layer()
            .iter()
            .map(|feature| {
                let points: Vec<Pos2> = feature
                    .sketch
                    .vertices()
                    .iter()
                    .map(|v| to_screen(map.viewport.lat_lng_to_pixel(v)))
                    .collect();
                (points, feature.sketch.is_ring())
            })
            .collect();
        for (mut points, is_ring) in committed {
            if is_ring {
                if let Some(first) = points.first().copied() {
                    points.push(first);
                }
            }
            if points.len() >= 2 {
                painter.add(Shape::line(points, stroke));
            }
        }

        // in-progress sketch, dashed
        if let Some(session) = map.interaction().and_then(|i| i.session()) {
            let mut points: Vec<Pos2> = session
                .vertices()
                .iter()
                .map(|v| to_screen(map.viewport.lat_lng_to_pixel(v)))
                .collect();
            if session.kind() == DrawKind::Polygon {
                if let Some(first) = points.first().copied() {
                    points.push(first);
                }
            }
            if points.len() >= 2 {
                painter.extend(Shape::dashed_line(
                    &points,
                    stroke,
                    PREVIEW_DASH,
                    PREVIEW_GAP,
                ));
            }
        }

        // measurement labels
        for label in map.labels().values() {
            if label.is_hidden() || label.text.is_empty() {
                continue;
            }
            let anchor = to_screen(map.viewport.lat_lng_to_pixel(&label.position));
            paint_label(&painter, anchor, label);
        }

        // attribution
        painter.text(
            rect.right_bottom() - Vec2::new(4.0, 2.0),
            egui::Align2::RIGHT_BOTTOM,
            map.tile_layer().source().attribution(),
            FontId::proportional(10.0),
            Color32::from_gray(90),
        );

        response
    }
}

fn stroke_of(style: &LineStyle) -> Stroke {
    Stroke::new(style.width, Color32::from(style.color))
}

fn paint_label(painter: &egui::Painter, anchor: Pos2, label: &MeasureLabel) {
    let style = &label.style;
    let pos = anchor + Vec2::new(style.offset.x as f32, style.offset.y as f32);

    let galley = painter.layout_no_wrap(
        label.text.clone(),
        FontId::proportional(style.font_size),
        Color32::from(style.text_color),
    );
    let box_size = galley.size() + Vec2::splat(style.padding * 2.0);

    let box_rect = match style.anchor {
        LabelAnchor::BottomCenter => {
            Rect::from_min_size(pos - Vec2::new(box_size.x / 2.0, box_size.y), box_size)
        }
        LabelAnchor::Center => Rect::from_center_size(pos, box_size),
        LabelAnchor::TopLeft => Rect::from_min_size(pos, box_size),
    };

    painter.rect_filled(box_rect, 3.0, Color32::from(style.background));
    painter.rect_stroke(box_rect, 3.0, Stroke::new(1.0, Color32::from(style.border)));
    painter.galley(
        box_rect.min + Vec2::splat(style.padding),
        galley,
        Color32::from(style.text_color),
    );
}

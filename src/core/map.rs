use crate::{
    core::{
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    input::events::InputEvent,
    interactions::draw::{DrawInteraction, DrawKind},
    layers::{
        tile::{TileLayer, TileSource},
        vector::FeatureLayer,
    },
    ui::label::LabelManager,
    Result,
};

/// The map host: one viewport over a base tile layer, a feature layer of
/// committed measurements, the measurement labels, and at most one draw
/// interaction.
///
/// Drag-to-pan and scroll-to-zoom are the default interactions; they are
/// handled here directly, stay active while drawing, and survive [`Map::clear`].
pub struct Map {
    pub viewport: Viewport,
    tile_layer: TileLayer,
    feature_layer: FeatureLayer,
    labels: LabelManager,
    interaction: Option<DrawInteraction>,
}

impl Map {
    /// Creates a map at the given center and zoom with an OSM base layer
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            viewport: Viewport::new(center, zoom, size),
            tile_layer: TileLayer::new(TileSource::osm()),
            feature_layer: FeatureLayer::new("measurements"),
            labels: LabelManager::new(),
            interaction: None,
        }
    }

    pub fn tile_layer(&self) -> &TileLayer {
        &self.tile_layer
    }

    pub fn tile_layer_mut(&mut self) -> &mut TileLayer {
        &mut self.tile_layer
    }

    pub fn feature_layer(&self) -> &FeatureLayer {
        &self.feature_layer
    }

    pub fn labels(&self) -> &LabelManager {
        &self.labels
    }

    /// The active draw interaction, if any
    pub fn interaction(&self) -> Option<&DrawInteraction> {
        self.interaction.as_ref()
    }

    /// The kind of measurement currently armed
    pub fn active_tool(&self) -> Option<DrawKind> {
        self.interaction.as_ref().map(|i| i.kind())
    }

    /// Arms a measurement tool, tearing down any previous draw interaction
    /// first so only one shape can be in progress at a time.
    pub fn start_measure(&mut self, kind: DrawKind) {
        if self.interaction.is_some() {
            log::debug!("replacing active draw interaction");
        }
        self.interaction = Some(DrawInteraction::new(kind));
    }

    /// Routes an input event: pan/zoom are handled by the viewport, pointer
    /// events go to the draw interaction when one is armed.
    pub fn handle_input(&mut self, event: &InputEvent) -> Result<()> {
        match event {
            InputEvent::Drag { delta } => {
                self.viewport.pan(*delta);
                return Ok(());
            }
            InputEvent::Scroll { delta, position } => {
                let zoom = self.viewport.zoom + delta.signum();
                self.viewport.zoom_to(zoom, Some(*position));
                return Ok(());
            }
            InputEvent::Resize { size } => {
                self.viewport.set_size(*size);
                return Ok(());
            }
            _ => {}
        }

        if let Some(mut interaction) = self.interaction.take() {
            interaction.handle_event(
                event,
                &self.viewport,
                &mut self.labels,
                &mut self.feature_layer,
            )?;
            self.interaction = Some(interaction);
        }
        Ok(())
    }

    /// Removes the non-default interaction, empties the feature layer, and
    /// discards all labels. Idempotent.
    pub fn clear(&mut self) {
        self.interaction = None;
        self.feature_layer.clear();
        self.labels.clear();
    }

    /// Pumps completed tile fetches and requests tiles for the current view
    pub fn update(&mut self) {
        self.tile_layer.pump();
        self.tile_layer.request_visible(&self.viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::MouseButton;

    fn map() -> Map {
        Map::new(LatLng::new(0.0, 0.0), 12.0, Point::new(800.0, 600.0))
    }

    fn click_at(map: &mut Map, lat: f64, lng: f64) {
        let position = map.viewport.lat_lng_to_pixel(&LatLng::new(lat, lng));
        map.handle_input(&InputEvent::Click {
            position,
            button: MouseButton::Left,
        })
        .unwrap();
    }

    fn hover_at(map: &mut Map, lat: f64, lng: f64) {
        let position = map.viewport.lat_lng_to_pixel(&LatLng::new(lat, lng));
        map.handle_input(&InputEvent::MouseMove { position }).unwrap();
    }

    fn finish_at(map: &mut Map, lat: f64, lng: f64) {
        let position = map.viewport.lat_lng_to_pixel(&LatLng::new(lat, lng));
        map.handle_input(&InputEvent::DoubleClick { position })
            .unwrap();
    }

    #[test]
    fn test_map_creation() {
        let map = map();
        assert!(map.interaction().is_none());
        assert!(map.feature_layer().is_empty());
        assert!(map.labels().is_empty());
    }

    #[test]
    fn test_clicks_without_tool_do_nothing() {
        let mut map = map();
        click_at(&mut map, 0.0, 0.0);
        assert!(map.labels().is_empty());
        assert!(map.feature_layer().is_empty());
    }

    #[test]
    fn test_switching_tools_replaces_interaction() {
        let mut map = map();
        map.start_measure(DrawKind::Line);
        click_at(&mut map, 0.0, 0.0);
        assert!(map.interaction().unwrap().is_drawing());

        // switching tools tears the old session down
        map.start_measure(DrawKind::Polygon);
        assert_eq!(map.active_tool(), Some(DrawKind::Polygon));
        assert!(!map.interaction().unwrap().is_drawing());
    }

    #[test]
    fn test_new_session_keeps_committed_shapes_and_labels() {
        let mut map = map();
        map.start_measure(DrawKind::Line);
        click_at(&mut map, 0.0, 0.0);
        hover_at(&mut map, 0.0, 0.02);
        click_at(&mut map, 0.0, 0.02);
        finish_at(&mut map, 0.0, 0.02);

        assert_eq!(map.feature_layer().len(), 1);
        let labels_after_first = map.labels().len();
        assert!(labels_after_first > 0);

        // a second measurement leaves the first annotation untouched
        map.start_measure(DrawKind::Line);
        click_at(&mut map, 0.01, 0.0);
        hover_at(&mut map, 0.01, 0.02);

        assert_eq!(map.feature_layer().len(), 1);
        assert!(map.labels().len() > labels_after_first);
    }

    #[test]
    fn test_clear_resets_everything_but_viewport() {
        let mut map = map();
        map.start_measure(DrawKind::Line);
        click_at(&mut map, 0.0, 0.0);
        hover_at(&mut map, 0.0, 0.02);
        click_at(&mut map, 0.0, 0.02);
        finish_at(&mut map, 0.0, 0.02);

        let center_before = map.viewport.center;
        map.clear();

        assert!(map.interaction().is_none());
        assert!(map.feature_layer().is_empty());
        assert!(map.labels().is_empty());
        assert_eq!(map.viewport.center, center_before);

        map.clear();
        assert!(map.feature_layer().is_empty());
    }

    #[test]
    fn test_pan_and_zoom_work_while_drawing() {
        let mut map = map();
        map.start_measure(DrawKind::Line);
        click_at(&mut map, 0.0, 0.0);

        let center_before = map.viewport.center;
        map.handle_input(&InputEvent::Drag {
            delta: Point::new(20.0, 0.0),
        })
        .unwrap();
        assert_ne!(map.viewport.center, center_before);

        let zoom_before = map.viewport.zoom;
        map.handle_input(&InputEvent::Scroll {
            delta: 1.0,
            position: Point::new(400.0, 300.0),
        })
        .unwrap();
        assert!(map.viewport.zoom > zoom_before);

        // the session survives default-interaction use
        assert!(map.interaction().unwrap().is_drawing());
    }
}

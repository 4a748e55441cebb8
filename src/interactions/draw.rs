//! Pointer-driven measurement drawing
//!
//! [`DrawInteraction`] turns pointer events into an in-progress sketch and
//! keeps the measurement labels in sync on every geometry change: a
//! per-segment label at the midpoint of the segment being drawn, a
//! running-total (line) or area (polygon) label, and for polygons a closing
//! segment label.
//!
//! "Not drawing" is a represented state: the session is an `Option`, and
//! label updates without a session are no-ops.

use crate::{
    core::{geo::LatLng, viewport::Viewport},
    geometry::{self, Sketch},
    input::events::InputEvent,
    layers::vector::FeatureLayer,
    measure::{format_area, format_distance, truncates_to_zero},
    ui::label::{LabelId, LabelManager},
    Result,
};

/// The shape kind being measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    /// Distance measurement along an open path
    Line,
    /// Area measurement over a polygon boundary
    Polygon,
}

/// Transient state for one shape being drawn.
///
/// The vertex list is open (rings never repeat their first vertex) and its
/// last element tracks the cursor until the next click commits it.
pub struct DrawSession {
    kind: DrawKind,
    vertices: Vec<LatLng>,
    coords_seen: usize,
    segment_label: Option<LabelId>,
    total_label: LabelId,
    closing_label: Option<LabelId>,
}

impl DrawSession {
    fn start(kind: DrawKind, anchor: LatLng, labels: &mut LabelManager) -> Self {
        let total_label = labels.allocate();
        let closing_label = match kind {
            DrawKind::Polygon => Some(labels.allocate()),
            DrawKind::Line => None,
        };

        Self {
            kind,
            // anchor plus the cursor vertex that follows the pointer
            vertices: vec![anchor, anchor],
            coords_seen: 0,
            segment_label: None,
            total_label,
            closing_label,
        }
    }

    pub fn kind(&self) -> DrawKind {
        self.kind
    }

    /// The open vertex list, cursor vertex included
    pub fn vertices(&self) -> &[LatLng] {
        &self.vertices
    }

    pub fn segment_label(&self) -> Option<&LabelId> {
        self.segment_label.as_ref()
    }

    pub fn total_label(&self) -> &LabelId {
        &self.total_label
    }

    pub fn closing_label(&self) -> Option<&LabelId> {
        self.closing_label.as_ref()
    }
}

/// Attaches to pointer input and drives one measurement sketch at a time
pub struct DrawInteraction {
    kind: DrawKind,
    session: Option<DrawSession>,
}

impl DrawInteraction {
    pub fn new(kind: DrawKind) -> Self {
        Self {
            kind,
            session: None,
        }
    }

    pub fn kind(&self) -> DrawKind {
        self.kind
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DrawSession> {
        self.session.as_ref()
    }

    /// Dispatch a pointer event against the in-progress sketch
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        viewport: &Viewport,
        labels: &mut LabelManager,
        features: &mut FeatureLayer,
    ) -> Result<()> {
        match event {
            InputEvent::Click { position, .. } => {
                let vertex = viewport.pixel_to_lat_lng(position);
                self.place_vertex(vertex, labels);
            }
            InputEvent::MouseMove { position } => {
                let cursor = viewport.pixel_to_lat_lng(position);
                self.drag_cursor(cursor, labels);
            }
            InputEvent::DoubleClick { position } => {
                let vertex = viewport.pixel_to_lat_lng(position);
                self.finish(vertex, features);
            }
            _ => {}
        }
        Ok(())
    }

    /// Commit the cursor vertex and start a new one (draw-start on the first
    /// click of a session).
    fn place_vertex(&mut self, vertex: LatLng, labels: &mut LabelManager) {
        match &mut self.session {
            None => {
                log::debug!("draw start: {:?} at {:?}", self.kind, vertex);
                self.session = Some(DrawSession::start(self.kind, vertex, labels));
            }
            Some(session) => {
                if let Some(cursor) = session.vertices.last_mut() {
                    *cursor = vertex;
                }
                session.vertices.push(vertex);
            }
        }
        if let Some(session) = &mut self.session {
            update_measurements(session, labels);
        }
    }

    /// Move the cursor vertex; no-op outside a session
    fn drag_cursor(&mut self, cursor: LatLng, labels: &mut LabelManager) {
        if let Some(session) = &mut self.session {
            if let Some(last) = session.vertices.last_mut() {
                *last = cursor;
            }
            update_measurements(session, labels);
        }
    }

    /// Commit the finished sketch to the feature layer. Labels stay on the
    /// map as a permanent annotation of the shape.
    fn finish(&mut self, vertex: LatLng, features: &mut FeatureLayer) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        if let Some(cursor) = session.vertices.last_mut() {
            *cursor = vertex;
        }
        // the finishing double click lands on the last committed vertex
        let n = session.vertices.len();
        if n >= 2 && session.vertices[n - 1] == session.vertices[n - 2] {
            session.vertices.pop();
        }

        let min_vertices = match session.kind {
            DrawKind::Line => 2,
            DrawKind::Polygon => 3,
        };
        if session.vertices.len() < min_vertices {
            log::debug!("draw end: degenerate {:?} discarded", session.kind);
            return;
        }

        let sketch = match session.kind {
            DrawKind::Line => Sketch::LineString(session.vertices),
            DrawKind::Polygon => Sketch::Ring(session.vertices),
        };
        let id = features.add(sketch);
        log::debug!("draw end: committed {id}");
    }
}

/// The measurement-overlay update: runs on every vertex add or cursor move.
fn update_measurements(session: &mut DrawSession, labels: &mut LabelManager) {
    let n = session.vertices.len();
    if n < 2 {
        return;
    }

    // a grown vertex list means a new segment has started
    if n > session.coords_seen {
        session.segment_label = Some(labels.allocate());
    }
    session.coords_seen = n;

    let (a, b) = (session.vertices[n - 2], session.vertices[n - 1]);
    if let Some(segment_label) = session.segment_label.as_deref() {
        place_distance(
            labels,
            segment_label,
            geometry::segment_midpoint(&a, &b),
            geometry::segment_meters(&a, &b),
        );
    }

    match session.kind {
        DrawKind::Line => {
            // only show a total once a second segment truly exists
            if n > 2 {
                let total = geometry::path_meters(&session.vertices);
                let first =
                    geometry::segment_meters(&session.vertices[0], &session.vertices[1]);
                if total > first {
                    place_distance(labels, &session.total_label, b, total);
                }
            }
        }
        DrawKind::Polygon => {
            if n >= 3 {
                place_area(
                    labels,
                    &session.total_label,
                    geometry::ring_interior_point(&session.vertices),
                    geometry::ring_area_sq_meters(&session.vertices),
                );

                let (last, first) = (session.vertices[n - 1], session.vertices[0]);
                if let Some(closing_label) = session.closing_label.as_deref() {
                    place_distance(
                        labels,
                        closing_label,
                        geometry::segment_midpoint(&last, &first),
                        geometry::segment_meters(&last, &first),
                    );
                }
            }
        }
    }
}

fn place_distance(labels: &mut LabelManager, id: &str, anchor: LatLng, meters: f64) {
    if truncates_to_zero(meters) {
        labels.hide(id);
    } else {
        labels.set_position(id, anchor);
        labels.set_text(id, format_distance(meters));
    }
}

fn place_area(labels: &mut LabelManager, id: &str, anchor: LatLng, sq_meters: f64) {
    if truncates_to_zero(sq_meters) {
        labels.hide(id);
    } else {
        labels.set_position(id, anchor);
        labels.set_text(id, format_area(sq_meters));
    }
}

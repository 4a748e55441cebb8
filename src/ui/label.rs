//! Floating measurement labels
//!
//! A [`MeasureLabel`] is a `(position, text)` pair anchored to a geographic
//! coordinate, drawn as a small tooltip box over the map. Labels are hidden
//! by moving them to [`LabelManager::SENTINEL`] rather than destroying them,
//! so a measurement slot can be re-shown on the next geometry change.

use crate::core::geo::{LatLng, Point};
use crate::layers::vector::Rgba;
use crate::prelude::HashMap;
use serde::{Deserialize, Serialize};

/// Identifier for one measurement label slot
pub type LabelId = String;

/// Where the label box sits relative to its anchored screen position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LabelAnchor {
    BottomCenter,
    Center,
    TopLeft,
}

/// Explicit anchoring and paint configuration for a label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    /// Screen-space offset from the anchored position, in pixels
    pub offset: Point,
    /// Placement of the box relative to the anchored position
    pub anchor: LabelAnchor,
    pub background: Rgba,
    pub border: Rgba,
    pub text_color: Rgba,
    pub font_size: f32,
    pub padding: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            offset: Point::new(0.0, -15.0),
            anchor: LabelAnchor::BottomCenter,
            background: Rgba::new(255, 255, 255, 230),
            border: Rgba::rgb(120, 120, 120),
            text_color: Rgba::rgb(0, 0, 0),
            font_size: 12.0,
            padding: 4.0,
        }
    }
}

/// One measurement label anchored to a geographic coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureLabel {
    pub id: LabelId,
    pub position: LatLng,
    pub text: String,
    pub style: LabelStyle,
}

impl MeasureLabel {
    pub fn new(id: LabelId, style: LabelStyle) -> Self {
        Self {
            id,
            position: LabelManager::SENTINEL,
            text: String::new(),
            style,
        }
    }

    pub fn set_position(&mut self, position: LatLng) {
        self.position = position;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Move the label to the sentinel coordinate without destroying it
    pub fn hide(&mut self) {
        self.position = LabelManager::SENTINEL;
    }

    pub fn is_hidden(&self) -> bool {
        self.position == LabelManager::SENTINEL
    }
}

/// Allocates and addresses the measurement label slots of one map
pub struct LabelManager {
    labels: HashMap<LabelId, MeasureLabel>,
    counter: usize,
}

impl LabelManager {
    /// Labels parked here are not rendered
    pub const SENTINEL: LatLng = LatLng { lat: 0.0, lng: 0.0 };

    pub fn new() -> Self {
        Self {
            labels: HashMap::default(),
            counter: 0,
        }
    }

    /// Allocate a fresh, hidden label slot
    pub fn allocate(&mut self) -> LabelId {
        self.allocate_with_style(LabelStyle::default())
    }

    pub fn allocate_with_style(&mut self, style: LabelStyle) -> LabelId {
        let id = format!("label_{}", self.counter);
        self.counter += 1;
        self.labels.insert(id.clone(), MeasureLabel::new(id.clone(), style));
        id
    }

    /// Reposition a label. Unknown ids are ignored.
    pub fn set_position(&mut self, id: &str, position: LatLng) {
        if let Some(label) = self.labels.get_mut(id) {
            label.set_position(position);
        }
    }

    /// Replace a label's text. Unknown ids are ignored.
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) {
        if let Some(label) = self.labels.get_mut(id) {
            label.set_text(text);
        }
    }

    /// Park a label at the sentinel coordinate. Unknown ids are ignored.
    pub fn hide(&mut self, id: &str) {
        if let Some(label) = self.labels.get_mut(id) {
            label.hide();
        }
    }

    pub fn get(&self, id: &str) -> Option<&MeasureLabel> {
        self.labels.get(id)
    }

    pub fn values(&self) -> impl Iterator<Item = &MeasureLabel> {
        self.labels.values()
    }

    /// Remove every label
    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels currently shown somewhere on the map
    pub fn visible_count(&self) -> usize {
        self.labels
            .values()
            .filter(|l| !l.is_hidden() && !l.text.is_empty())
            .count()
    }
}

impl Default for LabelManager {
    fn default() -> Self {
        Self::new()
    }
}

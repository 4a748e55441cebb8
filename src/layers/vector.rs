use crate::geometry::Sketch;
use serde::{Deserialize, Serialize};

#[cfg(feature = "egui")]
use egui::Color32;

/// Serializable color type that can convert to/from egui::Color32
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

#[cfg(feature = "egui")]
impl From<Rgba> for Color32 {
    fn from(color: Rgba) -> Self {
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

/// Stroke style shared by every feature in a layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Line color
    pub color: Rgba,
    /// Line width
    pub width: f32,
    /// Opacity (0.0 to 1.0)
    pub opacity: f32,
    /// Line dash pattern (empty for solid line)
    pub dash_pattern: Vec<f32>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Rgba::rgb(14, 151, 250),
            width: 4.0,
            opacity: 1.0,
            dash_pattern: Vec::new(),
        }
    }
}

/// A committed sketch with its layer-assigned id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommittedFeature {
    pub id: String,
    pub sketch: Sketch,
}

/// A named mutable collection of committed sketches, rendered with one fixed
/// stroke style in insertion order.
pub struct FeatureLayer {
    name: String,
    stroke: LineStyle,
    features: Vec<CommittedFeature>,
    feature_counter: usize,
}

impl FeatureLayer {
    /// Create a new, empty feature layer
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stroke: LineStyle::default(),
            features: Vec::new(),
            feature_counter: 0,
        }
    }

    pub fn with_stroke(mut self, stroke: LineStyle) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stroke(&self) -> &LineStyle {
        &self.stroke
    }

    /// Commit a sketch to the layer, returning its assigned id
    pub fn add(&mut self, sketch: Sketch) -> String {
        let id = format!("feature_{}", self.feature_counter);
        self.feature_counter += 1;
        self.features.push(CommittedFeature {
            id: id.clone(),
            sketch,
        });
        id
    }

    /// Remove every committed feature. Idempotent.
    pub fn clear(&mut self) {
        self.features.clear();
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Committed features in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &CommittedFeature> {
        self.features.iter()
    }

    pub fn get(&self, id: &str) -> Option<&CommittedFeature> {
        self.features.iter().find(|f| f.id == id)
    }
}

//! # Tapeline
//!
//! An interactive measurement overlay for tiled maps.
//!
//! Draw a line or polygon over an OSM basemap and watch per-segment,
//! running-total, and closing-segment labels update live while you place
//! vertices. Geodesy is delegated to the `geo` crate, tile fetching to
//! `reqwest`, and rendering to `egui`.

pub mod core;
pub mod geometry;
pub mod input;
pub mod interactions;
pub mod layers;
pub mod measure;
pub mod prelude;
pub mod runtime;
pub mod ui;

// Re-export public API
pub use crate::core::{
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::Map,
    viewport::Viewport,
};

pub use crate::geometry::Sketch;

pub use crate::input::events::{InputEvent, MouseButton};

pub use crate::interactions::draw::{DrawInteraction, DrawKind};

pub use crate::layers::{tile::TileLayer, vector::FeatureLayer};

pub use crate::ui::label::{LabelId, LabelManager, LabelStyle, MeasureLabel};

#[cfg(feature = "egui")]
pub use crate::ui::widget::MapWidget;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Tile decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Interaction error: {0}")]
    Interaction(String),
}

/// Error type alias for convenience
pub type Error = MapError;

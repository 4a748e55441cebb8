//! Prelude module for common tapeline types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use tapeline::prelude::*;`

pub use crate::core::{
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::Map,
    viewport::Viewport,
};

pub use crate::geometry::Sketch;

pub use crate::input::events::{InputEvent, MouseButton};

pub use crate::interactions::draw::{DrawInteraction, DrawKind, DrawSession};

pub use crate::layers::{
    tile::{TileLayer, TileSource},
    vector::{FeatureLayer, LineStyle, Rgba},
};

pub use crate::measure::{format_area, format_distance, truncates_to_zero};

pub use crate::ui::label::{LabelId, LabelManager, LabelStyle, MeasureLabel};

#[cfg(feature = "egui")]
pub use crate::ui::widget::MapWidget;

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

//! Sketch geometry for measurement drawing
//!
//! A [`Sketch`] is an ordered sequence of geographic vertices, either an open
//! path (`LineString`) or a polygon boundary (`Ring`). Rings are stored as an
//! *open* vertex list with implicit closure: the first vertex is never
//! repeated at the end, so the most recent segment is always the final vertex
//! pair and the closing segment is (last, first).
//!
//! All geodesy is delegated to the `geo` crate: lengths are geodesic
//! (haversine), ring areas spherical (Chamberlain-Duquette). At interactive
//! drawing extents the spherical area matches the planar shoelace value
//! within a fraction of a percent.

use crate::core::geo::LatLng;
use geo::{
    Centroid, ChamberlainDuquetteArea, HaversineDistance, HaversineIntermediate, HaversineLength,
    LineString, Polygon,
};
use serde::{Deserialize, Serialize};

/// A drawn shape: an open path or a polygon boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sketch {
    /// An open path of vertices
    LineString(Vec<LatLng>),
    /// A polygon boundary as an open vertex list with implicit closure
    Ring(Vec<LatLng>),
}

impl Sketch {
    /// The ordered vertex sequence (for a ring, without the closing duplicate)
    pub fn vertices(&self) -> &[LatLng] {
        match self {
            Sketch::LineString(v) | Sketch::Ring(v) => v,
        }
    }

    pub fn is_ring(&self) -> bool {
        matches!(self, Sketch::Ring(_))
    }

    /// Total geodesic length in meters. For a ring this includes the implicit
    /// closing segment.
    pub fn length_meters(&self) -> f64 {
        match self {
            Sketch::LineString(v) => path_meters(v),
            Sketch::Ring(v) => {
                if v.len() < 2 {
                    return 0.0;
                }
                path_meters(v) + segment_meters(&v[v.len() - 1], &v[0])
            }
        }
    }

    /// Enclosed spherical area in square meters; zero for open paths.
    pub fn area_sq_meters(&self) -> f64 {
        match self {
            Sketch::LineString(_) => 0.0,
            Sketch::Ring(v) => ring_area_sq_meters(v),
        }
    }
}

/// Geodesic length of one segment in meters.
pub fn segment_meters(a: &LatLng, b: &LatLng) -> f64 {
    let a: geo::Point<f64> = (*a).into();
    let b: geo::Point<f64> = (*b).into();
    a.haversine_distance(&b)
}

/// Cumulative geodesic length of a vertex path in meters.
pub fn path_meters(vertices: &[LatLng]) -> f64 {
    if vertices.len() < 2 {
        return 0.0;
    }
    let line: LineString<f64> = vertices
        .iter()
        .map(|v| geo::Point::from(*v))
        .collect::<Vec<_>>()
        .into();
    line.haversine_length()
}

/// Spherical area of an open ring in square meters.
pub fn ring_area_sq_meters(vertices: &[LatLng]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    ring_polygon(vertices).chamberlain_duquette_unsigned_area()
}

/// Geodesic midpoint of a segment.
pub fn segment_midpoint(a: &LatLng, b: &LatLng) -> LatLng {
    let a: geo::Point<f64> = (*a).into();
    let b: geo::Point<f64> = (*b).into();
    a.haversine_intermediate(&b, 0.5).into()
}

/// A representative interior point of an open ring, used to anchor the area
/// label. Falls back to the first vertex for degenerate rings.
pub fn ring_interior_point(vertices: &[LatLng]) -> LatLng {
    if vertices.len() < 3 {
        return vertices.first().copied().unwrap_or_default();
    }
    match ring_polygon(vertices).centroid() {
        Some(c) => c.into(),
        None => vertices[0],
    }
}

fn ring_polygon(vertices: &[LatLng]) -> Polygon<f64> {
    // geo closes the exterior ring itself
    let exterior: LineString<f64> = vertices
        .iter()
        .map(|v| geo::Point::from(*v))
        .collect::<Vec<_>>()
        .into();
    Polygon::new(exterior, vec![])
}

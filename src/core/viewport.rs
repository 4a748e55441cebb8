use crate::core::geo::{LatLng, LatLngBounds, Point, EARTH_RADIUS};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
    /// Pixel origin for coordinate transformations (to avoid precision issues)
    pixel_origin: Option<Point>,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom: zoom.clamp(0.0, 18.0),
            size,
            min_zoom: 0.0,
            max_zoom: 18.0,
            pixel_origin: None,
        }
    }

    /// Sets the center of the viewport, clamped to world bounds
    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::new(
            LatLng::clamp_lat(center.lat),
            center.lng.clamp(-180.0, 180.0),
        );
        self.update_pixel_origin();
    }

    /// Sets the zoom level, clamping to the valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.update_pixel_origin();
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
        self.update_pixel_origin();
    }

    /// Gets the scale factor for the current zoom level
    pub fn scale(&self) -> f64 {
        2_f64.powf(self.zoom)
    }

    /// Projects a LatLng to world pixel coordinates (Web Mercator, EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        let scale = 256.0 * 2_f64.powf(z);

        let x = lat_lng.lng.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + lat_lng.lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;

        let world = 2.0 * PI * EARTH_RADIUS;
        let pixel_x = (x + PI * EARTH_RADIUS) / world * scale;
        let pixel_y = (-y + PI * EARTH_RADIUS) / world * scale;

        Point::new(pixel_x, pixel_y)
    }

    /// Unprojects world pixel coordinates back to LatLng
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let z = zoom.unwrap_or(self.zoom);
        let scale = 256.0 * 2_f64.powf(z);

        let world = 2.0 * PI * EARTH_RADIUS;
        let x = (pixel.x / scale) * world - PI * EARTH_RADIUS;
        let y = PI * EARTH_RADIUS - (pixel.y / scale) * world;

        let lng = (x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();

        LatLng::new(lat, lng)
    }

    /// Gets or calculates the pixel origin for this viewport
    fn pixel_origin(&self) -> Point {
        self.pixel_origin
            .unwrap_or_else(|| self.project(&self.center, None).floor())
    }

    fn update_pixel_origin(&mut self) {
        self.pixel_origin = Some(self.project(&self.center, None).floor());
    }

    /// Converts a geographical coordinate to screen pixel coordinates
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let projected = self.project(lat_lng, None);
        let layer = projected.subtract(&self.pixel_origin());
        Point::new(layer.x + self.size.x / 2.0, layer.y + self.size.y / 2.0)
    }

    /// Converts screen pixel coordinates back to a geographical coordinate
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let layer = Point::new(pixel.x - self.size.x / 2.0, pixel.y - self.size.y / 2.0);
        let projected = layer.add(&self.pixel_origin());
        self.unproject(&projected, None)
    }

    /// Pans the viewport by the given pixel offset
    pub fn pan(&mut self, delta: Point) {
        let center_pixel = self.project(&self.center, None);
        let moved = center_pixel.subtract(&delta);
        let new_center = self.unproject(&moved, None);
        self.set_center(new_center);
    }

    /// Zooms the viewport to a specific level, keeping the focus point stationary
    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < 0.001 {
            return;
        }

        if let Some(focus_screen) = focus_point {
            let focus_latlng = self.pixel_to_lat_lng(&focus_screen);

            self.zoom = new_zoom;
            self.update_pixel_origin();

            // pan shifts content by +delta, so move the drifted focus back
            let new_focus_screen = self.lat_lng_to_pixel(&focus_latlng);
            self.pan(focus_screen.subtract(&new_focus_screen));
        } else {
            self.zoom = new_zoom;
            self.update_pixel_origin();
        }
    }

    /// Gets the current viewport bounds in geographical coordinates
    pub fn bounds(&self) -> LatLngBounds {
        let nw = self.pixel_to_lat_lng(&Point::new(0.0, 0.0));
        let se = self.pixel_to_lat_lng(&Point::new(self.size.x, self.size.y));

        LatLngBounds::new(LatLng::new(se.lat, nw.lng), LatLng::new(nw.lat, se.lng))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(
            LatLng::new(32.8189, -96.6345),
            9.0,
            Point::new(800.0, 600.0),
        );

        assert_eq!(viewport.zoom, 9.0);
        assert_eq!(viewport.center.lat, 32.8189);
        assert_eq!(viewport.size.x, 800.0);
    }

    #[test]
    fn test_coordinate_roundtrip() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));

        let center_pixel = Point::new(256.0, 256.0);
        let center_lat_lng = viewport.pixel_to_lat_lng(&center_pixel);
        assert!((center_lat_lng.lat - 0.0).abs() < 0.01);
        assert!((center_lat_lng.lng - 0.0).abs() < 0.01);

        let back = viewport.lat_lng_to_pixel(&center_lat_lng);
        assert!((back.x - 256.0).abs() < 0.5);
        assert!((back.y - 256.0).abs() < 0.5);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom(-1.0);
        assert_eq!(viewport.zoom, 0.0);

        viewport.set_zoom(20.0);
        assert_eq!(viewport.zoom, 18.0);
    }

    #[test]
    fn test_zoom_to_keeps_focus_stationary() {
        let mut viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));

        let focus = Point::new(384.0, 256.0);
        let focus_lat_lng = viewport.pixel_to_lat_lng(&focus);

        viewport.zoom_to(2.0, Some(focus));

        let after = viewport.lat_lng_to_pixel(&focus_lat_lng);
        // pixel_origin flooring costs up to a pixel
        assert!((after.x - focus.x).abs() < 2.0, "x drifted to {}", after.x);
        assert!((after.y - focus.y).abs() < 2.0, "y drifted to {}", after.y);
    }

    #[test]
    fn test_pan_moves_center() {
        let mut viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));

        let original = viewport.center;
        viewport.pan(Point::new(10.0, 10.0));
        assert_ne!(viewport.center, original);
    }
}

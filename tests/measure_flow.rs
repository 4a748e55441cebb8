//! End-to-end measurement flows driven through [`Map::handle_input`]

use tapeline::{
    geometry, measure, DrawKind, InputEvent, LatLng, Map, MouseButton, Point,
};

const STEP: f64 = 0.01;

fn map() -> Map {
    Map::new(LatLng::new(32.8, -96.6), 12.0, Point::new(1024.0, 768.0))
}

fn click(map: &mut Map, lat: f64, lng: f64) {
    let position = map.viewport.lat_lng_to_pixel(&LatLng::new(lat, lng));
    map.handle_input(&InputEvent::Click {
        position,
        button: MouseButton::Left,
    })
    .unwrap();
}

fn hover(map: &mut Map, lat: f64, lng: f64) {
    let position = map.viewport.lat_lng_to_pixel(&LatLng::new(lat, lng));
    map.handle_input(&InputEvent::MouseMove { position }).unwrap();
}

fn finish(map: &mut Map, lat: f64, lng: f64) {
    let position = map.viewport.lat_lng_to_pixel(&LatLng::new(lat, lng));
    map.handle_input(&InputEvent::DoubleClick { position }).unwrap();
}

#[test]
fn line_measurement_full_flow() {
    let mut map = map();
    map.start_measure(DrawKind::Line);

    let a = LatLng::new(32.8, -96.6);
    let b = LatLng::new(32.8, -96.6 + STEP);
    let c = LatLng::new(32.8 + STEP, -96.6 + STEP);

    click(&mut map, a.lat, a.lng);
    hover(&mut map, b.lat, b.lng);
    click(&mut map, b.lat, b.lng);
    hover(&mut map, c.lat, c.lng);
    click(&mut map, c.lat, c.lng);
    finish(&mut map, c.lat, c.lng);

    assert_eq!(map.feature_layer().len(), 1);
    let committed = map.feature_layer().iter().next().unwrap();
    assert_eq!(committed.sketch.vertices().len(), 3);

    // two segment labels and the running total stay visible
    assert_eq!(map.labels().visible_count(), 3);

    // pixel round trips cost a little precision, so compare against the
    // committed geometry rather than the literal inputs
    let total = geometry::path_meters(committed.sketch.vertices());
    let expected = measure::format_distance(total);
    assert!(
        map.labels().values().any(|l| l.text == expected),
        "no label reads {expected:?}"
    );
}

#[test]
fn polygon_measurement_full_flow() {
    let mut map = map();
    map.start_measure(DrawKind::Polygon);

    click(&mut map, 32.8, -96.6);
    hover(&mut map, 32.8, -96.6 + STEP);
    click(&mut map, 32.8, -96.6 + STEP);
    hover(&mut map, 32.8 + STEP, -96.6 + STEP);
    click(&mut map, 32.8 + STEP, -96.6 + STEP);
    hover(&mut map, 32.8 + STEP, -96.6);
    click(&mut map, 32.8 + STEP, -96.6);
    finish(&mut map, 32.8 + STEP, -96.6);

    assert_eq!(map.feature_layer().len(), 1);
    let committed = map.feature_layer().iter().next().unwrap();
    assert!(committed.sketch.is_ring());
    assert_eq!(committed.sketch.vertices().len(), 4);

    let area = geometry::ring_area_sq_meters(committed.sketch.vertices());
    let expected = measure::format_area(area);
    assert!(
        map.labels().values().any(|l| l.text == expected),
        "no label reads {expected:?}"
    );
    // roughly a 1.1 km square, so the label is in square kilometers
    assert!(expected.ends_with("km²"));
}

#[test]
fn second_measurement_leaves_first_annotation_alone() {
    let mut map = map();
    map.start_measure(DrawKind::Line);
    click(&mut map, 32.8, -96.6);
    hover(&mut map, 32.8, -96.6 + STEP);
    click(&mut map, 32.8, -96.6 + STEP);
    finish(&mut map, 32.8, -96.6 + STEP);

    let labels_after_first = map.labels().len();
    let visible_after_first = map.labels().visible_count();

    map.start_measure(DrawKind::Polygon);
    click(&mut map, 32.9, -96.6);
    hover(&mut map, 32.9, -96.6 + STEP);

    assert_eq!(map.feature_layer().len(), 1);
    assert!(map.labels().len() > labels_after_first);
    assert!(map.labels().visible_count() >= visible_after_first);
}

#[test]
fn clear_removes_annotations_and_tool() {
    let mut map = map();
    map.start_measure(DrawKind::Line);
    click(&mut map, 32.8, -96.6);
    hover(&mut map, 32.8, -96.6 + STEP);
    click(&mut map, 32.8, -96.6 + STEP);
    finish(&mut map, 32.8, -96.6 + STEP);
    assert!(!map.labels().is_empty());

    map.clear();

    assert!(map.interaction().is_none());
    assert!(map.feature_layer().is_empty());
    assert!(map.labels().is_empty());

    // clicks after clear are inert until a tool is armed again
    click(&mut map, 32.8, -96.6);
    assert!(map.labels().is_empty());
}

#[test]
fn distance_formatting_end_to_end() {
    let mut map = map();
    map.start_measure(DrawKind::Line);

    // ~10 km east to land in the kilometer branch
    click(&mut map, 32.8, -96.6);
    hover(&mut map, 32.8, -96.5);

    let session = map.interaction().unwrap().session().unwrap();
    let id = session.segment_label().unwrap().clone();
    let text = &map.labels().get(&id).unwrap().text;
    assert!(text.ends_with(" km"), "expected kilometers, got {text:?}");
    // two decimal places, always
    let digits = text.trim_end_matches(" km").rsplit('.').next().unwrap();
    assert_eq!(digits.len(), 2);
}

use orbit::overlay::DEFAULT_MARKER_RADIUS;
use orbit::visual::HexColor;
use orbit::{ItemId, OrbitLayout, Point, RingGeometry, RingSet, RingSpec, Showcase, VisualCatalog};
use std::time::Duration;

#[test]
fn single_core_ring_sits_on_min_radius_at_thirds() {
    let set = RingSet::new(vec![RingSpec::new("Core", &["HTML", "CSS", "JavaScript"])]).unwrap();
    let geometry = RingGeometry::new(48.0, 144.0).unwrap();

    let layout = OrbitLayout::new(
        &set,
        &geometry,
        40.0,
        VisualCatalog::builtin(),
        DEFAULT_MARKER_RADIUS,
    );

    let ring = &layout.rings[0];
    assert_eq!(ring.radius, geometry.min_radius());

    let angles: Vec<f64> = ring.items.iter().map(|i| i.polar.angle_degrees).collect();
    assert_eq!(angles.len(), 3);
    for (actual, expected) in angles.iter().zip([0.0, 120.0, 240.0]) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }
}

#[test]
fn unmapped_item_renders_with_default_visual() {
    let set = RingSet::new(vec![RingSpec::new("Misc", &["Haskell", "HTML"])]).unwrap();
    let catalog = VisualCatalog::builtin();

    let layout = OrbitLayout::new(
        &set,
        &RingGeometry::default(),
        40.0,
        catalog,
        DEFAULT_MARKER_RADIUS,
    );

    let unknown = &layout.rings[0].items[0];
    assert_eq!(unknown.id, ItemId::from("Haskell"));
    assert_eq!(&unknown.visual, catalog.fallback());
    assert_eq!(unknown.visual.color, HexColor::WHITE);
    assert_eq!(unknown.visual.glyph, "</>");

    let known = &layout.rings[0].items[1];
    assert_ne!(&known.visual, catalog.fallback());
}

#[test]
fn showcase_orbits_rotate_independently() {
    let showcase = Showcase::default();
    let geometry = RingGeometry::default();
    let layouts: Vec<OrbitLayout> = showcase
        .systems()
        .iter()
        .map(|s| {
            OrbitLayout::new(
                &s.rings,
                &geometry,
                s.base_duration_secs,
                VisualCatalog::builtin(),
                DEFAULT_MARKER_RADIUS,
            )
        })
        .collect();

    let elapsed = Duration::from_secs(7);
    let front = layouts[0].rings[0].phase(elapsed);
    let back = layouts[1].rings[0].phase(elapsed);
    assert!((front - back).abs() > 1e-6);

    // neighbouring rings turn opposite ways
    assert!(layouts[0].rings[0].phase(elapsed) > 0.0);
    assert!(layouts[0].rings[1].phase(elapsed) < 0.0);

    let markers = layouts[0].markers_at(elapsed, Point::new(200.0, 200.0));
    let item_count: usize = showcase.systems()[0]
        .rings
        .iter()
        .map(|r| r.items.len())
        .sum();
    assert_eq!(markers.len(), item_count);
}

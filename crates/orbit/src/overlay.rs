use crate::geometry::{self, CartesianOffset, Point, PolarPosition, RingGeometry};
use crate::ring::{Category, ItemId, RingSet};
use crate::rotation::{self, AnimationDescriptor, Rotation};
use crate::visual::{ItemVisual, VisualCatalog};
use std::time::Duration;

pub const DEFAULT_MARKER_RADIUS: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    pub id: ItemId,
    pub polar: PolarPosition,
    pub offset: CartesianOffset,
    pub visual: ItemVisual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingLayout {
    pub category: Category,
    pub radius: f64,
    pub rotation: Rotation,
    pub animation: AnimationDescriptor,
    pub items: Vec<PlacedItem>,
}

impl RingLayout {
    /// Current rotation of the ring container in degrees.
    pub fn phase(&self, elapsed: Duration) -> f64 {
        self.animation.sample(elapsed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerRef {
    pub ring: usize,
    pub item: usize,
}

/// A marker's screen position at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub target: MarkerRef,
    pub center: Point,
    /// Rotation shared with the owning ring; the marker turns with it.
    pub phase_degrees: f64,
}

/// Static placement of every item of one orbit. Positions are relative to
/// the ring center at rotation phase zero; `markers_at` applies the phase.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitLayout {
    pub rings: Vec<RingLayout>,
    pub marker_radius: f64,
}

impl OrbitLayout {
    pub fn new(
        set: &RingSet,
        geometry: &RingGeometry,
        base_duration_secs: f64,
        catalog: &VisualCatalog,
        marker_radius: f64,
    ) -> Self {
        let total = set.len();
        let rings = set
            .iter()
            .enumerate()
            .map(|(ring_index, spec)| {
                let radius = geometry.radius_of(ring_index, total);
                let rotation = rotation::rotation_for(ring_index, base_duration_secs);
                let items = spec
                    .items
                    .iter()
                    .enumerate()
                    .map(|(item_index, id)| {
                        let polar = geometry::position_of(item_index, spec.items.len(), radius);
                        PlacedItem {
                            id: id.clone(),
                            polar,
                            offset: polar.to_cartesian(),
                            visual: catalog.lookup(id).clone(),
                        }
                    })
                    .collect();

                RingLayout {
                    category: spec.category.clone(),
                    radius,
                    rotation,
                    animation: rotation.descriptor(),
                    items,
                }
            })
            .collect();

        Self {
            rings,
            marker_radius,
        }
    }

    pub fn outer_radius(&self) -> f64 {
        self.rings.last().map(|r| r.radius).unwrap_or_default()
    }

    pub fn get(&self, target: MarkerRef) -> Option<(&RingLayout, &PlacedItem)> {
        let ring = self.rings.get(target.ring)?;
        ring.items.get(target.item).map(|item| (ring, item))
    }

    /// Screen positions of all markers, in draw order (inner ring first).
    pub fn markers_at(&self, elapsed: Duration, center: Point) -> Vec<Marker> {
        self.rings
            .iter()
            .enumerate()
            .flat_map(|(ring_index, ring)| {
                let phase = ring.phase(elapsed);
                ring.items
                    .iter()
                    .enumerate()
                    .map(move |(item_index, item)| Marker {
                        target: MarkerRef {
                            ring: ring_index,
                            item: item_index,
                        },
                        center: center.offset(item.offset.rotated(phase)),
                        phase_degrees: phase,
                    })
            })
            .collect()
    }

    /// Marker under `point`, if any. Only markers capture the pointer; the
    /// space between them belongs to whatever is behind the orbit. Overlaps
    /// go to the marker drawn last.
    pub fn hit_test(&self, point: Point, elapsed: Duration, center: Point) -> Option<MarkerRef> {
        self.markers_at(elapsed, center)
            .into_iter()
            .rev()
            .find(|m| m.center.distance_to(point) <= self.marker_radius)
            .map(|m| m.target)
    }

    /// Like `hit_test`, but the currently hovered marker is drawn enlarged by
    /// `hover_scale` and keeps the pointer anywhere inside that larger rim.
    pub fn hit_test_hovered(
        &self,
        point: Point,
        elapsed: Duration,
        center: Point,
        hovered: Option<MarkerRef>,
        hover_scale: f64,
    ) -> Option<MarkerRef> {
        self.hit_test(point, elapsed, center).or_else(|| {
            let target = hovered?;
            self.markers_at(elapsed, center)
                .into_iter()
                .find(|m| m.target == target)
                .filter(|m| m.center.distance_to(point) <= self.marker_radius * hover_scale)
                .map(|m| m.target)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::RingSpec;

    fn layout(rings: Vec<RingSpec>) -> OrbitLayout {
        OrbitLayout::new(
            &RingSet::new(rings).unwrap(),
            &RingGeometry::new(48.0, 144.0).unwrap(),
            40.0,
            VisualCatalog::builtin(),
            DEFAULT_MARKER_RADIUS,
        )
    }

    #[test]
    fn test_layout_assigns_radius_and_rotation() {
        let layout = layout(vec![
            RingSpec::new("Core", &["HTML", "CSS"]),
            RingSpec::new("Tools", &["Docker"]),
        ]);

        assert_eq!(layout.rings[0].radius, 48.0);
        assert_eq!(layout.rings[1].radius, 144.0);
        assert_eq!(layout.rings[1].rotation.duration_secs, 45.0);
        assert_eq!(layout.rings[1].items[0].polar.angle_degrees, 0.0);
        assert_eq!(layout.outer_radius(), 144.0);
    }

    #[test]
    fn test_markers_follow_ring_rotation() {
        let layout = layout(vec![RingSpec::new("Core", &["HTML"])]);
        let center = Point::new(200.0, 200.0);

        let start = layout.markers_at(Duration::ZERO, center);
        assert!((start[0].center.x - 248.0).abs() < 1e-9);
        assert!((start[0].center.y - 200.0).abs() < 1e-9);

        // a quarter of 40s turns the clockwise ring to due south
        let later = layout.markers_at(Duration::from_secs(10), center);
        assert!((later[0].center.x - 200.0).abs() < 1e-9);
        assert!((later[0].center.y - 248.0).abs() < 1e-9);
        assert!((later[0].phase_degrees - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_test_only_captures_markers() {
        let layout = layout(vec![
            RingSpec::new("Core", &["HTML", "CSS", "JavaScript", "TypeScript"]),
            RingSpec::new("Tools", &["Docker"]),
        ]);
        let center = Point::new(0.0, 0.0);

        assert_eq!(layout.hit_test(center, Duration::ZERO, center), None);
        // between HTML (0 deg) and CSS (90 deg) on the inner ring
        let gap = Point::new(48.0 * 0.7071, 48.0 * 0.7071);
        assert_eq!(layout.hit_test(gap, Duration::ZERO, center), None);

        let on_css = Point::new(3.0, 50.0);
        assert_eq!(
            layout.hit_test(on_css, Duration::ZERO, center),
            Some(MarkerRef { ring: 0, item: 1 })
        );

        let on_docker = Point::new(140.0, 0.0);
        let hit = layout.hit_test(on_docker, Duration::ZERO, center).unwrap();
        let (ring, item) = layout.get(hit).unwrap();
        assert_eq!(ring.category.as_str(), "Tools");
        assert_eq!(item.id.as_str(), "Docker");
    }

    #[test]
    fn test_hovered_marker_keeps_its_enlarged_rim() {
        let layout = layout(vec![RingSpec::new("Core", &["HTML", "CSS"])]);
        let center = Point::new(0.0, 0.0);
        let html = MarkerRef { ring: 0, item: 0 };
        // 21 px right of HTML at (48, 0): outside 20, inside 22
        let rim = Point::new(69.0, 0.0);

        assert_eq!(layout.hit_test(rim, Duration::ZERO, center), None);
        assert_eq!(
            layout.hit_test_hovered(rim, Duration::ZERO, center, None, 1.1),
            None
        );
        assert_eq!(
            layout.hit_test_hovered(rim, Duration::ZERO, center, Some(html), 1.1),
            Some(html)
        );
        // another marker's enlarged rim does not reach here
        let css = MarkerRef { ring: 0, item: 1 };
        assert_eq!(
            layout.hit_test_hovered(rim, Duration::ZERO, center, Some(css), 1.1),
            None
        );
        let outside = Point::new(71.0, 0.0);
        assert_eq!(
            layout.hit_test_hovered(outside, Duration::ZERO, center, Some(html), 1.1),
            None
        );
    }

    #[test]
    fn test_empty_ring_has_no_markers() {
        let layout = layout(vec![RingSpec::new("Empty", &[])]);
        assert!(layout.markers_at(Duration::ZERO, Point::default()).is_empty());
        assert_eq!(layout.rings[0].radius, 48.0);
    }
}

use super::{HOVER_SCALE, MAX_SCALE};
use crate::gui::icon::IconCache;
use orbit::{
    MarkerRef, OrbitLayout, OrbitSystem, Palette, Point, RingGeometry, Theme, VisualCatalog,
};
use std::time::Duration;

/// Turns frame clock timestamps (microseconds) into time since the first
/// frame this panel was shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameTimer {
    start_us: Option<i64>,
}

impl FrameTimer {
    pub fn elapsed(&mut self, frame_time_us: i64) -> Duration {
        let start = *self.start_us.get_or_insert(frame_time_us);
        Duration::from_micros(frame_time_us.saturating_sub(start).max(0) as u64)
    }

    pub fn reset(&mut self) {
        self.start_us = None;
    }
}

pub struct PanelState {
    pub system: OrbitSystem,
    pub layout: OrbitLayout,
    pub icons: IconCache,
    pub palette: Palette,
    /// Edge of the square the layout was designed for.
    pub size: f64,
    pub allocation: (f64, f64),
    pub elapsed: Duration,
    pub cursor: Option<Point>,
    pub hovered: Option<MarkerRef>,
    pub timer: FrameTimer,
}

impl PanelState {
    pub fn new(
        system: OrbitSystem,
        geometry: &RingGeometry,
        marker_radius: f64,
        size: f64,
        catalog: &VisualCatalog,
        theme: Theme,
    ) -> Self {
        let layout = Self::layout_for(&system, geometry, marker_radius, catalog);
        let icons = IconCache::for_layout(&layout);
        Self::with_icons(system, layout, icons, size, theme)
    }

    fn with_icons(
        system: OrbitSystem,
        layout: OrbitLayout,
        icons: IconCache,
        size: f64,
        theme: Theme,
    ) -> Self {
        Self {
            system,
            layout,
            icons,
            palette: Palette::for_theme(theme),
            size,
            allocation: (size, size),
            elapsed: Duration::ZERO,
            cursor: None,
            hovered: None,
            timer: FrameTimer::default(),
        }
    }

    fn layout_for(
        system: &OrbitSystem,
        geometry: &RingGeometry,
        marker_radius: f64,
        catalog: &VisualCatalog,
    ) -> OrbitLayout {
        OrbitLayout::new(
            &system.rings,
            geometry,
            system.base_duration_secs,
            catalog,
            marker_radius,
        )
    }

    /// Swaps in a new configuration. Animation phases keep running.
    pub fn reload(
        &mut self,
        system: OrbitSystem,
        geometry: &RingGeometry,
        marker_radius: f64,
        size: f64,
        catalog: &VisualCatalog,
    ) {
        self.layout = Self::layout_for(&system, geometry, marker_radius, catalog);
        self.icons = IconCache::for_layout(&self.layout);
        self.system = system;
        self.size = size;
        self.hovered = None;
        self.refresh_hover();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.palette = Palette::for_theme(theme);
    }

    pub fn scale(&self) -> f64 {
        let (w, h) = self.allocation;
        if w <= 0.0 || h <= 0.0 {
            return 1.0;
        }
        (w.min(h) / self.size).min(MAX_SCALE)
    }

    /// Whether the fade and slide of the entrance have both settled.
    pub fn entrance_finished(&self) -> bool {
        self.system.fade_in().is_finished(self.elapsed)
            && self.system.slide_in().is_finished(self.elapsed)
    }

    pub fn opacity(&self) -> f64 {
        if self.entrance_finished() {
            return 1.0;
        }
        self.system.fade_in().sample(self.elapsed)
    }

    pub fn center(&self) -> Point {
        let (w, h) = self.allocation;
        if self.entrance_finished() {
            return Point::new(w / 2.0, h / 2.0);
        }
        let slide = self.system.slide_in().sample(self.elapsed);
        Point::new(w / 2.0 + slide, h / 2.0)
    }

    fn to_layout_space(&self, point: Point) -> Point {
        let center = self.center();
        let scale = self.scale();
        Point::new((point.x - center.x) / scale, (point.y - center.y) / scale)
    }

    pub fn marker_screen_position(&self, target: MarkerRef) -> Option<Point> {
        let center = self.center();
        let scale = self.scale();
        self.layout
            .markers_at(self.elapsed, Point::default())
            .into_iter()
            .find(|m| m.target == target)
            .map(|m| Point::new(center.x + m.center.x * scale, center.y + m.center.y * scale))
    }

    fn refresh_hover(&mut self) -> bool {
        let hovered = self.cursor.and_then(|p| {
            self.layout.hit_test_hovered(
                self.to_layout_space(p),
                self.elapsed,
                Point::default(),
                self.hovered,
                HOVER_SCALE,
            )
        });
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    /// Moves to the given frame. Returns whether the hovered marker changed,
    /// which happens when a marker slides under a still pointer.
    pub fn advance(&mut self, frame_time_us: i64, allocation: (f64, f64)) -> bool {
        self.elapsed = self.timer.elapsed(frame_time_us);
        self.allocation = allocation;
        self.refresh_hover()
    }

    pub fn update_cursor(&mut self, cursor: Option<Point>) -> bool {
        self.cursor = cursor;
        self.refresh_hover()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> PanelState {
        let system = OrbitSystem::frontend();
        let layout = PanelState::layout_for(
            &system,
            &RingGeometry::default(),
            20.0,
            VisualCatalog::builtin(),
        );
        PanelState::with_icons(system, layout, IconCache::default(), 400.0, Theme::Dark)
    }

    #[test]
    fn test_frame_timer_starts_at_first_frame() {
        let mut timer = FrameTimer::default();
        assert_eq!(timer.elapsed(5_000_000), Duration::ZERO);
        assert_eq!(timer.elapsed(6_500_000), Duration::from_millis(1500));
        timer.reset();
        assert_eq!(timer.elapsed(9_000_000), Duration::ZERO);
    }

    #[test]
    fn test_hover_follows_moving_marker() {
        let mut state = state();
        state.advance(0, (400.0, 400.0));
        state.advance(2_000_000, (400.0, 400.0));

        // innermost ring turns 18 degrees in the first 2s of 40s
        let angle = 18f64.to_radians();
        let on_html = Point::new(200.0 + 48.0 * angle.cos(), 200.0 + 48.0 * angle.sin());
        assert!(state.update_cursor(Some(on_html)));
        assert_eq!(state.hovered, Some(MarkerRef { ring: 0, item: 0 }));

        // the pointer stays put while the ring carries the marker away
        assert!(state.advance(12_000_000, (400.0, 400.0)));
        assert_eq!(state.hovered, None);

        state.update_cursor(None);
        assert_eq!(state.hovered, None);
    }

    #[test]
    fn test_hovered_marker_holds_pointer_on_enlarged_rim() {
        let mut state = state();
        state.advance(0, (400.0, 400.0));
        state.advance(5_000_000, (400.0, 400.0));

        // innermost ring at 45 degrees after 5s of 40s
        let angle = 45f64.to_radians();
        let at = |r: f64| Point::new(200.0 + r * angle.cos(), 200.0 + r * angle.sin());
        let html = Some(MarkerRef { ring: 0, item: 0 });

        // 21 px out from the marker center: only the enlarged rim covers it
        state.update_cursor(Some(at(48.0 + 21.0)));
        assert_eq!(state.hovered, None);

        state.update_cursor(Some(at(48.0)));
        assert_eq!(state.hovered, html);
        state.update_cursor(Some(at(48.0 + 21.0)));
        assert_eq!(state.hovered, html);
    }

    #[test]
    fn test_scale_follows_allocation() {
        let mut state = state();
        state.advance(0, (200.0, 600.0));
        assert_eq!(state.scale(), 0.5);
        state.advance(0, (2000.0, 2000.0));
        assert_eq!(state.scale(), MAX_SCALE);
    }

    #[test]
    fn test_entrance_offsets_center() {
        let mut state = state();
        state.advance(0, (400.0, 400.0));
        assert!(!state.entrance_finished());
        assert_eq!(state.opacity(), 0.0);
        assert_eq!(state.center(), Point::new(150.0, 200.0));

        // delay 0.2s + duration 0.8s
        state.advance(999_000, (400.0, 400.0));
        assert!(!state.entrance_finished());
        state.advance(1_000_000, (400.0, 400.0));
        assert!(state.entrance_finished());

        state.advance(5_000_000, (400.0, 400.0));
        assert_eq!(state.opacity(), 1.0);
        assert_eq!(state.center(), Point::new(200.0, 200.0));
    }
}

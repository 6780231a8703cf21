//! Radial layout engine: concentric rings of labelled items, each ring
//! rotating continuously around a shared center.

pub mod macros;

pub mod geometry;
pub mod overlay;
pub mod ring;
pub mod rotation;
pub mod showcase;
pub mod theme;
pub mod visual;

pub use geometry::{CartesianOffset, Point, PolarPosition, RingGeometry};
pub use overlay::{Marker, MarkerRef, OrbitLayout};
pub use ring::{Category, ItemId, RingSet, RingSpec};
pub use rotation::{AnimationDescriptor, Direction, Easing, Repeat, Rotation};
pub use showcase::{OrbitSystem, Showcase, Side};
pub use theme::{Palette, Theme, ThemeContext};
pub use visual::{HexColor, IconName, ItemVisual, VisualCatalog};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("A ring set needs at least one ring")]
    EmptyRingSet,
    #[error("Invalid ring radii: min {min}, max {max}")]
    InvalidRadii { min: f64, max: f64 },
}

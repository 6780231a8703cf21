pub mod component;
pub mod model;
pub mod view;

pub use component::{OrbitPanel, PanelInit, PanelMsg};
pub use model::{FrameTimer, PanelState};
pub use view::draw;

pub const CENTER_RADIUS: f64 = 28.0;
pub const CENTER_GLYPH: &str = "</>";
pub const HOVER_SCALE: f64 = 1.1;
pub const MAX_SCALE: f64 = 1.25; // how far an orbit may grow past its design size
pub const RING_BORDER_ALPHA: f64 = 0.3;
pub const CENTER_FILL_ALPHA: f64 = 0.2;
pub const MARKER_BORDER_WIDTH: f64 = 2.0;
pub const ICON_FILL_FACTOR: f64 = 0.5; // icon edge relative to marker diameter

// marker glow (color alpha, spread in px)
pub const GLOW_ALPHA: f64 = 0.25;
pub const GLOW_SPREAD: f64 = 20.0;
pub const HOVER_GLOW_ALPHA: f64 = 0.5;
pub const HOVER_GLOW_SPREAD: f64 = 30.0;

pub const TOOLTIP_GAP: f64 = 8.0;
pub const TOOLTIP_PADDING_X: f64 = 12.0;
pub const TOOLTIP_PADDING_Y: f64 = 8.0;
pub const TOOLTIP_ARROW: f64 = 4.0;

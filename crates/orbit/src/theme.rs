use crate::visual::HexColor;
use palette::Srgba;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Light => "folio-light",
            Self::Dark => "folio-dark",
        }
    }
}

/// Process-wide theme state. The owner hands out `Theme` values and palette
/// snapshots; `toggle_theme` is the only way to change it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeContext {
    theme: Theme,
}

impl ThemeContext {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

/// Colors every presentational piece picks from for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Srgba<f64>,
    pub heading: Srgba<f64>,
    pub title: Srgba<f64>,
    pub marker_background: Srgba<f64>,
    pub marker_border: Srgba<f64>,
    pub tooltip_background: Srgba<f64>,
    pub tooltip_text: Srgba<f64>,
    pub tooltip_secondary: Srgba<f64>,
    pub center_icon: Srgba<f64>,
}

const BLACK: HexColor = HexColor::rgb(0x00, 0x00, 0x00);
const GRAY_200: HexColor = HexColor::rgb(0xE5, 0xE7, 0xEB);
const GRAY_300: HexColor = HexColor::rgb(0xD1, 0xD5, 0xDB);
const GRAY_400: HexColor = HexColor::rgb(0x9C, 0xA3, 0xAF);
const GRAY_600: HexColor = HexColor::rgb(0x4B, 0x55, 0x63);
const GRAY_700: HexColor = HexColor::rgb(0x37, 0x41, 0x51);
const GRAY_800: HexColor = HexColor::rgb(0x1F, 0x29, 0x37);
const GRAY_900: HexColor = HexColor::rgb(0x11, 0x18, 0x27);

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: BLACK.opaque(),
                heading: HexColor::WHITE.opaque(),
                title: GRAY_300.opaque(),
                marker_background: BLACK.opaque(),
                marker_border: GRAY_700.opaque(),
                tooltip_background: GRAY_800.opaque(),
                tooltip_text: HexColor::WHITE.opaque(),
                tooltip_secondary: GRAY_400.opaque(),
                center_icon: HexColor::WHITE.opaque(),
            },
            Theme::Light => Self {
                background: HexColor::WHITE.opaque(),
                heading: GRAY_900.opaque(),
                title: GRAY_700.opaque(),
                marker_background: HexColor::WHITE.opaque(),
                marker_border: GRAY_300.opaque(),
                tooltip_background: GRAY_200.opaque(),
                tooltip_text: GRAY_900.opaque(),
                tooltip_secondary: GRAY_600.opaque(),
                center_icon: GRAY_900.opaque(),
            },
        }
    }
}

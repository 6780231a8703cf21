use crate::ring::ItemId;
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::{Srgb, Srgba, WithAlpha};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct IconName(String);

crate::impl_string_newtype!(IconName);

/// `#RRGGBB` color as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn with_alpha(&self, alpha: f64) -> Srgba<f64> {
        self.0.into_format::<f64>().with_alpha(alpha)
    }

    pub fn opaque(&self) -> Srgba<f64> {
        self.with_alpha(1.0)
    }
}

impl FromStr for HexColor {
    type Err = palette::rgb::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0.red, self.0.green, self.0.blue)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemVisual {
    /// Icon theme name; may not resolve on every host.
    #[serde(default)]
    pub icon: IconName,
    /// Short text drawn when the icon is missing.
    pub glyph: String,
    pub color: HexColor,
}

impl ItemVisual {
    fn new(icon: &str, glyph: &str, color: HexColor) -> Self {
        Self {
            icon: IconName::from(icon),
            glyph: glyph.to_string(),
            color,
        }
    }

    pub fn fallback() -> Self {
        Self::new("text-x-script", "</>", HexColor::WHITE)
    }
}

/// Identifier to visual mapping. `lookup` is total: unknown identifiers get
/// the fallback visual.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualCatalog {
    entries: HashMap<ItemId, ItemVisual>,
    fallback: ItemVisual,
}

static BUILTIN: OnceLock<VisualCatalog> = OnceLock::new();

impl VisualCatalog {
    pub fn builtin() -> &'static VisualCatalog {
        BUILTIN.get_or_init(Self::build_builtin)
    }

    pub fn lookup(&self, id: &ItemId) -> &ItemVisual {
        self.entries.get(id).unwrap_or(&self.fallback)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn fallback(&self) -> &ItemVisual {
        &self.fallback
    }

    /// Copy of this catalog with `overrides` replacing or adding entries.
    pub fn with_overrides(&self, overrides: &HashMap<ItemId, ItemVisual>) -> Self {
        let mut catalog = self.clone();
        catalog
            .entries
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        catalog
    }

    fn build_builtin() -> Self {
        let react = HexColor::rgb(0x61, 0xDA, 0xFB);
        let redux = HexColor::rgb(0x76, 0x4A, 0xBC);

        let entries = [
            ("HTML", "text-html", "H5", HexColor::rgb(0xE3, 0x4F, 0x26)),
            ("CSS", "text-css", "C3", HexColor::rgb(0x15, 0x72, 0xB6)),
            ("JavaScript", "text-x-javascript", "JS", HexColor::rgb(0xF7, 0xDF, 0x1E)),
            ("TypeScript", "text-x-typescript", "TS", HexColor::rgb(0x31, 0x78, 0xC6)),
            ("React", "react", "Re", react),
            ("Next.js", "nextjs", "N", HexColor::WHITE),
            ("Tailwind CSS", "tailwindcss", "Tw", HexColor::rgb(0x06, 0xB6, 0xD4)),
            ("shadcn/ui", "text-x-script", "</>", HexColor::WHITE),
            ("Context API", "react", "Re", react),
            ("Redux Toolkit", "redux", "Rx", redux),
            ("RTK Query", "redux", "Rx", redux),
            ("State Mgmt", "redux", "Rx", redux),
            ("Express.js", "express", "Ex", HexColor::rgb(0x68, 0xA0, 0x63)),
            ("Nest.js", "nestjs", "Ne", HexColor::rgb(0xE0, 0x23, 0x4E)),
            ("Docker", "docker", "Dk", HexColor::rgb(0x24, 0x96, 0xED)),
            ("ORM", "database", "DB", HexColor::WHITE),
            ("Prisma", "prisma", "Pr", HexColor::rgb(0x2D, 0x37, 0x48)),
            ("Mongoose", "mongoose", "Mg", HexColor::rgb(0x88, 0x00, 0x00)),
            ("TypeORM", "database", "DB", HexColor::rgb(0xFE, 0x09, 0x02)),
            ("MySQL", "mysql", "My", HexColor::rgb(0x44, 0x79, 0xA1)),
            ("MongoDB", "mongodb", "Mo", HexColor::rgb(0x47, 0xA2, 0x48)),
            ("PostgreSQL", "postgresql", "Pg", HexColor::rgb(0x33, 0x67, 0x91)),
        ]
        .into_iter()
        .map(|(id, icon, glyph, color)| (ItemId::from(id), ItemVisual::new(icon, glyph, color)))
        .collect();

        Self {
            entries,
            fallback: ItemVisual::fallback(),
        }
    }
}

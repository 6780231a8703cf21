use crate::ring::{RingSet, RingSpec};
use crate::rotation::{AnimatedProperty, AnimationDescriptor};
use crate::visual::HexColor;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

const ENTRANCE_DURATION: Duration = Duration::from_millis(800);
const ENTRANCE_DELAY: Duration = Duration::from_millis(200);
const ENTRANCE_DISTANCE: f64 = 50.0;

/// Side an orbit slides in from when it first appears.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitSystem {
    pub title: String,
    pub rings: RingSet,
    pub accent: HexColor,
    pub base_duration_secs: f64,
    #[serde(default)]
    pub entrance: Side,
}

impl OrbitSystem {
    pub fn frontend() -> Self {
        Self {
            title: "Frontend Technologies".to_string(),
            rings: builtin_rings(vec![
                RingSpec::new("Core", &["HTML", "CSS", "JavaScript"]),
                RingSpec::new("Frameworks", &["React", "Next.js", "TypeScript"]),
                RingSpec::new("Styling", &["Tailwind CSS", "shadcn/ui"]),
                RingSpec::new(
                    "State Management",
                    &["Context API", "Redux Toolkit", "RTK Query"],
                ),
            ]),
            accent: HexColor::rgb(0x3B, 0x82, 0xF6),
            base_duration_secs: 40.0,
            entrance: Side::Left,
        }
    }

    pub fn backend() -> Self {
        Self {
            title: "Backend Technologies".to_string(),
            rings: builtin_rings(vec![
                RingSpec::new("Frameworks", &["Express.js", "Nest.js"]),
                RingSpec::new("Tools", &["Docker", "ORM"]),
                RingSpec::new("ORMs", &["Prisma", "Mongoose", "TypeORM"]),
                RingSpec::new("Databases", &["MySQL", "MongoDB", "PostgreSQL"]),
            ]),
            accent: HexColor::rgb(0x22, 0xC5, 0x5E),
            base_duration_secs: 50.0,
            entrance: Side::Right,
        }
    }

    /// Fade-in opacity animation played once when the orbit is mounted.
    pub fn fade_in(&self) -> AnimationDescriptor {
        AnimationDescriptor::once(AnimatedProperty::Opacity, 0.0, 1.0, ENTRANCE_DURATION)
            .with_delay(ENTRANCE_DELAY)
    }

    /// Horizontal slide from the entrance side back to rest.
    pub fn slide_in(&self) -> AnimationDescriptor {
        AnimationDescriptor::once(
            AnimatedProperty::TranslateX,
            self.entrance.sign() * ENTRANCE_DISTANCE,
            0.0,
            ENTRANCE_DURATION,
        )
        .with_delay(ENTRANCE_DELAY)
    }
}

fn builtin_rings(rings: Vec<RingSpec>) -> RingSet {
    debug_assert!(!rings.is_empty());
    RingSet(rings)
}

/// The orbits shown side by side. Each one animates on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Showcase(pub Vec<OrbitSystem>);

impl Default for Showcase {
    fn default() -> Self {
        Self(vec![OrbitSystem::frontend(), OrbitSystem::backend()])
    }
}

impl Showcase {
    pub fn systems(&self) -> &[OrbitSystem] {
        &self.0
    }
}

use crate::contact::Credentials;
use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use orbit::overlay::DEFAULT_MARKER_RADIUS;
use orbit::visual::{HexColor, IconName};
use orbit::{ItemId, ItemVisual, LayoutError, RingGeometry, Showcase, Theme, VisualCatalog};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ORBIT_SIZE: f64 = 400.0;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeometryConfig {
    #[serde(default = "GeometryConfig::default_min_radius")]
    pub min_radius: f64,
    #[serde(default = "GeometryConfig::default_max_radius")]
    pub max_radius: f64,
    #[serde(default = "GeometryConfig::default_marker_radius")]
    pub marker_radius: f64,
    /// Edge length of the square each orbit is laid out in.
    #[serde(default = "GeometryConfig::default_size")]
    pub size: f64,
}

impl GeometryConfig {
    fn default_min_radius() -> f64 {
        orbit::geometry::DEFAULT_MIN_RADIUS
    }

    fn default_max_radius() -> f64 {
        orbit::geometry::DEFAULT_MAX_RADIUS
    }

    fn default_marker_radius() -> f64 {
        DEFAULT_MARKER_RADIUS
    }

    fn default_size() -> f64 {
        DEFAULT_ORBIT_SIZE
    }

    pub fn ring_geometry(&self) -> Result<RingGeometry, LayoutError> {
        RingGeometry::new(self.min_radius, self.max_radius)
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            min_radius: Self::default_min_radius(),
            max_radius: Self::default_max_radius(),
            marker_radius: Self::default_marker_radius(),
            size: Self::default_size(),
        }
    }
}

/// A catalog entry added or replaced from configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VisualOverride {
    pub id: ItemId,
    #[serde(default)]
    pub icon: IconName,
    pub glyph: String,
    pub color: HexColor,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactConfig {
    /// Shown in failure messages as the fallback channel.
    #[serde(default = "ContactConfig::default_direct_email")]
    pub direct_email: String,
}

impl ContactConfig {
    fn default_direct_email() -> String {
        "hello@example.com".to_string()
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            direct_email: Self::default_direct_email(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub orbits: Showcase,
    #[serde(default)]
    pub visuals: Vec<VisualOverride>,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub emailjs: Credentials,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let geometry = self
            .geometry
            .ring_geometry()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.orbits.systems().is_empty() {
            return Err(ConfigError::Invalid("no orbits configured".to_string()));
        }

        if !(self.geometry.marker_radius > 0.0 && self.geometry.size > 0.0) {
            return Err(ConfigError::Invalid(
                "marker radius and orbit size must be positive".to_string(),
            ));
        }

        for system in self.orbits.systems() {
            let base = system.base_duration_secs;
            if !(base.is_finite() && base > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "orbit '{}': base_duration_secs must be a positive number, got {}",
                    system.title, base
                )));
            }

            let spacing = geometry.spacing(system.rings.len());
            if system.rings.len() > 1 && self.geometry.marker_radius >= spacing {
                log::warn!(
                    "orbit '{}': marker radius {} reaches across the ring spacing of {:.1}",
                    system.title,
                    self.geometry.marker_radius,
                    spacing
                );
            }
        }

        let unmapped = self.unmapped_items();
        if !unmapped.is_empty() {
            log::info!(
                "No visual configured for {}; using the default",
                unmapped
                    .iter()
                    .map(|id| id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        Ok(())
    }

    /// Orbit items that fall back to the default visual.
    pub fn unmapped_items(&self) -> Vec<ItemId> {
        let catalog = self.catalog();
        let mut unmapped: Vec<ItemId> = Vec::new();
        for id in self
            .orbits
            .systems()
            .iter()
            .flat_map(|system| system.rings.iter())
            .flat_map(|ring| ring.items.iter())
        {
            if !catalog.contains(id) && !unmapped.contains(id) {
                unmapped.push(id.clone());
            }
        }
        unmapped
    }

    pub fn ring_geometry(&self) -> RingGeometry {
        self.geometry.ring_geometry().unwrap_or_default()
    }

    pub fn catalog(&self) -> VisualCatalog {
        let overrides: HashMap<ItemId, ItemVisual> = self
            .visuals
            .iter()
            .map(|v| {
                (
                    v.id.clone(),
                    ItemVisual {
                        icon: v.icon.clone(),
                        glyph: v.glyph.clone(),
                        color: v.color,
                    },
                )
            })
            .collect();
        VisualCatalog::builtin().with_overrides(&overrides)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "folio", "folio").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn parse(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Config, ConfigError> {
    let config: Config = builder
        .add_source(
            config::Environment::with_prefix("FOLIO")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    parse(config::Config::builder().add_source(config::File::from(config_path).required(false)))
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Falling back to built-in configuration: {}", e);
            Config::default()
        }
    }
}

/// Writes the commented default file unless one is already there. Returns
/// the path either way.
pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if path.exists() {
        log::info!("Keeping existing config at {}", path.display());
        return Ok(path);
    }
    if let Some(dir) = path.parent() {
        fs_err::create_dir_all(dir)?;
    }
    fs_err::write(&path, DEFAULT_CONFIG)?;
    log::info!("Wrote default config to {}", path.display());
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

fn touches(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Watches the config directory and forwards every edit of the config file
/// that still loads and validates. Broken edits are logged and skipped, so
/// the UI keeps its last good configuration.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    if let Err(e) = watch_config(&tx).await {
        log::error!("Config watcher stopped: {}", e);
    }
}

async fn watch_config(tx: &Sender<AppEvent>) -> Result<(), ConfigError> {
    let config_path = get_config_path()?;
    let Some(config_dir) = config_path.parent() else {
        return Err(ConfigError::ConfigDirNotFound);
    };
    fs_err::create_dir_all(config_dir)?;

    let (events_tx, events_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = events_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(config_dir, RecursiveMode::NonRecursive)?;

    while let Ok(res) = events_rx.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                log::error!("Watch error: {}", e);
                continue;
            }
        };
        if !touches(&event, &config_path) {
            continue;
        }

        match load_config() {
            Ok(config) => {
                if tx.send(AppEvent::ConfigReload(Box::new(config))).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Ignoring config change: {}", e),
        }
    }
    Ok(())
}

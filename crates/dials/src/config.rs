use directories::ProjectDirs;
use gyre::arc_text::GlyphOrientation;
use gyre::icon::IconName;
use gyre::protocol::Screen;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgb;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum HeadingSourceKind {
    /// Samples arrive on the control socket (`gyre heading ...`).
    #[default]
    Socket,
    /// A steady sweep generated in-process.
    Simulated,
    /// A single fixed heading.
    Fixed,
}

/// `#rrggbb` colour.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(pub Srgb<u8>);

impl FromStr for HexColor {
    type Err = palette::rgb::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.0.into_components();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl HexColor {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Srgb::new(r, g, b))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClockConfig {
    pub numerals: Vec<u32>,
    pub icons: Vec<IconName>,
    pub hour_sweep_secs: f64,
    pub minute_cycle_secs: f64,
    pub minute_repeats: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            numerals: vec![12, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            icons: ["x-office-calendar", "mail-message-new", "emblem-favorite", "audio-x-generic"]
                .into_iter()
                .map(IconName::new)
                .collect(),
            hour_sweep_secs: 120.0,
            minute_cycle_secs: 10.0,
            minute_repeats: 12,
        }
    }
}

impl ClockConfig {
    pub fn hour_sweep(&self) -> Duration {
        seconds(self.hour_sweep_secs)
    }

    pub fn minute_cycle(&self) -> Duration {
        seconds(self.minute_cycle_secs)
    }
}

/// Config seconds as a `Duration`. Negative or NaN values mean zero and
/// anything too large to represent, `inf` included, saturates.
pub fn seconds(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WaypointConfig {
    pub title: String,
    pub icon: IconName,
    pub color: HexColor,
    /// Bearing from north, degrees clockwise.
    pub bearing: f64,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InfoRowConfig {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompassConfig {
    pub label: String,
    /// Radius the label's angles are computed against.
    pub label_radius: f64,
    /// Diameter of the ring the glyphs are drawn on.
    pub label_frame: f64,
    pub kerning: f64,
    pub font_size: f64,
    pub orientation: GlyphOrientation,
    pub city: String,
    pub waypoints: Vec<WaypointConfig>,
    pub info: Vec<InfoRowConfig>,
}

impl Default for CompassConfig {
    fn default() -> Self {
        let waypoint = |title: &str, icon: &str, color, bearing, latitude: &str, longitude: &str| {
            WaypointConfig {
                title: title.to_string(),
                icon: IconName::new(icon),
                color,
                bearing,
                latitude: latitude.to_string(),
                longitude: longitude.to_string(),
            }
        };
        let row = |title: &str, text: &str| InfoRowConfig {
            title: title.to_string(),
            text: text.to_string(),
        };

        Self {
            label: "Latitude 35.08587 E • Longitude 21.43673 W • Elevation 64M • Incline 12 •"
                .to_uppercase(),
            label_radius: 135.0,
            label_frame: 225.0,
            kerning: 3.0,
            font_size: 12.0,
            orientation: GlyphOrientation::default(),
            city: "San Francisco".to_string(),
            waypoints: vec![
                waypoint("Parked Car", "car", HexColor::rgb(0x0a, 0x84, 0xff), 200.0, "35.08587 E", "21.43573 W"),
                waypoint("Home", "go-home", HexColor::rgb(0xff, 0x45, 0x3a), 10.0, "35.08587 E", "21.43573 W"),
                waypoint("Tent", "weather-clear-night", HexColor::rgb(0x30, 0xd1, 0x58), 90.0, "35.08587 E", "21.43573 W"),
            ],
            info: vec![
                row("Incline", "20º"),
                row("Elevation", "64M"),
                row("Latitude", "35.08587 E"),
                row("Longitude", "48.1255 W"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeadingConfig {
    pub source: HeadingSourceKind,
    pub fixed_degrees: f64,
    pub sweep_degrees_per_sec: f64,
    pub tick_ms: u64,
    /// A live feed silent for this long is treated as lost.
    pub stale_after_secs: f64,
    /// Interpolation between consecutive samples.
    pub smoothing_ms: u64,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            source: HeadingSourceKind::default(),
            fixed_degrees: 0.0,
            sweep_degrees_per_sec: 12.0,
            tick_ms: 50,
            stale_after_secs: 5.0,
            smoothing_ms: 250,
        }
    }
}

impl HeadingConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn stale_after(&self) -> Duration {
        seconds(self.stale_after_secs)
    }

    pub fn smoothing(&self) -> Duration {
        Duration::from_millis(self.smoothing_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub screen: Screen,
    pub clock: ClockConfig,
    pub compass: CompassConfig,
    pub heading: HeadingConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "gyre", "dials").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("DIALS")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Writes the default file on first run; falls back to defaults on any error.
pub fn load_or_setup() -> Config {
    match write_default_config() {
        Ok(path) => log::debug!("using config at {}", path.display()),
        Err(e) => log::warn!("Could not write default config: {}", e),
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

//! Game configuration.
//!
//! Every tunable of the simulation lives here. The defaults describe an
//! 800×400 world tuned for a 60 Hz reference frame; any field can be
//! overridden from a TOML file:
//!
//! ```toml
//! [flight]
//! gravity = 0.4
//!
//! [obstacles]
//! gap = 180.0
//! placement = { kind = "fraction", min = 0.2, max = 0.8 }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::clock::REFERENCE_PERIOD_MS;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub clock: ClockConfig,
    pub flight: FlightConfig,
    pub obstacles: ObstacleConfig,
    pub hitbox: HitboxConfig,
}

/// Size of the simulated world, in world units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    /// Fixed horizontal position of the player sprite's centre. Doubles as
    /// the scoring threshold.
    pub player_x: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            player_x: 150.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub reference_period_ms: f64,
    /// Upper bound for a single frame's delta. Unbounded when absent.
    pub max_delta: Option<f64>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            reference_period_ms: REFERENCE_PERIOD_MS,
            max_delta: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Velocity gained per reference frame.
    pub gravity: f64,
    /// Velocity set (not added) by a jump. Negative is upward.
    pub jump_impulse: f64,
    /// Where a run starts. Vertically centred when absent.
    pub start_position: Option<f64>,
    /// Degrees of sprite tilt per unit of velocity.
    pub rotation_factor: f64,
    pub max_rotation: f64,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_impulse: -10.0,
            start_position: None,
            rotation_factor: 3.0,
            max_rotation: 90.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    /// Vertical opening between the upper and lower segment.
    pub gap: f64,
    pub width: f64,
    pub spawn_period_ms: u64,
    /// Leftward travel per reference frame, before scaling.
    pub speed: f64,
    pub placement: Placement,
    pub speed_scaling: Option<SpeedScaling>,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            gap: 150.0,
            width: 60.0,
            spawn_period_ms: 1500,
            speed: 3.0,
            placement: Placement::default(),
            speed_scaling: None,
        }
    }
}

impl ObstacleConfig {
    pub fn spawn_period(&self) -> Duration {
        Duration::from_millis(self.spawn_period_ms)
    }
}

/// How the upper segment height of a new obstacle is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// `upper ∈ [top, height − gap − bottom]`.
    Margins { top: f64, bottom: f64 },
    /// `upper ∈ [min, max] × (height − gap)`.
    Fraction { min: f64, max: f64 },
}

impl Default for Placement {
    fn default() -> Self {
        Self::Margins {
            top: 50.0,
            bottom: 100.0,
        }
    }
}

/// Obstacle speed grows with the world width so that wider screens don't
/// feel slower.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SpeedScaling {
    pub reference_width: f64,
    pub min_scale: f64,
}

/// Sprite footprint and the smaller collision box inside it, both centred on
/// the flight position plus an offset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HitboxConfig {
    pub sprite_width: f64,
    pub sprite_height: f64,
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for HitboxConfig {
    fn default() -> Self {
        Self {
            sprite_width: 40.0,
            sprite_height: 30.0,
            width: 28.0,
            height: 20.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl GameConfig {
    /// Default location: `<config dir>/skyhop/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "skyhop").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        let world = &self.world;
        if world.width <= 0.0 || world.height <= 0.0 {
            return invalid(format!(
                "world must have a positive size, got {}x{}",
                world.width, world.height
            ));
        }
        if self.clock.reference_period_ms <= 0.0 {
            return invalid("clock.reference_period_ms must be positive".into());
        }
        if self.clock.max_delta.is_some_and(|max| max <= 0.0) {
            return invalid("clock.max_delta must be positive".into());
        }

        let obstacles = &self.obstacles;
        if obstacles.gap <= 0.0 || obstacles.gap >= world.height {
            return invalid(format!(
                "obstacles.gap must be in (0, {}), got {}",
                world.height, obstacles.gap
            ));
        }
        if obstacles.width <= 0.0 || obstacles.speed <= 0.0 {
            return invalid("obstacles.width and obstacles.speed must be positive".into());
        }
        if obstacles.spawn_period_ms == 0 {
            return invalid("obstacles.spawn_period_ms must be positive".into());
        }
        match obstacles.placement {
            Placement::Margins { top, bottom } => {
                if top < 0.0 || bottom < 0.0 {
                    return invalid("placement margins must not be negative".into());
                }
                let available = world.height - obstacles.gap;
                if top + bottom > available {
                    return invalid(format!(
                        "placement margins {top} + {bottom} leave no room for a gap of {} \
                         in a world {} high",
                        obstacles.gap, world.height
                    ));
                }
            }
            Placement::Fraction { min, max } => {
                if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) || min > max {
                    return invalid(format!(
                        "placement fractions must satisfy 0 <= min <= max <= 1, got {min}..{max}"
                    ));
                }
            }
        }
        if let Some(scaling) = obstacles.speed_scaling {
            if scaling.reference_width <= 0.0 || scaling.min_scale <= 0.0 {
                return invalid("speed_scaling values must be positive".into());
            }
        }

        let hitbox = &self.hitbox;
        if hitbox.width <= 0.0 || hitbox.height <= 0.0 {
            return invalid("hitbox must have a positive size".into());
        }
        if hitbox.width > hitbox.sprite_width || hitbox.height > hitbox.sprite_height {
            return invalid("hitbox must not be larger than the sprite".into());
        }
        Ok(())
    }
}

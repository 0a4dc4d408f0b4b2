//! Arena settings
//!
//! Read once before the simulation starts. Everything is validated up front;
//! a bad entry is an error, never silently dropped.

use std::collections::HashMap;
use std::path::Path;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::kind::{ALL_KINDS, ThrowKind};

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unknown throw kind `{0}`")]
    UnknownKind(String),
    #[error("missing parameter `{0}`")]
    MissingParameter(&'static str),
    #[error("parameter `{name}` has {actual} entries, expected {expected}")]
    MismatchedLengths {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("parameter `{name}` entry {index} is not an integer: `{value}`")]
    InvalidInteger {
        name: &'static str,
        index: usize,
        value: String,
    },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: i64 },
    #[error("{name} must be at most {}, got {value}", MAX_COORDINATE)]
    TooLarge { name: &'static str, value: i32 },
    #[error("{name} of throw {index} is {value}, outside ±{}", MAX_COORDINATE)]
    OutOfRange {
        name: &'static str,
        index: usize,
        value: i32,
    },
    #[error("throw {index} has a negative box size {width}x{height}")]
    NegativeSize { index: usize, width: i32, height: i32 },
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}

/// Initial placement of one throw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowSpec {
    pub kind: ThrowKind,
    /// Bottom-left anchor
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub vx: i32,
    #[serde(default)]
    pub vy: i32,
    /// Explicit box size; the kind's default when absent
    #[serde(default)]
    pub size: Option<IVec2>,
}

impl ThrowSpec {
    pub fn new(kind: ThrowKind, x: i32, y: i32, vx: i32, vy: i32) -> Self {
        Self {
            kind,
            x,
            y,
            vx,
            vy,
            size: None,
        }
    }

    pub fn with_size(mut self, size: IVec2) -> Self {
        self.size = Some(size);
        self
    }
}

/// Complete arena configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub screen_width: i32,
    pub screen_height: i32,
    /// Delay between motion ticks (ms)
    pub tick_delay_ms: u32,
    /// How long without a resolving collision before the game ends (ms)
    pub timeout_ms: u32,
    /// How long motion stays paused after a collision (ms)
    pub collision_pause_ms: u32,
    /// Throws in scan order
    pub throws: Vec<ThrowSpec>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            tick_delay_ms: DEFAULT_TICK_DELAY_MS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            collision_pause_ms: DEFAULT_COLLISION_PAUSE_MS,
            throws: demo_lineup(),
        }
    }
}

/// One of every kind, spread out and heading in different directions
fn demo_lineup() -> Vec<ThrowSpec> {
    vec![
        ThrowSpec::new(ThrowKind::Rock, 50, 100, 3, 1),
        ThrowSpec::new(ThrowKind::Paper, 650, 120, -2, 2),
        ThrowSpec::new(ThrowKind::Scissors, 300, 550, 0, -3),
        ThrowSpec::new(ThrowKind::Spock, 100, 400, 2, -2),
        ThrowSpec::new(ThrowKind::Lizard, 500, 300, -3, 0),
        ThrowSpec::new(ThrowKind::Blackhole, 380, 250, 1, 1),
    ]
}

impl Settings {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read a JSON settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded {} throws from {}",
            settings.throws.len(),
            path.display()
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build from applet-style parameters
    ///
    /// Required: `throws`, `xCoords`, `yCoords`, `speedXs`, `speedYs` as
    /// comma-separated lists of equal length, plus `delay`, `timeout` and
    /// `collisionOut`. Optional: `width`, `height`.
    pub fn from_params<'a, I>(params: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let params: HashMap<&str, &str> = params.into_iter().collect();
        let lookup = |name: &'static str| {
            params
                .get(name)
                .copied()
                .ok_or(SettingsError::MissingParameter(name))
        };

        let kinds = lookup("throws")?
            .split(',')
            .map(str::parse::<ThrowKind>)
            .collect::<Result<Vec<_>, _>>()?;
        let xs = parse_list("xCoords", lookup("xCoords")?, kinds.len())?;
        let ys = parse_list("yCoords", lookup("yCoords")?, kinds.len())?;
        let vxs = parse_list("speedXs", lookup("speedXs")?, kinds.len())?;
        let vys = parse_list("speedYs", lookup("speedYs")?, kinds.len())?;

        let throws = kinds
            .into_iter()
            .enumerate()
            .map(|(i, kind)| ThrowSpec::new(kind, xs[i], ys[i], vxs[i], vys[i]))
            .collect();

        let settings = Self {
            screen_width: optional_int(&params, "width", DEFAULT_SCREEN_WIDTH)?,
            screen_height: optional_int(&params, "height", DEFAULT_SCREEN_HEIGHT)?,
            tick_delay_ms: parse_duration("delay", lookup("delay")?)?,
            timeout_ms: parse_duration("timeout", lookup("timeout")?)?,
            collision_pause_ms: parse_duration("collisionOut", lookup("collisionOut")?)?,
            throws,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Seeded random layout of `count` throws on the default timings
    ///
    /// Roughly one throw in twelve is a Blackhole.
    pub fn random_layout(seed: u64, count: usize, screen: IVec2) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let cyclic = &ALL_KINDS[..ALL_KINDS.len() - 1];

        let throws = (0..count)
            .map(|_| {
                let kind = if rng.random_ratio(1, 12) {
                    ThrowKind::Blackhole
                } else {
                    cyclic[rng.random_range(0..cyclic.len())]
                };
                ThrowSpec::new(
                    kind,
                    rng.random_range(0..screen.x.max(1)),
                    rng.random_range(1..=screen.y.max(1)),
                    rng.random_range(-4..=4),
                    rng.random_range(-4..=4),
                )
            })
            .collect();

        Self {
            screen_width: screen.x,
            screen_height: screen.y,
            throws,
            ..Self::default()
        }
    }

    /// Check every value the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("screen_width", self.screen_width as i64)?;
        positive("screen_height", self.screen_height as i64)?;
        at_most("screen_width", self.screen_width)?;
        at_most("screen_height", self.screen_height)?;
        positive("tick_delay_ms", self.tick_delay_ms as i64)?;
        positive("timeout_ms", self.timeout_ms as i64)?;
        positive("collision_pause_ms", self.collision_pause_ms as i64)?;

        for (index, spec) in self.throws.iter().enumerate() {
            let fields = [("x", spec.x), ("y", spec.y), ("vx", spec.vx), ("vy", spec.vy)];
            for (name, value) in fields {
                in_range(name, index, value)?;
            }
            if let Some(size) = spec.size {
                in_range("width", index, size.x)?;
                in_range("height", index, size.y)?;
                if size.x < 0 || size.y < 0 {
                    return Err(SettingsError::NegativeSize {
                        index,
                        width: size.x,
                        height: size.y,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn screen(&self) -> IVec2 {
        IVec2::new(self.screen_width, self.screen_height)
    }
}

fn positive(name: &'static str, value: i64) -> Result<(), SettingsError> {
    if value > 0 {
        Ok(())
    } else {
        Err(SettingsError::NonPositive { name, value })
    }
}

fn at_most(name: &'static str, value: i32) -> Result<(), SettingsError> {
    if value <= MAX_COORDINATE {
        Ok(())
    } else {
        Err(SettingsError::TooLarge { name, value })
    }
}

fn in_range(name: &'static str, index: usize, value: i32) -> Result<(), SettingsError> {
    if (-MAX_COORDINATE..=MAX_COORDINATE).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange { name, index, value })
    }
}

fn parse_int(name: &'static str, index: usize, raw: &str) -> Result<i32, SettingsError> {
    raw.trim()
        .parse()
        .map_err(|_| SettingsError::InvalidInteger {
            name,
            index,
            value: raw.to_string(),
        })
}

fn parse_list(name: &'static str, raw: &str, expected: usize) -> Result<Vec<i32>, SettingsError> {
    let values = raw
        .split(',')
        .enumerate()
        .map(|(index, value)| parse_int(name, index, value))
        .collect::<Result<Vec<_>, _>>()?;
    if values.len() != expected {
        return Err(SettingsError::MismatchedLengths {
            name,
            expected,
            actual: values.len(),
        });
    }
    Ok(values)
}

fn parse_duration(name: &'static str, raw: &str) -> Result<u32, SettingsError> {
    let value = parse_int(name, 0, raw)?;
    positive(name, value as i64)?;
    Ok(value as u32)
}

fn optional_int(
    params: &HashMap<&str, &str>,
    name: &'static str,
    default: i32,
) -> Result<i32, SettingsError> {
    params
        .get(name)
        .map_or(Ok(default), |raw| parse_int(name, 0, raw))
}

use crate::constants::*;
use crate::error::ConfigError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

pub const CONFIG_FILE: &str = "boilsim_config.toml";

static CONFIG: OnceLock<Mutex<BoilSimConfig>> = OnceLock::new();

/// Get a copy of the current configuration, loading from file if not already loaded.
///
/// A missing or broken config file is not fatal: defaults are used instead.
pub fn get_config() -> BoilSimConfig {
    let config_mutex = CONFIG.get_or_init(|| Mutex::new(load_or_default(CONFIG_FILE)));
    config_mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Re-read the config file and replace the cached copy.
/// On failure the cached copy is left as it was.
pub fn reload_config() -> Result<BoilSimConfig, ConfigError> {
    let new_config = BoilSimConfig::load_from_file(CONFIG_FILE)?;

    let config_mutex = CONFIG.get_or_init(|| Mutex::new(new_config.clone()));
    *config_mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = new_config.clone();

    info!("Reloaded {}", CONFIG_FILE);
    Ok(new_config)
}

fn load_or_default(path: &str) -> BoilSimConfig {
    match BoilSimConfig::load_from_file(path) {
        Ok(config) => config,
        Err(err) => {
            warn!("Using default simulation config ({path}: {err})");
            BoilSimConfig::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoilSimConfig {
    pub thermal: ThermalConfig,
    pub coupling: CouplingConfig,
    pub bubbles: ParticleSystemConfig,
    pub steam: ParticleSystemConfig,
    pub simulation: SimulationConfig,
}

/// Fixed rates of the heating / evaporation / cooling rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalConfig {
    pub boiling_point: f32,
    pub heat_rate: f32,
    pub cool_rate: f32,
    pub mass_loss_rate: f32,
    pub ambient: f32,
    pub max_mass: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouplingConfig {
    pub max_bubbles: usize,
    pub min_steam_opacity: f32,
    pub max_steam_opacity: f32,
    pub liquid_min_scale: f32,
    pub liquid_max_scale: f32,
    pub liquid_min_height: f32,
    pub liquid_max_height: f32,
}

/// Spawn band, travel bound and speed distribution of one particle system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSystemConfig {
    /// Particles spawn with x and z in `[-spawn_half_extent, spawn_half_extent)`
    pub spawn_half_extent: f32,
    pub spawn_y_min: f32,
    pub spawn_y_max: f32,
    /// A particle whose y exceeds this is respawned
    pub upper_bound: f32,
    /// Height a respawned particle restarts from
    pub respawn_y: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub default_speed: f32,
    pub capacity: usize,
    pub resizable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub initial_temperature: f32,
    pub initial_mass: f32,
    /// Fixed seed for reproducible runs; a fresh one is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            boiling_point: BOILING_POINT,
            heat_rate: HEAT_RATE,
            cool_rate: COOL_RATE,
            mass_loss_rate: MASS_LOSS_RATE,
            ambient: AMBIENT_TEMPERATURE,
            max_mass: MAX_MASS,
        }
    }
}

impl Default for CouplingConfig {
    fn default() -> Self {
        Self {
            max_bubbles: MAX_BUBBLES,
            min_steam_opacity: STEAM_MIN_OPACITY,
            max_steam_opacity: STEAM_MAX_OPACITY,
            liquid_min_scale: LIQUID_MIN_SCALE,
            liquid_max_scale: LIQUID_MAX_SCALE,
            liquid_min_height: LIQUID_MIN_HEIGHT,
            liquid_max_height: LIQUID_MAX_HEIGHT,
        }
    }
}

impl ParticleSystemConfig {
    pub fn bubbles() -> Self {
        Self {
            spawn_half_extent: 2.5,
            spawn_y_min: 0.0,
            spawn_y_max: 0.1,
            upper_bound: LIQUID_MAX_HEIGHT,
            respawn_y: 0.1,
            speed_min: 0.02,
            speed_max: 0.04,
            default_speed: DEFAULT_PARTICLE_SPEED,
            capacity: INITIAL_BUBBLES,
            resizable: true,
        }
    }

    pub fn steam() -> Self {
        Self {
            spawn_half_extent: 1.0,
            spawn_y_min: 5.0,
            spawn_y_max: 5.5,
            upper_bound: 10.0,
            respawn_y: 5.0,
            speed_min: 0.01,
            speed_max: 0.02,
            default_speed: DEFAULT_PARTICLE_SPEED,
            capacity: STEAM_PARTICLES,
            resizable: false,
        }
    }

    /// Lowest y a particle of this system can ever hold
    pub fn lower_bound(&self) -> f32 {
        self.spawn_y_min.min(self.respawn_y)
    }

    pub fn spawn_jitter_range(&self) -> Range<f32> {
        -self.spawn_half_extent..self.spawn_half_extent
    }

    pub fn speed_range(&self) -> Range<f32> {
        self.speed_min..self.speed_max
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_temperature: INITIAL_TEMPERATURE,
            initial_mass: INITIAL_MASS,
            seed: None,
        }
    }
}

impl Default for BoilSimConfig {
    fn default() -> Self {
        Self {
            thermal: ThermalConfig::default(),
            coupling: CouplingConfig::default(),
            bubbles: ParticleSystemConfig::bubbles(),
            steam: ParticleSystemConfig::steam(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl BoilSimConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BoilSimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the model cannot run with. Everything else is clamped at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        let thermal = &self.thermal;
        if !is_positive(thermal.boiling_point) {
            return Err(invalid("thermal.boiling_point", "must be positive"));
        }
        if !is_positive(thermal.max_mass) {
            return Err(invalid("thermal.max_mass", "must be positive"));
        }
        for (field, rate) in [
            ("thermal.heat_rate", thermal.heat_rate),
            ("thermal.cool_rate", thermal.cool_rate),
            ("thermal.mass_loss_rate", thermal.mass_loss_rate),
        ] {
            if !is_non_negative(rate) {
                return Err(invalid(field, "must be a finite, non-negative number"));
            }
        }
        if !thermal.ambient.is_finite() {
            return Err(invalid("thermal.ambient", "must be a finite number"));
        }

        let coupling = &self.coupling;
        if coupling.max_bubbles == 0 {
            return Err(invalid("coupling.max_bubbles", "must be at least 1"));
        }
        if !is_ordered_unit_range(coupling.min_steam_opacity, coupling.max_steam_opacity) {
            return Err(invalid(
                "coupling.steam_opacity",
                "needs 0 <= min_steam_opacity <= max_steam_opacity <= 1",
            ));
        }
        if !is_ordered_unit_range(coupling.liquid_min_scale, coupling.liquid_max_scale) {
            return Err(invalid(
                "coupling.liquid_scale",
                "needs 0 <= liquid_min_scale <= liquid_max_scale <= 1",
            ));
        }
        if !coupling.liquid_min_height.is_finite()
            || !coupling.liquid_max_height.is_finite()
            || coupling.liquid_min_height > coupling.liquid_max_height
        {
            return Err(invalid(
                "coupling.liquid_height",
                "needs finite liquid_min_height <= liquid_max_height",
            ));
        }

        if !self.simulation.initial_temperature.is_finite() {
            return Err(invalid("simulation.initial_temperature", "must be a finite number"));
        }
        if !self.simulation.initial_mass.is_finite() {
            return Err(invalid("simulation.initial_mass", "must be a finite number"));
        }

        for (field, system) in [("bubbles", &self.bubbles), ("steam", &self.steam)] {
            system.validate().map_err(|reason| invalid(field, reason))?;
        }

        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn is_non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

/// `0 <= low <= high <= 1`, false for NaN
fn is_ordered_unit_range(low: f32, high: f32) -> bool {
    (0.0..=1.0).contains(&low) && (0.0..=1.0).contains(&high) && low <= high
}

impl ParticleSystemConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("spawn_half_extent", self.spawn_half_extent),
            ("spawn_y_min", self.spawn_y_min),
            ("spawn_y_max", self.spawn_y_max),
            ("upper_bound", self.upper_bound),
            ("respawn_y", self.respawn_y),
            ("speed_min", self.speed_min),
            ("speed_max", self.speed_max),
            ("default_speed", self.default_speed),
        ] {
            if !value.is_finite() {
                return Err(format!("{name} must be a finite number"));
            }
        }

        // every value is finite from here on, so plain comparisons are exact
        if self.spawn_half_extent < 0.0 {
            return Err("spawn_half_extent must not be negative".into());
        }
        if self.spawn_y_min > self.spawn_y_max {
            return Err("spawn_y_min exceeds spawn_y_max".into());
        }
        if self.speed_min > self.speed_max {
            return Err("speed_min exceeds speed_max".into());
        }
        if self.spawn_y_max > self.upper_bound || self.respawn_y > self.upper_bound {
            return Err("spawn band reaches above upper_bound".into());
        }
        Ok(())
    }
}

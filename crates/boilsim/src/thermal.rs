// Temperature / mass model of the water in the pot (engine-agnostic)

use crate::config::ThermalConfig;
use std::fmt;

/// Temperature and remaining mass of the water
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalState {
    /// Celsius
    pub temperature: f32,
    /// Kilograms, always within `[0, max_mass]`
    pub mass: f32,
}

/// Ordered by progression: a pot only ever moves forward through these
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThermalPhase {
    Heating,
    Boiling,
    BoiledDry,
}

impl ThermalState {
    pub fn new(temperature: f32, mass: f32, config: &ThermalConfig) -> Self {
        Self {
            temperature,
            mass: clamp_mass(mass, config.max_mass),
        }
    }

    /// Advance the state by one tick.
    ///
    /// Heating and evaporation are mutually exclusive within a tick: below the boiling
    /// point the water heats up, at or above it the water loses mass instead. Cooling
    /// towards ambient is checked afterwards and only applies while there is water left.
    pub fn advance(&mut self, config: &ThermalConfig) {
        if self.temperature < config.boiling_point {
            self.temperature += config.heat_rate;
        } else {
            self.mass = (self.mass - config.mass_loss_rate).max(0.0);
        }

        if self.temperature > config.ambient && self.mass > 0.0 {
            self.temperature -= config.cool_rate;
        }
    }

    /// Same as [`Self::advance`] but returns the new state instead of mutating
    pub fn advanced(mut self, config: &ThermalConfig) -> Self {
        self.advance(config);
        self
    }

    pub fn phase(&self, config: &ThermalConfig) -> ThermalPhase {
        if self.mass <= 0.0 {
            ThermalPhase::BoiledDry
        } else if self.temperature >= config.boiling_point {
            ThermalPhase::Boiling
        } else {
            ThermalPhase::Heating
        }
    }
}

fn clamp_mass(mass: f32, max_mass: f32) -> f32 {
    if mass.is_nan() {
        return max_mass;
    }
    mass.clamp(0.0, max_mass)
}

impl fmt::Display for ThermalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Temperature: {:.2} °C | Mass: {:.3} kg",
            self.temperature, self.mass
        )
    }
}

impl fmt::Display for ThermalPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ThermalPhase::Heating => "Heating",
            ThermalPhase::Boiling => "Boiling",
            ThermalPhase::BoiledDry => "Boiled dry",
        };
        f.write_str(label)
    }
}

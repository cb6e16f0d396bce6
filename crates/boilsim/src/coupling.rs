// Pure mapping from thermal state to the visual parameters of the scene

use crate::config::{CouplingConfig, ThermalConfig};
use crate::thermal::ThermalState;

/// Transform applied to the liquid surface mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidLevel {
    /// Horizontal scale of the surface, in `[liquid_min_scale, liquid_max_scale]`
    pub scale: f32,
    /// Height of the surface above the pot floor
    pub offset_y: f32,
}

/// Everything the particle systems and meshes need to react to the current temperature and mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualTargets {
    pub bubble_target: usize,
    pub steam_opacity: f32,
    pub liquid: LiquidLevel,
}

pub fn derive_targets(
    state: &ThermalState,
    coupling: &CouplingConfig,
    thermal: &ThermalConfig,
) -> VisualTargets {
    VisualTargets {
        bubble_target: bubble_target(state.temperature, coupling, thermal),
        steam_opacity: steam_opacity(state.temperature, coupling, thermal),
        liquid: liquid_level(state.mass, coupling, thermal),
    }
}

/// Number of bubbles to show, growing linearly with temperature up to `max_bubbles`
pub fn bubble_target(temperature: f32, coupling: &CouplingConfig, thermal: &ThermalConfig) -> usize {
    let max_bubbles = coupling.max_bubbles.max(1);
    let raw = (temperature / thermal.boiling_point) * max_bubbles as f32;

    // float -> int casts saturate and map NaN to 0, the clamp handles the rest
    (raw.floor() as i64).clamp(1, max_bubbles as i64) as usize
}

pub fn steam_opacity(temperature: f32, coupling: &CouplingConfig, thermal: &ThermalConfig) -> f32 {
    let heat = clamp_unit(temperature / thermal.boiling_point);
    lerp(coupling.min_steam_opacity, coupling.max_steam_opacity, heat)
}

pub fn liquid_level(mass: f32, coupling: &CouplingConfig, thermal: &ThermalConfig) -> LiquidLevel {
    let normalized_mass = clamp_unit(mass / thermal.max_mass);

    LiquidLevel {
        scale: lerp(coupling.liquid_min_scale, coupling.liquid_max_scale, normalized_mass),
        offset_y: lerp(coupling.liquid_min_height, coupling.liquid_max_height, normalized_mass),
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp into `[0, 1]`, treating NaN as 0
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

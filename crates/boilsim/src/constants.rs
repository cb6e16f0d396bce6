pub const BOILING_POINT: f32 = 100.0;
pub const HEAT_RATE: f32 = 0.1;
pub const COOL_RATE: f32 = 0.05;
pub const MASS_LOSS_RATE: f32 = 0.001;
pub const AMBIENT_TEMPERATURE: f32 = 25.0;
pub const MAX_MASS: f32 = 5.0;

pub const INITIAL_TEMPERATURE: f32 = AMBIENT_TEMPERATURE;
pub const INITIAL_MASS: f32 = MAX_MASS;

pub const MAX_BUBBLES: usize = 500;
pub const INITIAL_BUBBLES: usize = 200;
pub const STEAM_PARTICLES: usize = 100;

/// Substituted for any particle speed that is missing or not a number
pub const DEFAULT_PARTICLE_SPEED: f32 = 0.02;

// Liquid surface, in world units relative to the pot floor
pub const LIQUID_MIN_SCALE: f32 = 0.1;
pub const LIQUID_MAX_SCALE: f32 = 1.0;
pub const LIQUID_MIN_HEIGHT: f32 = 0.1;
pub const LIQUID_MAX_HEIGHT: f32 = 4.9;

pub const STEAM_MIN_OPACITY: f32 = 0.5;
pub const STEAM_MAX_OPACITY: f32 = 1.0;

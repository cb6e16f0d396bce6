pub use crate::config::{BoilSimConfig, CouplingConfig, ParticleSystemConfig, ThermalConfig};
pub use crate::coupling::{LiquidLevel, VisualTargets, derive_targets};
pub use crate::error::ConfigError;
pub use crate::particles::ParticleBuffer;
pub use crate::simulation::{FrameReport, Simulation};
pub use crate::thermal::{ThermalPhase, ThermalState};

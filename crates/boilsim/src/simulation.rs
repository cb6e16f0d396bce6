// Per-tick orchestration of the thermal model, coupling and particle buffers

use crate::config::BoilSimConfig;
use crate::coupling::{VisualTargets, derive_targets};
use crate::particles::ParticleBuffer;
use crate::thermal::{ThermalPhase, ThermalState};
use crate::tools::{generate_seed, seeded_rng};
use log::{debug, info};
use rand::rngs::StdRng;

/// Summary of one completed tick. Receiving it means all state for the frame is final
/// and the buffers can be uploaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub tick: u64,
    pub thermal: ThermalState,
    pub phase: ThermalPhase,
    pub targets: VisualTargets,
    pub bubbles_resized: bool,
    pub respawned: usize,
}

/// The whole simulation context: thermal state, both particle systems and the RNG
/// that feeds them. Owned by the host, advanced with [`Simulation::step`].
#[derive(Debug, Clone)]
pub struct Simulation {
    config: BoilSimConfig,
    seed: u64,
    rng: StdRng,
    thermal: ThermalState,
    phase: ThermalPhase,
    targets: VisualTargets,
    bubbles: ParticleBuffer,
    steam: ParticleBuffer,
    tick: u64,
}

impl Simulation {
    /// Start a simulation, using the configured seed or a fresh random one
    pub fn new(config: BoilSimConfig) -> Self {
        let seed = config.simulation.seed.unwrap_or_else(generate_seed);
        Self::with_seed(config, seed)
    }

    pub fn with_seed(config: BoilSimConfig, seed: u64) -> Self {
        let mut rng = seeded_rng(seed);

        let thermal = ThermalState::new(
            config.simulation.initial_temperature,
            config.simulation.initial_mass,
            &config.thermal,
        );
        let phase = thermal.phase(&config.thermal);
        let targets = derive_targets(&thermal, &config.coupling, &config.thermal);

        let bubbles = ParticleBuffer::new(config.bubbles.clone(), &mut rng);
        let steam = ParticleBuffer::new(config.steam.clone(), &mut rng);

        info!(
            "Simulation started with seed {seed}: {thermal}, {} bubbles, {} steam particles",
            bubbles.capacity(),
            steam.capacity()
        );

        Self {
            config,
            seed,
            rng,
            thermal,
            phase,
            targets,
            bubbles,
            steam,
            tick: 0,
        }
    }

    /// Run one tick: thermal update, derive visual targets, resize bubbles if the
    /// target changed, advance both particle systems.
    pub fn step(&mut self) -> FrameReport {
        self.thermal.advance(&self.config.thermal);
        self.tick += 1;

        // while boiling the temperature dips just under the boiling point every other
        // tick, so the phase only ever moves forward
        let phase = self.phase.max(self.thermal.phase(&self.config.thermal));
        if phase != self.phase {
            info!("Tick {}: {} -> {} ({})", self.tick, self.phase, phase, self.thermal);
            self.phase = phase;
        }

        self.targets = derive_targets(&self.thermal, &self.config.coupling, &self.config.thermal);

        let previous_bubbles = self.bubbles.capacity();
        let bubbles_resized = self.bubbles.resize(self.targets.bubble_target, &mut self.rng);
        if bubbles_resized {
            debug!(
                "Tick {}: bubble buffer resized {} -> {}",
                self.tick, previous_bubbles, self.targets.bubble_target
            );
        }

        let respawned = self.bubbles.tick(&mut self.rng) + self.steam.tick(&mut self.rng);

        FrameReport {
            tick: self.tick,
            thermal: self.thermal,
            phase: self.phase,
            targets: self.targets,
            bubbles_resized,
            respawned,
        }
    }

    /// Restart from the initial state with the same seed
    pub fn reset(&mut self) {
        *self = Self::with_seed(self.config.clone(), self.seed);
    }

    pub fn config(&self) -> &BoilSimConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn thermal(&self) -> &ThermalState {
        &self.thermal
    }

    pub fn phase(&self) -> ThermalPhase {
        self.phase
    }

    /// Targets derived on the last tick (or from the initial state before the first one)
    pub fn targets(&self) -> &VisualTargets {
        &self.targets
    }

    pub fn bubbles(&self) -> &ParticleBuffer {
        &self.bubbles
    }

    pub fn steam(&self) -> &ParticleBuffer {
        &self.steam
    }
}

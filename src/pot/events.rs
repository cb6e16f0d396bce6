use bevy::prelude::*;

/// Restart the simulation from its initial state with the same seed
#[derive(Message)]
pub struct ResetSimulationEvent;

#[derive(Message)]
pub struct TogglePauseEvent;

/// Re-read the config file and restart with it
#[derive(Message)]
pub struct ReloadConfigEvent;

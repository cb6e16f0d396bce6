pub mod components;
pub mod events;
pub mod resources;
pub mod systems;

use crate::pot::events::*;
use crate::pot::resources::BoilingSimulation;
use crate::pot::systems::*;
use bevy::prelude::*;

pub struct PotPlugin;

impl Plugin for PotPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ResetSimulationEvent>()
            .add_message::<TogglePauseEvent>()
            .add_message::<ReloadConfigEvent>()
            .init_resource::<BoilingSimulation>()
            .add_systems(Startup, spawn_pot_scene)
            // physics first, then everything that reads the finished frame
            .add_systems(
                Update,
                (
                    handle_simulation_events,
                    step_simulation,
                    sync_particle_meshes,
                    sync_liquid_surface,
                    sync_steam_opacity,
                )
                    .chain(),
            );
    }
}

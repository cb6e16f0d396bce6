use crate::helpers::mesh::{open_cylinder_mesh, point_cloud_mesh, set_point_positions};
use crate::pot::components::{LiquidSurface, ParticleCloud, PotEntity};
use crate::pot::events::{ReloadConfigEvent, ResetSimulationEvent, TogglePauseEvent};
use crate::pot::resources::BoilingSimulation;
use bevy::prelude::*;
use boilsim::prelude::{LiquidLevel, Simulation};
use std::f32::consts::FRAC_PI_2;

const POT_RADIUS: f32 = 3.0;
const POT_HEIGHT: f32 = 5.0;
const POT_SEGMENTS: u32 = 32;

pub fn spawn_pot_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    simulation: Res<BoilingSimulation>,
) {
    let sim = &simulation.inner;

    commands.spawn((
        Mesh3d(meshes.add(open_cylinder_mesh(POT_RADIUS, POT_HEIGHT, POT_SEGMENTS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba_u8(0xaa, 0xaa, 0xaa, 128),
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::from_xyz(0.0, POT_HEIGHT / 2.0, 0.0),
        PotEntity,
    ));

    commands.spawn((
        Mesh3d(meshes.add(Circle::new(POT_RADIUS).mesh().resolution(POT_SEGMENTS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba_u8(0x1e, 0x90, 0xff, 204),
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        liquid_transform(&sim.targets().liquid),
        LiquidSurface,
    ));

    commands.spawn((
        Mesh3d(meshes.add(point_cloud_mesh(sim.bubbles().position_arrays()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 1.0, 1.0, 0.8),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        ParticleCloud::Bubbles,
    ));

    commands.spawn((
        Mesh3d(meshes.add(point_cloud_mesh(sim.steam().position_arrays()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 1.0, 1.0, sim.targets().steam_opacity),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        ParticleCloud::Steam,
    ));

    info!(
        "Pot scene spawned: {} bubbles, {} steam particles",
        sim.bubbles().capacity(),
        sim.steam().capacity()
    );
}

/// Disc lies flat (rotated into the XZ plane), scaled horizontally and lifted with the water level
pub fn liquid_transform(liquid: &LiquidLevel) -> Transform {
    Transform::from_xyz(0.0, liquid.offset_y, 0.0)
        .with_rotation(Quat::from_rotation_x(-FRAC_PI_2))
        .with_scale(Vec3::new(liquid.scale, liquid.scale, 1.0))
}

pub fn handle_simulation_events(
    mut reset_events: MessageReader<ResetSimulationEvent>,
    mut pause_events: MessageReader<TogglePauseEvent>,
    mut reload_events: MessageReader<ReloadConfigEvent>,
    mut simulation: ResMut<BoilingSimulation>,
) {
    for _ in pause_events.read() {
        simulation.paused = !simulation.paused;
        info!("Simulation {}", if simulation.paused { "paused" } else { "resumed" });
    }

    for _ in reset_events.read() {
        simulation.inner.reset();
        simulation.last_report = None;
        info!("Simulation reset (seed {})", simulation.inner.seed());
    }

    for _ in reload_events.read() {
        match boilsim::reload_config() {
            Ok(config) => {
                simulation.replace(Simulation::new(config));
                info!("Simulation restarted with reloaded config");
            }
            Err(err) => warn!("Keeping current config: {err}"),
        }
    }
}

/// One simulation tick per rendered frame
pub fn step_simulation(mut simulation: ResMut<BoilingSimulation>) {
    simulation.step();
}

pub fn sync_particle_meshes(
    simulation: Res<BoilingSimulation>,
    clouds: Query<(&ParticleCloud, &Mesh3d)>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    if !simulation.is_changed() {
        return;
    }

    for (cloud, mesh_handle) in clouds.iter() {
        let Some(mesh) = meshes.get_mut(&mesh_handle.0) else {
            continue;
        };
        let buffer = match cloud {
            ParticleCloud::Bubbles => simulation.inner.bubbles(),
            ParticleCloud::Steam => simulation.inner.steam(),
        };
        set_point_positions(mesh, buffer.position_arrays());
    }
}

pub fn sync_liquid_surface(
    simulation: Res<BoilingSimulation>,
    mut surfaces: Query<&mut Transform, With<LiquidSurface>>,
) {
    if !simulation.is_changed() {
        return;
    }

    let liquid = simulation.inner.targets().liquid;
    for mut transform in surfaces.iter_mut() {
        *transform = liquid_transform(&liquid);
    }
}

pub fn sync_steam_opacity(
    simulation: Res<BoilingSimulation>,
    clouds: Query<(&ParticleCloud, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !simulation.is_changed() {
        return;
    }

    let opacity = simulation.inner.targets().steam_opacity;
    for (cloud, material_handle) in clouds.iter() {
        if *cloud != ParticleCloud::Steam {
            continue;
        }
        if let Some(material) = materials.get_mut(&material_handle.0) {
            let mut color = material.base_color.to_srgba();
            color.alpha = opacity;
            material.base_color = color.into();
        }
    }
}

use bevy::prelude::*;

/// The container walls
#[derive(Component)]
pub struct PotEntity;

/// Water surface disc, moved and scaled with the remaining mass
#[derive(Component)]
pub struct LiquidSurface;

/// Point cloud mesh mirroring one of the simulation's particle buffers
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleCloud {
    Bubbles,
    Steam,
}

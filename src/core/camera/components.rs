use crate::core::camera::logic::Orbit;
use bevy::prelude::*;

#[derive(Component, Reflect)]
pub struct MainCamera;

/// Orbit state of the camera it's attached to
#[derive(Component)]
pub struct OrbitCamera(pub Orbit);

use crate::core::camera::components::{MainCamera, OrbitCamera};
use crate::core::camera::logic::{Orbit, OrbitInput, calculate_camera_transform, update_orbit};
use bevy::input::ButtonInput;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::light::{AmbientLight, DirectionalLight};
use bevy::prelude::*;

const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 5.0, 10.0);
const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 2.5, 0.0);

pub fn spawn_camera(mut commands: Commands) {
    let orbit = Orbit::from_position(CAMERA_POSITION, CAMERA_TARGET);
    let update = calculate_camera_transform(&orbit);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 45.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Transform::from_translation(update.translation).with_rotation(update.rotation),
        AmbientLight {
            color: Color::srgb_u8(0x40, 0x40, 0x40),
            brightness: 2000.0,
            ..default()
        },
        MainCamera,
        OrbitCamera(orbit),
    ));

    commands.spawn((
        Transform::from_xyz(5.0, 10.0, 7.5).looking_at(Vec3::ZERO, Vec3::Y),
        DirectionalLight::default(),
    ));

    info!("Camera spawned");
}

pub fn camera_control(
    mouse_input: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut camera_q: Query<(&mut Transform, &mut OrbitCamera), With<MainCamera>>,
) {
    let Ok((mut transform, mut orbit)) = camera_q.single_mut() else {
        return;
    };

    let input = OrbitInput {
        rotate_pressed: mouse_input.pressed(MouseButton::Left),
        mouse_delta: mouse_motion.read().map(|ev| ev.delta).sum(),
        mouse_wheel_delta: mouse_wheel.read().map(|ev| ev.y).sum(),
    };

    let updated = update_orbit(orbit.0, &input);
    if updated == orbit.0 {
        return;
    }

    let update = calculate_camera_transform(&updated);
    transform.translation = update.translation;
    transform.rotation = update.rotation;
    orbit.0 = updated;
}

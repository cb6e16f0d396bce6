use bevy::math::{EulerRot, Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

const ROTATE_SENSITIVITY: f32 = 0.005;
const ZOOM_STEP: f32 = 0.5;
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.05;
pub const MIN_DISTANCE: f32 = 3.0;
pub const MAX_DISTANCE: f32 = 40.0;

pub struct OrbitInput {
    pub rotate_pressed: bool,
    pub mouse_delta: Vec2,
    pub mouse_wheel_delta: f32,
}

/// Camera position on a sphere around `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub target: Vec3,
    /// Rotation around the Y axis, 0 means the camera sits on +Z
    pub yaw: f32,
    /// Elevation above the target's horizontal plane
    pub pitch: f32,
    pub distance: f32,
}

pub struct CameraTransformUpdate {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Orbit {
    /// Orbit that places the camera at `position` looking at `target`
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let pitch = (offset.y / offset.length().max(f32::EPSILON)).clamp(-1.0, 1.0).asin();
        let yaw = offset.x.atan2(offset.z);

        Self {
            target,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            distance,
        }
    }
}

/// Apply mouse input to the orbit. Dragging rotates, the wheel zooms towards the target.
pub fn update_orbit(orbit: Orbit, input: &OrbitInput) -> Orbit {
    let mut orbit = orbit;

    if input.rotate_pressed && input.mouse_delta.length_squared() > 0.0 {
        orbit.yaw -= input.mouse_delta.x * ROTATE_SENSITIVITY;
        orbit.pitch = (orbit.pitch + input.mouse_delta.y * ROTATE_SENSITIVITY)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    if input.mouse_wheel_delta.abs() > 0.0 {
        orbit.distance =
            (orbit.distance - input.mouse_wheel_delta * ZOOM_STEP).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    orbit
}

pub fn calculate_camera_transform(orbit: &Orbit) -> CameraTransformUpdate {
    let (sin_pitch, cos_pitch) = orbit.pitch.sin_cos();
    let (sin_yaw, cos_yaw) = orbit.yaw.sin_cos();
    let offset = Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * orbit.distance;

    CameraTransformUpdate {
        translation: orbit.target + offset,
        rotation: Quat::from_euler(EulerRot::YXZ, orbit.yaw, -orbit.pitch, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn default_input() -> OrbitInput {
        OrbitInput {
            rotate_pressed: false,
            mouse_delta: Vec2::ZERO,
            mouse_wheel_delta: 0.0,
        }
    }

    fn start_orbit() -> Orbit {
        Orbit::from_position(Vec3::new(0.0, 5.0, 10.0), Vec3::new(0.0, 2.5, 0.0))
    }

    #[test]
    fn test_from_position_roundtrip() {
        let position = Vec3::new(0.0, 5.0, 10.0);
        let target = Vec3::new(0.0, 2.5, 0.0);

        let result = calculate_camera_transform(&Orbit::from_position(position, target));

        assert!((result.translation - position).length() < 1e-4, "was {}", result.translation);
    }

    #[rstest]
    #[case(Vec3::new(0.0, 5.0, 10.0))]
    #[case(Vec3::new(8.0, 3.0, -4.0))]
    #[case(Vec3::new(-6.0, 9.0, 2.0))]
    fn test_camera_faces_target(#[case] position: Vec3) {
        let target = Vec3::new(0.0, 2.5, 0.0);

        let result = calculate_camera_transform(&Orbit::from_position(position, target));
        let forward = result.rotation.mul_vec3(Vec3::NEG_Z);
        let expected = (target - result.translation).normalize();

        assert!((forward - expected).length() < 1e-4, "forward {forward}, expected {expected}");
    }

    #[test]
    fn test_no_input_no_change() {
        let orbit = start_orbit();

        let result = update_orbit(orbit, &default_input());

        assert_eq!(result, orbit);
    }

    #[test]
    fn test_rotation_requires_button() {
        let orbit = start_orbit();
        let mut input = default_input();
        input.mouse_delta = Vec2::new(100.0, 100.0);

        let result = update_orbit(orbit, &input);

        assert_eq!(result, orbit);
    }

    #[rstest]
    #[case(100.0, 0.0, -0.5, 0.0)] // drag right orbits left
    #[case(-100.0, 0.0, 0.5, 0.0)]
    #[case(0.0, 20.0, 0.0, 0.1)] // drag down raises the camera
    #[case(0.0, -20.0, 0.0, -0.1)]
    fn test_drag_rotates(
        #[case] delta_x: f32,
        #[case] delta_y: f32,
        #[case] expected_yaw_change: f32,
        #[case] expected_pitch_change: f32,
    ) {
        let orbit = start_orbit();
        let mut input = default_input();
        input.rotate_pressed = true;
        input.mouse_delta = Vec2::new(delta_x, delta_y);

        let result = update_orbit(orbit, &input);

        assert!((result.yaw - orbit.yaw - expected_yaw_change).abs() < 1e-5);
        assert!((result.pitch - orbit.pitch - expected_pitch_change).abs() < 1e-5);
        assert_eq!(result.distance, orbit.distance);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut input = default_input();
        input.rotate_pressed = true;
        input.mouse_delta = Vec2::new(0.0, 10_000.0);

        let result = update_orbit(start_orbit(), &input);

        assert_eq!(result.pitch, PITCH_LIMIT);
    }

    #[rstest]
    #[case(2.0, -1.0)] // scroll forward zooms in
    #[case(-2.0, 1.0)]
    #[case(0.0, 0.0)]
    fn test_mouse_wheel_zoom(#[case] wheel_delta: f32, #[case] expected_change: f32) {
        let orbit = start_orbit();
        let mut input = default_input();
        input.mouse_wheel_delta = wheel_delta;

        let result = update_orbit(orbit, &input);

        assert!((result.distance - orbit.distance - expected_change).abs() < 1e-5);
    }

    #[rstest]
    #[case(1000.0, MIN_DISTANCE)]
    #[case(-1000.0, MAX_DISTANCE)]
    fn test_zoom_is_clamped(#[case] wheel_delta: f32, #[case] expected: f32) {
        let mut input = default_input();
        input.mouse_wheel_delta = wheel_delta;

        let result = update_orbit(start_orbit(), &input);

        assert_eq!(result.distance, expected);
    }

    #[test]
    fn test_rotation_keeps_distance_to_target() {
        let mut orbit = start_orbit();
        let mut input = default_input();
        input.rotate_pressed = true;
        input.mouse_delta = Vec2::new(37.0, -12.0);

        for _ in 0..20 {
            orbit = update_orbit(orbit, &input);
        }
        let result = calculate_camera_transform(&orbit);

        assert!(((result.translation - orbit.target).length() - orbit.distance).abs() < 1e-4);
    }
}

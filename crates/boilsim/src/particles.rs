// Fixed-capacity particle buffers for bubbles and steam

use crate::config::ParticleSystemConfig;
use glam::Vec3;
use log::debug;
use rand::Rng;
use std::ops::Range;

/// Positions plus per-particle vertical speed of one particle system.
///
/// `positions` and `speeds` always have the same length, which is the capacity
/// of the buffer. Capacity only changes through [`ParticleBuffer::resize`].
#[derive(Debug, Clone)]
pub struct ParticleBuffer {
    config: ParticleSystemConfig,
    positions: Vec<Vec3>,
    speeds: Vec<f32>,
}

impl ParticleBuffer {
    /// Allocate `config.capacity` particles scattered over the spawn band
    pub fn new(config: ParticleSystemConfig, rng: &mut impl Rng) -> Self {
        let capacity = config.capacity;
        Self::with_capacity(config, capacity, rng)
    }

    pub fn with_capacity(config: ParticleSystemConfig, capacity: usize, rng: &mut impl Rng) -> Self {
        let (positions, speeds) = populate(&config, capacity, rng);
        Self {
            config,
            positions,
            speeds,
        }
    }

    /// Move every particle up by its speed, respawning the ones that left the valid band.
    ///
    /// Returns the number of respawned particles.
    pub fn tick(&mut self, rng: &mut impl Rng) -> usize {
        let lower_bound = self.config.lower_bound();
        let mut respawned = 0;

        for (position, speed) in self.positions.iter_mut().zip(self.speeds.iter_mut()) {
            if !speed.is_finite() {
                *speed = self.config.default_speed;
            }

            position.y += *speed;

            if !position.is_finite() || position.y > self.config.upper_bound || position.y < lower_bound {
                *position = respawn_position(&self.config, rng);
                respawned += 1;
            }
        }

        respawned
    }

    /// Replace the whole buffer with `new_capacity` freshly spawned particles.
    ///
    /// Does nothing when the capacity is unchanged or the system has a fixed size.
    /// The new storage is fully populated before the old one is dropped.
    /// Returns whether the storage was replaced.
    pub fn resize(&mut self, new_capacity: usize, rng: &mut impl Rng) -> bool {
        if new_capacity == self.capacity() {
            return false;
        }
        if !self.config.resizable {
            debug!(
                "Ignoring resize of fixed-size particle buffer ({} -> {})",
                self.capacity(),
                new_capacity
            );
            return false;
        }

        let (positions, speeds) = populate(&self.config, new_capacity, rng);
        self.positions = positions;
        self.speeds = speeds;
        true
    }

    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    pub fn config(&self) -> &ParticleSystemConfig {
        &self.config
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn speeds(&self) -> &[f32] {
        &self.speeds
    }

    /// Mutable view of the speeds. The slice can't change the capacity.
    pub fn speeds_mut(&mut self) -> &mut [f32] {
        &mut self.speeds
    }

    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    /// Positions as plain arrays, the layout mesh vertex attributes expect
    pub fn position_arrays(&self) -> Vec<[f32; 3]> {
        self.positions.iter().map(|p| p.to_array()).collect()
    }
}

fn populate(config: &ParticleSystemConfig, capacity: usize, rng: &mut impl Rng) -> (Vec<Vec3>, Vec<f32>) {
    let mut positions = Vec::with_capacity(capacity);
    let mut speeds = Vec::with_capacity(capacity);

    for _ in 0..capacity {
        positions.push(spawn_position(config, rng));
        speeds.push(sample(rng, config.speed_range()));
    }

    (positions, speeds)
}

/// Initial placement: anywhere inside the spawn band
fn spawn_position(config: &ParticleSystemConfig, rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        sample(rng, config.spawn_jitter_range()),
        sample(rng, config.spawn_y_min..config.spawn_y_max),
        sample(rng, config.spawn_jitter_range()),
    )
}

/// Placement after overflowing: fresh x/z jitter, fixed restart height
fn respawn_position(config: &ParticleSystemConfig, rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        sample(rng, config.spawn_jitter_range()),
        config.respawn_y,
        sample(rng, config.spawn_jitter_range()),
    )
}

/// Uniform sample in `[start, end)`; an empty range yields `start`
fn sample(rng: &mut impl Rng, range: Range<f32>) -> f32 {
    if range.is_empty() {
        return range.start;
    }
    rng.random_range(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn assert_in_band(buffer: &ParticleBuffer) {
        let config = buffer.config();
        for p in buffer.positions() {
            assert!(p.y >= config.lower_bound() && p.y <= config.upper_bound, "y out of band: {}", p.y);
            assert!(p.x >= -config.spawn_half_extent && p.x <= config.spawn_half_extent);
            assert!(p.z >= -config.spawn_half_extent && p.z <= config.spawn_half_extent);
        }
    }

    #[rstest]
    #[case(ParticleSystemConfig::bubbles())]
    #[case(ParticleSystemConfig::steam())]
    fn test_new_fills_spawn_band(#[case] config: ParticleSystemConfig) {
        let buffer = ParticleBuffer::new(config.clone(), &mut rng());

        assert_eq!(buffer.capacity(), config.capacity);
        assert_eq!(buffer.speeds().len(), config.capacity);
        for (p, &speed) in buffer.positions().iter().zip(buffer.speeds()) {
            assert!(p.y >= config.spawn_y_min && p.y <= config.spawn_y_max);
            assert!(speed >= config.speed_min && speed <= config.speed_max);
        }
        assert_in_band(&buffer);
    }

    #[rstest]
    #[case(ParticleSystemConfig::bubbles())]
    #[case(ParticleSystemConfig::steam())]
    fn test_tick_keeps_particles_in_band(#[case] config: ParticleSystemConfig) {
        let mut rng = rng();
        let mut buffer = ParticleBuffer::new(config, &mut rng);

        let mut respawned = 0;
        for _ in 0..1000 {
            respawned += buffer.tick(&mut rng);
            assert_in_band(&buffer);
        }
        // 1000 ticks is enough travel for every particle to wrap at least once
        assert!(respawned >= buffer.capacity());
    }

    #[test]
    fn test_tick_moves_by_speed() {
        let mut rng = rng();
        let mut buffer = ParticleBuffer::new(ParticleSystemConfig::bubbles(), &mut rng);
        let before: Vec<Vec3> = buffer.positions().to_vec();

        let respawned = buffer.tick(&mut rng);

        assert_eq!(respawned, 0);
        for ((after, before), speed) in buffer.positions().iter().zip(&before).zip(buffer.speeds()) {
            assert!((after.y - (before.y + speed)).abs() < 1e-6);
            assert_eq!(after.x, before.x);
            assert_eq!(after.z, before.z);
        }
    }

    #[test]
    fn test_overflow_respawns_at_restart_height() {
        let mut rng = rng();
        let mut buffer = ParticleBuffer::new(ParticleSystemConfig::bubbles(), &mut rng);
        buffer.speeds_mut().fill(10.0);

        let respawned = buffer.tick(&mut rng);

        assert_eq!(respawned, buffer.capacity());
        for p in buffer.positions() {
            assert_eq!(p.y, 0.1);
        }
    }

    #[test]
    fn test_nan_speed_is_repaired() {
        let mut rng = rng();
        let mut buffer = ParticleBuffer::new(ParticleSystemConfig::steam(), &mut rng);
        buffer.speeds_mut()[3] = f32::NAN;
        buffer.speeds_mut()[4] = f32::INFINITY;
        let y_before = buffer.positions()[3].y;

        buffer.tick(&mut rng);

        assert_eq!(buffer.speeds()[3], 0.02);
        assert_eq!(buffer.speeds()[4], 0.02);
        assert!((buffer.positions()[3].y - (y_before + 0.02)).abs() < 1e-6);
        assert!(buffer.positions().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_nan_position_is_respawned() {
        let mut rng = rng();
        let mut buffer = ParticleBuffer::new(ParticleSystemConfig::steam(), &mut rng);
        buffer.positions_mut()[0] = Vec3::new(f32::NAN, 6.0, 0.0);

        let respawned = buffer.tick(&mut rng);

        assert_eq!(respawned, 1);
        assert!(buffer.positions()[0].is_finite());
        assert_eq!(buffer.positions()[0].y, 5.0);
    }

    #[test]
    fn test_resize_to_same_capacity_keeps_storage() {
        let mut rng = rng();
        let mut buffer = ParticleBuffer::new(ParticleSystemConfig::bubbles(), &mut rng);
        let storage = buffer.positions().as_ptr();
        let speeds = buffer.speeds().as_ptr();

        let replaced = buffer.resize(buffer.capacity(), &mut rng);

        assert!(!replaced);
        assert_eq!(buffer.positions().as_ptr(), storage);
        assert_eq!(buffer.speeds().as_ptr(), speeds);
    }

    #[rstest]
    #[case(125)]
    #[case(500)]
    #[case(1)]
    #[case(0)]
    fn test_resize_replaces_storage(#[case] new_capacity: usize) {
        let mut rng = rng();
        let mut buffer = ParticleBuffer::new(ParticleSystemConfig::bubbles(), &mut rng);

        let replaced = buffer.resize(new_capacity, &mut rng);

        assert!(replaced);
        assert_eq!(buffer.capacity(), new_capacity);
        assert_eq!(buffer.speeds().len(), new_capacity);
        assert_in_band(&buffer);
    }

    #[test]
    fn test_fixed_size_buffer_ignores_resize() {
        let mut rng = rng();
        let mut buffer = ParticleBuffer::new(ParticleSystemConfig::steam(), &mut rng);

        assert!(!buffer.resize(300, &mut rng));
        assert_eq!(buffer.capacity(), 100);
    }

    #[test]
    fn test_same_seed_same_particles() {
        let a = ParticleBuffer::new(ParticleSystemConfig::bubbles(), &mut StdRng::seed_from_u64(99));
        let b = ParticleBuffer::new(ParticleSystemConfig::bubbles(), &mut StdRng::seed_from_u64(99));

        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.speeds(), b.speeds());
    }

    #[test]
    fn test_zero_width_spawn_band_is_a_line() {
        let config = ParticleSystemConfig {
            spawn_half_extent: 0.0,
            spawn_y_min: 1.0,
            spawn_y_max: 1.0,
            speed_min: 0.03,
            speed_max: 0.03,
            ..ParticleSystemConfig::bubbles()
        };

        let buffer = ParticleBuffer::new(config, &mut rng());

        assert!(buffer.positions().iter().all(|p| *p == Vec3::new(0.0, 1.0, 0.0)));
        assert!(buffer.speeds().iter().all(|&speed| speed == 0.03));
    }

    #[test]
    fn test_position_arrays_layout() {
        let buffer = ParticleBuffer::new(ParticleSystemConfig::steam(), &mut rng());
        let arrays = buffer.position_arrays();

        assert_eq!(arrays.len(), buffer.capacity());
        assert_eq!(arrays[0], buffer.positions()[0].to_array());
    }
}

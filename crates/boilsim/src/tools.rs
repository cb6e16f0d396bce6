use rand::SeedableRng;
use rand::rngs::StdRng;

/// Draw a fresh seed for runs that don't configure one
pub fn generate_seed() -> u64 {
    rand::random()
}

/// Build the simulation RNG. Small user seeds (0, 1, 2...) are scrambled first
/// so neighbouring seeds don't produce visibly similar particle layouts.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(splitmix64(seed))
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

//! Deterministic pseudo-random numbers for layout jitter.
//!
//! Layouts must be reproducible: the same graph, start room and seed always
//! produce the same coordinates. Jitter and tie-breaking directions therefore
//! come from a small seeded PCG generator instead of an OS entropy source.

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 64-bit LCG state, 32-bit permuted output.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output: xorshift high bits, then rotate by the top five bits.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::step(self.state);
        Self::output(self.state)
    }

    /// Uniform value in `[0, 1]`.
    pub fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX)
    }

    /// Uniform value in `[-1, 1]`.
    pub fn next_signed(&mut self) -> f64 {
        self.next_unit() * 2.0 - 1.0
    }

    /// Unit vector pointing in a pseudo-random direction.
    pub fn next_direction(&mut self) -> (f64, f64) {
        let angle = self.next_unit() * core::f64::consts::TAU;
        (angle.cos(), angle.sin())
    }
}

/// Seed for a value keyed by a string, such as a room identifier.
///
/// FNV-1a over the key, mixed with `base` and finished with the
/// MurmurHash3 avalanche step.
pub fn seed_for_key(base: u64, key: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    let mut hash = FNV_OFFSET;
    for byte in key.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }

    avalanche(base ^ hash.wrapping_mul(0x9e3779b97f4a7c15))
}

/// Seed for a value keyed by an ordered pair of indices.
pub fn seed_for_pair(base: u64, first: usize, second: usize) -> u64 {
    let mut hash = base;
    hash ^= (first as u64).wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (second as u64).wrapping_mul(0x517cc1b727220a95);
    avalanche(hash)
}

fn avalanche(mut hash: u64) -> u64 {
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

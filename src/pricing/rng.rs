//! Small PRNG for dice tables. SplitMix64: deterministic, seedable, not
//! cryptographically secure; a fixed seed reproduces every roll sequence.

const SPLITMIX64_GOLDEN: u64 = 0x9e3779b97f4a7c15;
const SPLITMIX64_M1: u64 = 0xbf58476d1ce4e5b9;
const SPLITMIX64_M2: u64 = 0x94d049bb133111eb;

#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
        z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
        z ^ (z >> 31)
    }

    /// Roll one die: uniform in `1..=sides`. `sides` must be non-zero.
    pub fn roll_die(&mut self, sides: u32) -> u32 {
        debug_assert!(sides > 0);
        (self.next_u64() % u64::from(sides)) as u32 + 1
    }
}

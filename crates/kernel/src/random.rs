use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of randomness for scene generation and per-frame noise.
///
/// Production code uses `SessionRng`; tests substitute `ScriptedRandom` to
/// pin exact outputs.
pub trait RandomSource {
    /// Uniform integer in `[min, max]`.
    fn int_inclusive(&mut self, min: i64, max: i64) -> i64;
    /// Uniform float in `[min, max]`.
    fn uniform(&mut self, min: f64, max: f64) -> f64;
}

/// Seeded session RNG.
#[derive(Debug, Clone)]
pub struct SessionRng {
    seed: u64,
    rng: StdRng,
}

impl SessionRng {
    /// Seed explicitly, or draw a fresh seed when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        tracing::debug!(seed, "session rng seeded");
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SessionRng {
    fn int_inclusive(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.rng.random::<f64>()
    }
}

/// Replays fixed values, cycling when exhausted. Values outside the requested
/// range are clamped into it.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    ints: Vec<i64>,
    floats: Vec<f64>,
    next_int: usize,
    next_float: usize,
}

impl ScriptedRandom {
    pub fn new(ints: Vec<i64>, floats: Vec<f64>) -> Self {
        Self {
            ints,
            floats,
            next_int: 0,
            next_float: 0,
        }
    }

    /// Always answers `value` for integer draws and the range minimum for floats.
    pub fn constant(value: i64) -> Self {
        Self::new(vec![value], Vec::new())
    }
}

impl RandomSource for ScriptedRandom {
    fn int_inclusive(&mut self, min: i64, max: i64) -> i64 {
        if self.ints.is_empty() {
            return min;
        }
        let v = self.ints[self.next_int % self.ints.len()];
        self.next_int += 1;
        v.clamp(min, max.max(min))
    }

    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if self.floats.is_empty() {
            return min;
        }
        let v = self.floats[self.next_float % self.floats.len()];
        self.next_float += 1;
        v.clamp(min, max.max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SessionRng::new(Some(42));
        let mut b = SessionRng::new(Some(42));
        for _ in 0..32 {
            assert_eq!(a.int_inclusive(-20, 20), b.int_inclusive(-20, 20));
            assert_eq!(a.uniform(0.5, 1.5), b.uniform(0.5, 1.5));
        }
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn draws_stay_in_range() {
        let mut rng = SessionRng::new(Some(7));
        for _ in 0..1000 {
            let i = rng.int_inclusive(20, 60);
            assert!((20..=60).contains(&i));
            let f = rng.uniform(0.5, 1.5);
            assert!((0.5..=1.5).contains(&f));
        }
    }

    #[test]
    fn degenerate_range_returns_min() {
        let mut rng = SessionRng::new(Some(1));
        assert_eq!(rng.int_inclusive(3, 3), 3);
    }

    #[test]
    fn scripted_cycles_and_clamps() {
        let mut rng = ScriptedRandom::new(vec![1, 100, -5], vec![0.75]);
        assert_eq!(rng.int_inclusive(0, 10), 1);
        assert_eq!(rng.int_inclusive(0, 10), 10);
        assert_eq!(rng.int_inclusive(0, 10), 0);
        assert_eq!(rng.int_inclusive(0, 10), 1);
        assert_eq!(rng.uniform(0.5, 1.5), 0.75);
        assert_eq!(rng.uniform(0.5, 1.5), 0.75);
    }

    #[test]
    fn scripted_empty_uses_min() {
        let mut rng = ScriptedRandom::default();
        assert_eq!(rng.int_inclusive(20, 60), 20);
        assert_eq!(rng.uniform(0.5, 1.5), 0.5);
    }
}

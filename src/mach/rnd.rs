use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// ## Random number generator
///
/// Holds the previous draw for `RND(0)`.

pub struct Rnd {
    rng: StdRng,
    previous: f32,
}

impl std::fmt::Debug for Rnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rnd {{ previous: {} }}", self.previous)
    }
}

impl Rnd {
    /// Seeds from the wall clock when no seed is given.
    pub fn new(seed: Option<u64>) -> Rnd {
        let seed = seed.unwrap_or_else(Rnd::clock_seed);
        Rnd {
            rng: StdRng::seed_from_u64(seed),
            previous: 0.0,
        }
    }

    fn clock_seed() -> u64 {
        chrono::Utc::now().timestamp_millis() as u64
    }

    pub fn reseed(&mut self, seed: u64) {
        debug!(seed, "reseed");
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn reseed_from_clock(&mut self) {
        self.reseed(Rnd::clock_seed());
    }

    /// `RND` semantics: zero repeats the previous value, a negative
    /// argument reseeds from its integer part before drawing.
    pub fn next(&mut self, arg: Option<f32>) -> f32 {
        match arg {
            Some(n) if n == 0.0 => return self.previous,
            Some(n) if n < 0.0 => self.reseed(n.trunc() as i64 as u64),
            _ => {}
        }
        self.previous = self.rng.gen::<f32>();
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_and_repeat() {
        let mut rnd = Rnd::new(Some(7));
        for _ in 0..100 {
            let n = rnd.next(None);
            assert!((0.0..1.0).contains(&n));
            assert_eq!(rnd.next(Some(0.0)), n);
        }
    }

    #[test]
    fn test_negative_reseeds() {
        let mut rnd = Rnd::new(None);
        let a = rnd.next(Some(-3.7));
        let b = rnd.next(Some(1.0));
        let mut rnd = Rnd::new(Some(1234));
        assert_eq!(rnd.next(Some(-3.2)), a);
        assert_eq!(rnd.next(None), b);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Rnd::new(Some(99));
        let mut b = Rnd::new(Some(99));
        for _ in 0..10 {
            assert_eq!(a.next(None), b.next(None));
        }
    }
}

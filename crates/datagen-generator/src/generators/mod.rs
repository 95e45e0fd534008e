//! Individual field generators.
//!
//! Each submodule produces one kind of field value from a caller-supplied
//! RNG, so a record generator can compose them while keeping a single
//! deterministic stream.

pub mod contact;
pub mod numeric;
pub mod pools;
pub mod timestamp;
pub mod uuid;

use rand::Rng;

/// Pick one entry uniformly from a non-empty static pool.
pub fn pick<R: Rng>(rng: &mut R, pool: &'static [&'static str]) -> &'static str {
    pool[rng.random_range(0..pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_stays_in_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let state = pick(&mut rng, pools::STATES);
            assert!(pools::STATES.contains(&state));
        }
    }
}

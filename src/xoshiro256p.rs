/*
 * xoshiro256+ implementation
 * https://en.wikipedia.org/wiki/Xorshift#xoshiro256+
 */

use std::time::{SystemTime, UNIX_EPOCH};

/// Anything that can hand out uniformly distributed numbers.
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform pick in `0..bound`, 0 when the range is empty
    fn below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }

        // low bits of xoshiro256+ are the weakest, use the top ones
        ((self.next_u64() >> 11) % bound as u64) as usize
    }
}

fn rol64(x: u64, k: u32) -> u64 {
    (x << k) | (x >> (64 - k))
}

#[derive(Debug, Clone, Copy)]
pub struct Xoshiro256p([u64; 4]);

impl Xoshiro256p {
    pub fn new(seed: u64) -> Self {
        let mut seed: Splitmix64State = seed;

        Xoshiro256p([
            splitmix64(&mut seed),
            splitmix64(&mut seed),
            splitmix64(&mut seed),
            splitmix64(&mut seed),
        ])
    }

    /// Seeded once from the wall clock
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0xdeadbeef);

        Self::new(nanos)
    }
}

impl RandomSource for Xoshiro256p {
    fn next_u64(&mut self) -> u64 {
        let res = self.0[0].wrapping_add(self.0[3]);

        let tmp = self.0[1] << 17;

        self.0[2] ^= self.0[0];
        self.0[3] ^= self.0[1];
        self.0[1] ^= self.0[2];
        self.0[0] ^= self.0[3];

        self.0[2] ^= tmp;
        self.0[3] = rol64(self.0[3], 45);

        res
    }
}

/*
 * splitmix64 used for initialization
 * https://en.wikipedia.org/wiki/Xorshift#Initialization
 */

type Splitmix64State = u64;

fn splitmix64(state: &mut Splitmix64State) -> u64 {
    *state = state.wrapping_add(0x9e3779b97f4a7c15);

    let mut result = *state;
    result = (result ^ (result >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    result = (result ^ (result >> 27)).wrapping_mul(0x94d049bb133111eb);
    result ^ (result >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = Xoshiro256p::new(42);
        let mut b = Xoshiro256p::new(42);

        for _ in 0..64 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Xoshiro256p::new(1);
        let mut b = Xoshiro256p::new(2);

        assert!((0..8).any(|_| a.next_u64() != b.next_u64()));
    }

    #[test]
    fn below_stays_in_range() {
        let mut rng = Xoshiro256p::new(0xdeadbeef);

        for bound in 1..20 {
            for _ in 0..100 {
                assert!(rng.below(bound) < bound);
            }
        }
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn below_hits_every_value() {
        let mut rng = Xoshiro256p::new(7);
        let mut seen = [false; 7];

        for _ in 0..500 {
            seen[rng.below(7)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}

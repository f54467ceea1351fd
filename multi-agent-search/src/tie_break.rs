use rand::{rngs::StdRng, Rng, SeedableRng};

/// Picks one of several root actions that all share the best score
///
/// Agents break ties at the root at random by default so they don't fall into predictable
/// loops. Swap in a seeded or deterministic strategy for reproducible games and tests.
pub trait TieBreaker {
    /// Return an index in `0..tied`. `tied` is always at least 1.
    fn pick(&mut self, tied: usize) -> usize;
}

/// Uniformly random tie breaking
#[derive(Debug, Clone)]
pub struct RandomTieBreak<R: Rng = StdRng> {
    rng: R,
}

impl RandomTieBreak<StdRng> {
    /// Seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded for reproducible choices
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomTieBreak<R> {
    /// Use any [Rng] as the source of randomness
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RandomTieBreak<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> TieBreaker for RandomTieBreak<R> {
    fn pick(&mut self, tied: usize) -> usize {
        self.rng.gen_range(0..tied)
    }
}

/// Always takes the first tied action, in the order the game listed them
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstTieBreak;

impl TieBreaker for FirstTieBreak {
    fn pick(&mut self, _tied: usize) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_picks_are_reproducible() {
        let mut a = RandomTieBreak::seeded(7);
        let mut b = RandomTieBreak::seeded(7);

        let picks_a: Vec<_> = (0..20).map(|_| a.pick(5)).collect();
        let picks_b: Vec<_> = (0..20).map(|_| b.pick(5)).collect();

        assert_eq!(picks_a, picks_b);
        assert!(picks_a.iter().all(|p| *p < 5));
    }

    #[test]
    fn test_random_picks_reach_every_candidate() {
        let mut tie_break = RandomTieBreak::seeded(42);
        let mut seen = [false; 3];

        for _ in 0..200 {
            seen[tie_break.pick(3)] = true;
        }

        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_first_tie_break() {
        assert_eq!(FirstTieBreak.pick(4), 0);
    }
}

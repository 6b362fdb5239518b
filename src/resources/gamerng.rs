//! Seeded random source for gameplay decisions.

use bevy_ecs::prelude::Resource;

/// Shared RNG. Seeded from the config so sessions are reproducible.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub fastrand::Rng);

impl GameRng {
    pub fn with_seed(seed: u64) -> Self {
        GameRng(fastrand::Rng::with_seed(seed))
    }

    /// Random index in `0..len`, or `None` for an empty range.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.0.usize(..len))
    }

    /// Random index in `0..len` other than `skip`, or `None` if no other
    /// index exists.
    pub fn index_excluding(&mut self, len: usize, skip: usize) -> Option<usize> {
        if skip >= len {
            return self.index(len);
        }
        let i = self.index(len - 1)?;
        Some(if i >= skip { i + 1 } else { i })
    }
}

//! Random source abstraction.
//!
//! Invite codes must be unpredictable in production but repeatable in tests,
//! so code generation draws indices through this trait.

use rand::Rng;

/// Abstraction over random index selection.
pub trait RandomSource: Send + Sync {
    /// Returns a uniformly distributed index in `[0, len)`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Production source backed by the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

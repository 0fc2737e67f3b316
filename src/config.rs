use log::Level;

/// Class applied to a review card once its reveal signal fired.
pub const VISIBLE_CLASS: &str = "review-card-visible";
/// Flip animation played together with [`VISIBLE_CLASS`].
pub const FLIP_IN_CLASS: &str = "animate-flip-in";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    /// Minimum visible fraction of a card before it counts as seen.
    pub threshold: f64,
    /// Delay added per position inside one detection batch, in milliseconds.
    pub stagger_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            stagger_ms: 150,
        }
    }
}

impl RevealConfig {
    pub fn delay_for(&self, index_in_batch: usize) -> u32 {
        (index_in_batch as u32).saturating_mul(self.stagger_ms)
    }
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

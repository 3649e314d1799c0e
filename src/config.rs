use crate::domain::gesture::Offset;
use std::time::Duration;

/// Tuning for gesture interpretation and card presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeConfig {
    /// Horizontal drag distance (px) that must be exceeded to count as a decision.
    pub threshold: f64,
    /// Card rotation in degrees per pixel of horizontal offset.
    pub rotation_per_px: f64,
    /// Horizontal offset at which the card would be fully transparent.
    pub fade_distance: f64,
    /// Horizontal offset at which the tint reaches `tint_cap`.
    pub tint_saturation: f64,
    pub tint_cap: f64,
    /// Length of the exit interval between a decision and the next card.
    pub transition: Duration,
    /// Off-screen target for a liked card; mirrored horizontally for a dislike.
    pub exit_offset: Offset,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            rotation_per_px: 0.03,
            fade_distance: 500.0,
            tint_saturation: 300.0,
            tint_cap: 0.5,
            transition: Duration::from_millis(300),
            exit_offset: Offset::new(1000.0, -100.0),
        }
    }
}

impl SwipeConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition;
        self
    }
}

//! Pointer gesture tracking and the card presentation derived from it.

use crate::config::SwipeConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Displacement of the card from its resting position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Device-agnostic pointer input. Mouse and touch events map onto the same variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down(Point),
    Move(Point),
    Up,
    /// One of the explicit like/dislike buttons.
    Button { liked: bool },
}

/// State of the pointer interaction for the current card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    pub origin: Point,
    pub offset: Offset,
    pub dragging: bool,
}

impl GestureState {
    pub fn start(&mut self, at: Point) {
        self.origin = at;
        self.offset = Offset::ZERO;
        self.dragging = true;
    }

    pub fn track(&mut self, to: Point) {
        self.offset = Offset::new(to.x - self.origin.x, to.y - self.origin.y);
    }

    /// Stops following the pointer and returns the final offset.
    pub fn release(&mut self) -> Offset {
        self.dragging = false;
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = Offset::ZERO;
    }

    /// The decision implied by the current offset, if it is past `threshold`.
    pub fn verdict(&self, threshold: f64) -> Option<bool> {
        (self.offset.x.abs() > threshold).then_some(self.offset.x > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TintHue {
    Accept,
    Reject,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tint {
    pub hue: TintHue,
    pub intensity: f64,
}

/// Presentation values for the current card. Recomputed from the offset on
/// every change; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardStyle {
    pub offset: Offset,
    pub rotation_deg: f64,
    /// Not clamped; the rendering layer clamps.
    pub opacity: f64,
    pub tint: Tint,
    /// `false` while the card follows the pointer.
    pub animated: bool,
}

impl CardStyle {
    pub fn from_gesture(gesture: &GestureState, config: &SwipeConfig) -> Self {
        let dx = gesture.offset.x;
        let hue = if dx > 0.0 {
            TintHue::Accept
        } else if dx < 0.0 {
            TintHue::Reject
        } else {
            TintHue::Neutral
        };

        Self {
            offset: gesture.offset,
            rotation_deg: dx * config.rotation_per_px,
            opacity: 1.0 - dx.abs() / config.fade_distance,
            tint: Tint {
                hue,
                intensity: (dx.abs() / config.tint_saturation).min(config.tint_cap),
            },
            animated: !gesture.dragging,
        }
    }
}

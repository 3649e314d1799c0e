//! Application layer: the swipe engine and the task that drives it.
//!
//! `SwipeEngine` holds the candidate queue and the gesture/transition state
//! machine. `EngineHandle` runs an engine in its own task behind `tokio`
//! channels, so pointer input, the transition timer, and recorder calls are
//! all applied by a single owner.

pub mod driver;
pub mod engine;
pub mod session;
pub mod transition;

//! Domain types: candidates, decisions, gestures, and the ports the engine talks through.

pub mod candidate;
pub mod decision;
pub mod gesture;
pub mod ports;

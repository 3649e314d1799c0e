//! File formats read and written by the replay binary.

pub mod csv;
pub mod json;

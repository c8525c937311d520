//! Command implementations

pub mod effects;
pub mod particles;

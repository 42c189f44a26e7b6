#![forbid(unsafe_code)]

//! Core: geometry, pointer events, and the saturating numeric helpers shared
//! by every rankbar crate.

pub mod event;
pub mod geometry;
pub mod math;

pub use math::clamp;

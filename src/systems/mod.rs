//! Engine systems.
//!
//! Submodules overview
//! - [`animator`] – advance sprite animations and autostart defaults
//! - [`time`] – update simulation time and delta

pub mod animator;
pub mod time;

//! Event types exchanged across systems.
//!
//! Submodules:
//! - [`animation`] – playback completion notifications, observable per entity
pub mod animation;

//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animator`] – playback state machine driving sprite animations
//! - [`sprite`] – 2D sprite rendering surface written by the animator

pub mod animator;
pub mod sprite;

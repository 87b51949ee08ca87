//! Animation completion events.
//!
//! When a non-looping playback runs out of frames, the
//! [`animate`](crate::systems::animator::animate) system triggers an
//! [`AnimationFinishedEvent`] on the entity. Observers can subscribe to switch
//! animations, despawn effects, or advance game state.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(|trigger: On<AnimationFinishedEvent>, mut commands: Commands| {
//!     commands.entity(trigger.event().entity).try_despawn();
//! });
//! ```
//!
//! # Related
//!
//! - [`crate::components::animator::Animator`] – the playback component
//! - [`crate::systems::animator::animate`] – the system that emits these events

use bevy_ecs::prelude::*;

/// Event emitted when a playback completes.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct AnimationFinishedEvent {
    /// The entity whose animation finished.
    pub entity: Entity,
}

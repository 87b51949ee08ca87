//! Animation playback systems.
//!
//! - [`animate`] advances every playing [`Animator`] by the frame delta and
//!   swaps the displayed sprite frame, emitting
//!   [`AnimationFinishedEvent`](crate::events::animation::AnimationFinishedEvent)
//!   when a playback ends.
//! - [`play_defaults`] starts the default animation on freshly spawned
//!   animators.
//!
//! # Animation Flow
//!
//! 1. Animation data is defined in [`AnimationStore`](crate::resources::animationstore::AnimationStore)
//! 2. Entities carry an [`Animator`] and a [`Sprite`]
//! 3. `play_defaults` starts autostart animations once, on spawn
//! 4. `animate` runs once per tick after
//!    [`update_world_time`](crate::systems::time::update_world_time)

use bevy_ecs::prelude::*;
use log::warn;

use crate::components::animator::{Animator, Playback};
use crate::components::sprite::Sprite;
use crate::events::animation::AnimationFinishedEvent;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback and update the sprite frame.
///
/// Contract
/// - Reads [`WorldTime`] for the scaled delta.
/// - Mutates [`Animator`] state and the [`Sprite`] texture key.
/// - Triggers [`AnimationFinishedEvent`] on entities whose playback completed
///   this tick (the animator's own completion callback has already run).
pub fn animate(
    mut query: Query<(Entity, &mut Animator, &mut Sprite)>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut animator, mut sprite) in query.iter_mut() {
        if animator.advance(time.delta, &mut sprite) {
            commands.trigger(AnimationFinishedEvent { entity });
        }
    }
}

/// Start the default animation on newly added animators.
///
/// Looks up [`Animator::default_animation`] in the [`AnimationStore`]; a
/// missing key is tolerated with a warning so a bad asset reference never
/// takes the world down.
pub fn play_defaults(
    mut query: Query<(&mut Animator, &mut Sprite), Added<Animator>>,
    store: Res<AnimationStore>,
) {
    for (mut animator, mut sprite) in query.iter_mut() {
        let Some(key) = animator.default_animation.clone() else {
            continue;
        };
        match store.get(&key) {
            Some(animation) => {
                animator.play(&mut sprite, Playback::new(animation.clone()));
            }
            None => warn!("Default animation '{}' not found in store", key),
        }
    }
}

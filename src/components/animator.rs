//! Sprite animation playback component.
//!
//! [`Animator`] drives one [`Sprite`](super::sprite::Sprite) through the frames
//! of a shared [`SpriteAnimation`](crate::resources::animationstore::SpriteAnimation).
//! It owns only its playback state; the animation asset is shared read-only and
//! the sprite it writes to belongs to the entity, not to the animator.
//!
//! Playback is started with a [`Playback`] request, stopped with
//! [`Animator::stop`], and advanced once per frame by the
//! [`animate`](crate::systems::animator::animate) system.

use std::sync::Arc;

use bevy_ecs::prelude::Component;
use log::warn;

use crate::components::sprite::Sprite;
use crate::resources::animationstore::SpriteAnimation;

/// Completion callback invoked when a non-looping playback ends.
pub type OnComplete = Box<dyn FnMut() + Send + Sync>;

/// Describes one play request.
///
/// Builder methods cover the optional parts: starting frame, forced restart,
/// and completion callback.
pub struct Playback {
    animation: Arc<SpriteAnimation>,
    start_frame: usize,
    force: bool,
    on_complete: Option<OnComplete>,
}

impl Playback {
    pub fn new(animation: Arc<SpriteAnimation>) -> Self {
        Playback {
            animation,
            start_frame: 0,
            force: false,
            on_complete: None,
        }
    }

    /// Start playback at `frame` instead of frame 0.
    pub fn start_at(mut self, frame: usize) -> Self {
        self.start_frame = frame;
        self
    }

    /// Restart even if the same animation is already playing.
    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    /// Invoke `callback` when the playback ends. Looping playback never ends,
    /// so the callback only fires if it is replaced by a later `play`.
    pub fn on_complete(mut self, callback: impl FnMut() + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

/// Per-entity animation playback state machine.
///
/// Two states: stopped (initial) and playing. While playing, `frame_index`
/// stays within the current animation's frame list and `elapsed_in_frame`
/// accumulates scaled delta time since the last frame change.
#[derive(Component)]
pub struct Animator {
    /// Multiplier applied to incoming deltas. `0.0` pauses playback; negative
    /// values are not supported.
    pub time_scale: f32,
    /// Key of the animation to autostart on spawn, if any. Resolved by
    /// [`play_defaults`](crate::systems::animator::play_defaults).
    pub default_animation: Option<String>,
    current_animation: Option<Arc<SpriteAnimation>>,
    on_complete: Option<OnComplete>,
    playing: bool,
    frame_index: usize,
    elapsed_in_frame: f32,
}

impl Default for Animator {
    fn default() -> Self {
        Animator {
            time_scale: 1.0,
            default_animation: None,
            current_animation: None,
            on_complete: None,
            playing: false,
            frame_index: 0,
            elapsed_in_frame: 0.0,
        }
    }
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Autostart the animation registered under `key` when the entity spawns.
    pub fn with_default(mut self, key: impl Into<String>) -> Self {
        self.default_animation = Some(key.into());
        self
    }

    /// Is the animator playing an animation?
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The animation currently loaded, retained across `stop`.
    pub fn current_animation(&self) -> Option<&Arc<SpriteAnimation>> {
        self.current_animation.as_ref()
    }

    /// Index of the frame currently displayed.
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Seconds accumulated since the last frame change, after time scaling.
    pub fn elapsed_in_frame(&self) -> f32 {
        self.elapsed_in_frame
    }

    /// Start playing an animation on `sprite`.
    ///
    /// Rejected requests leave the animator and sprite untouched:
    /// - the animation has no frames (logged),
    /// - the starting frame is out of range (logged),
    /// - the same animation (by `Arc` identity) is already playing and the
    ///   request is not forced.
    ///
    /// If a playback with a completion callback is interrupted, that callback
    /// fires before the new animation is installed.
    pub fn play(&mut self, sprite: &mut Sprite, request: Playback) {
        let Playback {
            animation,
            start_frame,
            force,
            on_complete,
        } = request;

        if animation.frames.is_empty() {
            warn!("Ignoring play request for animation with no frames");
            return;
        }
        if start_frame >= animation.frames.len() {
            warn!(
                "Ignoring play request: start frame {} out of range (animation has {} frames)",
                start_frame,
                animation.frames.len()
            );
            return;
        }
        if let Some(current) = &self.current_animation {
            if Arc::ptr_eq(current, &animation) && !force && self.playing {
                return;
            }
        }

        // Interrupted playback counts as completed.
        if self.playing {
            if let Some(callback) = self.on_complete.as_mut() {
                callback();
            }
        }

        self.current_animation = Some(animation);
        self.on_complete = on_complete;
        self.show_frame(start_frame, sprite);
        self.playing = true;
    }

    /// Stop playing. Resets frame and timer state but keeps the loaded
    /// animation and the completion callback.
    pub fn stop(&mut self) {
        self.playing = false;
        self.frame_index = 0;
        self.elapsed_in_frame = 0.0;
    }

    /// Advance the playback timer by `dt` seconds and swap the sprite frame
    /// when a frame boundary is crossed. Returns true when playback completed
    /// on this tick.
    ///
    /// At most one frame advance happens per call: a delta larger than a
    /// frame's duration skips frames without displaying them.
    pub fn advance(&mut self, dt: f32, sprite: &mut Sprite) -> bool {
        if !self.playing {
            return false;
        }
        let Some(animation) = self.current_animation.clone() else {
            return false;
        };

        self.elapsed_in_frame += dt * self.time_scale;

        if self.elapsed_in_frame < animation.frames[self.frame_index].duration {
            return false;
        }

        if self.frame_index + 1 >= animation.frames.len() {
            if animation.looping {
                self.show_frame(0, sprite);
            } else {
                if animation.show_first_frame_at_end {
                    self.show_frame(0, sprite);
                }
                self.stop();
                if let Some(callback) = self.on_complete.as_mut() {
                    callback();
                }
                return true;
            }
        } else {
            self.show_frame(self.frame_index + 1, sprite);
        }

        false
    }

    /// Display the frame at `index`: update the index, reset the frame timer,
    /// and push the frame's texture key to the sprite.
    fn show_frame(&mut self, index: usize, sprite: &mut Sprite) {
        self.frame_index = index;
        self.elapsed_in_frame = 0.0;
        if let Some(animation) = &self.current_animation {
            sprite.tex_key = animation.frames[index].tex_key.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::resources::animationstore::Frame;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn two_frame_animation() -> Arc<SpriteAnimation> {
        Arc::new(SpriteAnimation::new(vec![
            Frame::new("A", 1.0),
            Frame::new("B", 1.0),
        ]))
    }

    fn sprite() -> Sprite {
        Sprite::new("initial", 16.0, 16.0)
    }

    #[test]
    fn test_play_displays_start_frame() {
        let mut animator = Animator::new();
        let mut sprite = sprite();

        animator.play(&mut sprite, Playback::new(two_frame_animation()));

        assert!(animator.is_playing());
        assert_eq!(animator.frame_index(), 0);
        assert!(approx_eq(animator.elapsed_in_frame(), 0.0));
        assert_eq!(sprite.tex_key, "A");
    }

    #[test]
    fn test_play_start_at_frame() {
        let mut animator = Animator::new();
        let mut sprite = sprite();

        animator.play(&mut sprite, Playback::new(two_frame_animation()).start_at(1));

        assert_eq!(animator.frame_index(), 1);
        assert_eq!(sprite.tex_key, "B");
    }

    #[test]
    fn test_play_empty_animation_is_rejected() {
        let mut animator = Animator::new();
        let mut sprite = sprite();
        let empty = Arc::new(SpriteAnimation::new(vec![]));

        animator.play(&mut sprite, Playback::new(empty));

        assert!(!animator.is_playing());
        assert!(animator.current_animation().is_none());
        assert_eq!(sprite.tex_key, "initial");
    }

    #[test]
    fn test_play_out_of_range_start_is_rejected() {
        let mut animator = Animator::new();
        let mut sprite = sprite();

        animator.play(&mut sprite, Playback::new(two_frame_animation()).start_at(2));

        assert!(!animator.is_playing());
        assert_eq!(sprite.tex_key, "initial");
    }

    #[test]
    fn test_play_same_animation_is_noop_while_playing() {
        let mut animator = Animator::new();
        let mut sprite = sprite();
        let anim = two_frame_animation();

        animator.play(&mut sprite, Playback::new(anim.clone()));
        animator.advance(1.0, &mut sprite); // now on frame 1
        animator.advance(0.5, &mut sprite); // partway into frame 1

        animator.play(&mut sprite, Playback::new(anim));

        assert_eq!(animator.frame_index(), 1);
        assert!(approx_eq(animator.elapsed_in_frame(), 0.5));
        assert_eq!(sprite.tex_key, "B");
    }

    #[test]
    fn test_play_same_animation_forced_restarts() {
        let mut animator = Animator::new();
        let mut sprite = sprite();
        let anim = two_frame_animation();

        animator.play(&mut sprite, Playback::new(anim.clone()));
        animator.advance(1.0, &mut sprite);

        animator.play(&mut sprite, Playback::new(anim).force());

        assert_eq!(animator.frame_index(), 0);
        assert!(approx_eq(animator.elapsed_in_frame(), 0.0));
        assert_eq!(sprite.tex_key, "A");
    }

    #[test]
    fn test_play_same_animation_restarts_after_stop() {
        let mut animator = Animator::new();
        let mut sprite = sprite();
        let anim = two_frame_animation();

        animator.play(&mut sprite, Playback::new(anim.clone()));
        animator.advance(1.0, &mut sprite);
        animator.stop();

        // Not playing, so the redundant-restart guard does not apply.
        animator.play(&mut sprite, Playback::new(anim));

        assert!(animator.is_playing());
        assert_eq!(animator.frame_index(), 0);
        assert_eq!(sprite.tex_key, "A");
    }

    #[test]
    fn test_stop_resets_frame_state_and_keeps_animation() {
        let mut animator = Animator::new();
        let mut sprite = sprite();

        animator.play(&mut sprite, Playback::new(two_frame_animation()));
        animator.advance(1.0, &mut sprite);
        animator.stop();

        assert!(!animator.is_playing());
        assert_eq!(animator.frame_index(), 0);
        assert!(approx_eq(animator.elapsed_in_frame(), 0.0));
        assert!(animator.current_animation().is_some());
    }

    #[test]
    fn test_advance_within_frame_does_nothing() {
        let mut animator = Animator::new();
        let mut sprite = sprite();

        animator.play(&mut sprite, Playback::new(two_frame_animation()));
        let finished = animator.advance(0.4, &mut sprite);

        assert!(!finished);
        assert_eq!(animator.frame_index(), 0);
        assert!(approx_eq(animator.elapsed_in_frame(), 0.4));
        assert_eq!(sprite.tex_key, "A");
    }

    #[test]
    fn test_advance_without_play_is_noop() {
        let mut animator = Animator::new();
        let mut sprite = sprite();

        assert!(!animator.advance(10.0, &mut sprite));
        assert_eq!(sprite.tex_key, "initial");
    }

    #[test]
    fn test_non_looping_run_fires_on_complete_once() {
        let mut animator = Animator::new();
        let mut sprite = sprite();
        let completions = Arc::new(AtomicUsize::new(0));
        let counter = completions.clone();

        animator.play(
            &mut sprite,
            Playback::new(two_frame_animation()).on_complete(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert!(!animator.advance(1.0, &mut sprite));
        assert_eq!(sprite.tex_key, "B");

        assert!(animator.advance(1.0, &mut sprite));
        assert!(!animator.is_playing());
        assert_eq!(sprite.tex_key, "B"); // stays on last displayed frame
        assert_eq!(completions.load(Ordering::SeqCst), 1);

        // Further ticks do nothing.
        assert!(!animator.advance(1.0, &mut sprite));
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_show_first_frame_at_end() {
        let mut animator = Animator::new();
        let mut sprite = sprite();
        let anim = Arc::new(
            SpriteAnimation::new(vec![Frame::new("A", 1.0), Frame::new("B", 1.0)])
                .with_first_frame_at_end(),
        );
        let completions = Arc::new(AtomicUsize::new(0));
        let counter = completions.clone();

        animator.play(
            &mut sprite,
            Playback::new(anim).on_complete(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        animator.advance(1.0, &mut sprite);
        assert_eq!(sprite.tex_key, "B");

        let finished = animator.advance(1.0, &mut sprite);
        assert!(finished);
        assert_eq!(sprite.tex_key, "A");
        assert!(!animator.is_playing());
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_looping_wraps_and_never_completes() {
        let mut animator = Animator::new();
        let mut sprite = sprite();
        let anim = Arc::new(
            SpriteAnimation::new(vec![Frame::new("A", 1.0), Frame::new("B", 1.0)]).with_looping(),
        );
        let completions = Arc::new(AtomicUsize::new(0));
        let counter = completions.clone();

        animator.play(
            &mut sprite,
            Playback::new(anim).on_complete(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert!(!animator.advance(1.0, &mut sprite));
        assert_eq!(sprite.tex_key, "B");

        assert!(!animator.advance(1.0, &mut sprite));
        assert_eq!(sprite.tex_key, "A");
        assert_eq!(animator.frame_index(), 0);
        assert!(animator.is_playing());
        assert_eq!(completions.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_time_scale_zero_freezes_playback() {
        let mut animator = Animator::new();
        let mut sprite = sprite();

        animator.play(&mut sprite, Playback::new(two_frame_animation()));
        animator.time_scale = 0.0;

        for _ in 0..100 {
            assert!(!animator.advance(1.0, &mut sprite));
        }
        assert_eq!(animator.frame_index(), 0);
        assert!(approx_eq(animator.elapsed_in_frame(), 0.0));
    }

    #[test]
    fn test_time_scale_doubles_playback_speed() {
        let mut animator = Animator::new();
        let mut sprite = sprite();

        animator.play(&mut sprite, Playback::new(two_frame_animation()));
        animator.time_scale = 2.0;

        animator.advance(0.5, &mut sprite);
        assert_eq!(animator.frame_index(), 1);
    }

    #[test]
    fn test_large_delta_advances_one_frame_only() {
        let mut animator = Animator::new();
        let mut sprite = sprite();
        let anim = Arc::new(SpriteAnimation::new(vec![
            Frame::new("A", 0.1),
            Frame::new("B", 0.1),
            Frame::new("C", 0.1),
        ]));

        animator.play(&mut sprite, Playback::new(anim));
        animator.advance(10.0, &mut sprite);

        // No catch-up loop: a huge delta still advances a single frame.
        assert_eq!(animator.frame_index(), 1);
        assert_eq!(sprite.tex_key, "B");
    }

    #[test]
    fn test_interrupting_play_fires_old_callback_first() {
        let mut animator = Animator::new();
        let mut sprite = sprite();
        let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

        let first = two_frame_animation();
        let second = Arc::new(SpriteAnimation::new(vec![Frame::new("X", 1.0)]));

        let log = order.clone();
        animator.play(
            &mut sprite,
            Playback::new(first).on_complete(move || {
                log.lock().unwrap().push("first_complete");
            }),
        );

        let log = order.clone();
        animator.play(
            &mut sprite,
            Playback::new(second.clone()).on_complete(move || {
                log.lock().unwrap().push("second_complete");
            }),
        );

        // The interrupted callback fired before the new animation installed.
        assert_eq!(*order.lock().unwrap(), vec!["first_complete"]);
        assert!(Arc::ptr_eq(animator.current_animation().unwrap(), &second));
        assert_eq!(sprite.tex_key, "X");

        animator.advance(1.0, &mut sprite);
        assert_eq!(
            *order.lock().unwrap(),
            vec!["first_complete", "second_complete"]
        );
    }

    #[test]
    fn test_interrupting_while_stopped_does_not_fire_callback() {
        let mut animator = Animator::new();
        let mut sprite = sprite();
        let completions = Arc::new(AtomicUsize::new(0));
        let counter = completions.clone();

        animator.play(
            &mut sprite,
            Playback::new(two_frame_animation()).on_complete(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        animator.stop();

        let other = Arc::new(SpriteAnimation::new(vec![Frame::new("X", 1.0)]));
        animator.play(&mut sprite, Playback::new(other));

        assert_eq!(completions.load(Ordering::SeqCst), 0);
    }
}

//! Animation asset registry.
//!
//! This module defines the immutable animation data ([`SpriteAnimation`] and its
//! [`Frame`]s) and a store that keeps the definitions behind string keys so any
//! number of entities can play the same asset. Definitions can be authored in a
//! JSON document and loaded with [`AnimationStore::from_json_str`] or
//! [`AnimationStore::load_json_file`].
//!
//! # Definition File Format
//!
//! ```json
//! {
//!     "explosion": {
//!         "frames": [
//!             { "tex_key": "explosion_0", "duration": 0.1 },
//!             { "tex_key": "explosion_1", "duration": 0.1 }
//!         ],
//!         "looping": false,
//!         "show_first_frame_at_end": false
//!     }
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One frame of an animation: which texture to show and for how long.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Texture key resolved by the renderer.
    pub tex_key: String,
    /// Duration of the frame in seconds.
    pub duration: f32,
}

impl Frame {
    pub fn new(tex_key: impl Into<String>, duration: f32) -> Self {
        Frame {
            tex_key: tex_key.into(),
            duration,
        }
    }
}

/// Immutable ordered sequence of frames plus end-of-animation policy.
///
/// Assets are shared as `Arc<SpriteAnimation>` and never mutated during
/// playback. [`Animator`](crate::components::animator::Animator) uses pointer
/// identity (`Arc::ptr_eq`) to detect redundant restarts of the same asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteAnimation {
    /// Frames in playback order. May be empty; an empty animation is rejected
    /// by `play` instead of panicking.
    pub frames: Vec<Frame>,
    /// Whether the animation wraps to frame 0 indefinitely.
    #[serde(default)]
    pub looping: bool,
    /// When not looping, whether frame 0 is shown once playback ends.
    #[serde(default)]
    pub show_first_frame_at_end: bool,
}

impl SpriteAnimation {
    pub fn new(frames: Vec<Frame>) -> Self {
        SpriteAnimation {
            frames,
            looping: false,
            show_first_frame_at_end: false,
        }
    }

    pub fn with_looping(mut self) -> Self {
        self.looping = true;
        self
    }

    pub fn with_first_frame_at_end(mut self) -> Self {
        self.show_first_frame_at_end = true;
        self
    }

    /// Total duration of the animation in seconds.
    ///
    /// A looping animation never ends, so its duration is `f32::INFINITY`
    /// regardless of frame contents.
    pub fn total_duration(&self) -> f32 {
        if self.looping {
            f32::INFINITY
        } else {
            self.frames.iter().map(|frame| frame.duration).sum()
        }
    }
}

/// Central registry of reusable animation definitions keyed by string IDs.
#[derive(Resource, Default, Debug)]
pub struct AnimationStore {
    animations: FxHashMap<String, Arc<SpriteAnimation>>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an animation under `key`, replacing any previous definition.
    pub fn insert(&mut self, key: impl Into<String>, animation: SpriteAnimation) {
        self.animations.insert(key.into(), Arc::new(animation));
    }

    /// Look up an animation by key.
    pub fn get(&self, key: &str) -> Option<&Arc<SpriteAnimation>> {
        self.animations.get(key)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Build a store from a JSON definition document.
    ///
    /// Returns an error if the document cannot be parsed.
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let definitions: FxHashMap<String, SpriteAnimation> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse animation definitions: {}", e))?;

        let mut store = Self::new();
        for (key, animation) in definitions {
            store.insert(key, animation);
        }

        info!("Loaded {} animation definition(s)", store.len());

        Ok(store)
    }

    /// Load a store from a JSON definition file on disk.
    pub fn load_json_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_json_str(&json)
    }
}

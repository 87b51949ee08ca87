//! Sprite frame-animation playback.
//!
//! A data asset ([`SpriteAnimation`](resources::animationstore::SpriteAnimation))
//! describes an ordered sequence of frames with per-frame durations; the
//! [`Animator`](components::animator::Animator) component advances a timer each
//! tick and swaps the displayed [`Sprite`](components::sprite::Sprite) frame.
//! Rendering itself is out of scope: the sprite holds a texture key for an
//! external renderer to resolve.

pub mod components;
pub mod events;
pub mod resources;
pub mod systems;

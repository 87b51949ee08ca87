use bevy_ecs::prelude::Component;

/// Sprite render surface: the texture key a renderer resolves when drawing the
/// entity, plus its size in world units and flip flags.
///
/// The animator treats this as an external display slot; displaying a frame is
/// a single assignment to `tex_key`.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub tex_key: String,
    pub width: f32,
    pub height: f32,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Sprite {
    pub fn new(tex_key: impl Into<String>, width: f32, height: f32) -> Self {
        Sprite {
            tex_key: tex_key.into(),
            width,
            height,
            flip_h: false,
            flip_v: false,
        }
    }
}

use jr_core::Rect;

use crate::camera::Camera;

/// Image handle understood by the renderer. Animated sheets carry the name
/// of the state whose frame sequence should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Background(u8),
    Coin,
    Heart,
    ExitDoor,
    Enemy { state: &'static str },
    Player { state: &'static str },
}

/// Draw order, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrawLayer {
    Background,
    Items,
    Actors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawItem {
    pub layer: DrawLayer,
    pub sprite: SpriteKey,
    pub dest: Rect,
}

/// Collects world-space sprites and emits them in screen space, sorted by
/// layer. Items within a layer keep their push order.
pub struct DrawList<'a> {
    camera: &'a Camera,
    items: Vec<DrawItem>,
}

impl<'a> DrawList<'a> {
    pub fn new(camera: &'a Camera) -> Self {
        Self {
            camera,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, layer: DrawLayer, sprite: SpriteKey, world_rect: &Rect) {
        self.items.push(DrawItem {
            layer,
            sprite,
            dest: self.camera.apply(world_rect),
        });
    }

    pub fn finish(mut self) -> Vec<DrawItem> {
        // sort_by_key is stable
        self.items.sort_by_key(|item| item.layer);
        self.items
    }
}

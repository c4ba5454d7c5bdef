pub mod camera;
pub mod draw;

pub use camera::Camera;
pub use draw::{DrawItem, DrawLayer, DrawList, SpriteKey};

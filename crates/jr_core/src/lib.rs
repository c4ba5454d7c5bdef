pub mod input;
pub mod rect;
pub mod time;

pub use input::{Action, Binding, BindingEntry, InputBindings, InputState, KeyName};
pub use rect::Rect;
pub use time::TimeState;

pub mod keys;
pub mod window;

use std::sync::Arc;
use winit::error::OsError;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

pub const GAME_TITLE: &str = "JUNGLE RUN!";

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl PlatformConfig {
    /// Fixed-size window matching the simulation's screen in logical pixels.
    pub fn for_screen(width: i32, height: i32) -> Self {
        Self {
            title: GAME_TITLE.to_string(),
            width: width.max(1) as u32,
            height: height.max(1) as u32,
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self::for_screen(800, 640)
    }
}

/// The simulation assumes a constant screen size, so the window is not resizable.
pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, OsError> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_resizable(false)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

    let window = event_loop.create_window(attrs)?;
    log::debug!(
        "Window '{}' created at {}x{}",
        config.title,
        config.width,
        config.height
    );
    Ok(Arc::new(window))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_game_screen() {
        let config = PlatformConfig::default();
        assert_eq!((config.width, config.height), (800, 640));
        assert_eq!(config.title, GAME_TITLE);
    }

    #[test]
    fn degenerate_sizes_are_clamped() {
        let config = PlatformConfig::for_screen(0, -5);
        assert_eq!((config.width, config.height), (1, 1));
    }
}

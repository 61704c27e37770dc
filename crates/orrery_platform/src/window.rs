use std::sync::Arc;
use winit::event_loop::ActiveEventLoop;
use winit::window::{CursorGrabMode, Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Universe".to_string(),
            width: 800,
            height: 600,
        }
    }
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, String> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

    let window = event_loop
        .create_window(attrs)
        .map_err(|e| format!("Failed to create window: {e}"))?;
    Ok(Arc::new(window))
}

/// Capture the cursor for mouse-look, or release it for UI interaction.
///
/// Locked grab is unsupported on some platforms (notably Windows), so we fall
/// back to Confined before giving up. A grab failure is not fatal; the camera
/// still works, the cursor just stays visible.
pub fn set_cursor_captured(window: &Window, captured: bool) {
    if captured {
        if window.set_cursor_grab(CursorGrabMode::Locked).is_err() {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::Confined) {
                log::warn!("Failed to grab cursor: {e}");
            }
        }
        window.set_cursor_visible(false);
    } else {
        if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("Failed to release cursor: {e}");
        }
        window.set_cursor_visible(true);
    }
}

use crate::drawing::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    // x, y; None lets the window system decide
    pub position: Option<(i32, i32)>,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 1000,
            height: 600,
            title: "Vector Graphics Demo".to_string(),
            position: Some((0, 0)),
            resizable: true,
        }
    }
}

/// How the frame loop is paced.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum FrameLimit {
    /// Render as fast as possible.
    #[default]
    Unlimited,
    /// Let buffer swaps wait for the display refresh.
    VSync,
    /// Sleep so that at most this many frames are rendered per second.
    Fps(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub window: WindowConfig,
    pub clear_color: Color,
    pub frame_limit: FrameLimit,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window: WindowConfig::default(),
            clear_color: Color::rgba(0.7, 0.7, 0.7, 1.0),
            frame_limit: FrameLimit::Unlimited,
        }
    }
}

use crate::config::Config;
use crate::drawing::{Color, DrawingContext, FramePixels};
use crate::error::{DrawingError, InitializationError};
use crate::events::WindowEvent;
use crate::math::{Vec2, Viewport};

/// An OS window together with its graphics context.
pub trait Window {
    fn make_current(&mut self);
    // in window units
    fn window_size(&self) -> (u32, u32);
    // in pixels
    fn framebuffer_size(&self) -> (u32, u32);
    fn set_viewport(&mut self, viewport: Viewport);
    fn cursor_position(&self) -> Vec2;
    fn clear(&mut self, color: Color);

    /// Presents the finished frame and appends pending OS events to
    /// `events`.
    fn swap_and_poll(
        &mut self,
        frame: Option<FramePixels<'_>>,
        events: &mut Vec<WindowEvent>,
    ) -> Result<(), DrawingError>;

    /// Framebuffer pixels per window unit along x.
    ///
    /// Drawing contexts take a single ratio, so a display with different x
    /// and y densities gets a frame sized by the x ratio that is stretched
    /// to the viewport when presented.
    fn pixel_ratio(&self) -> f32 {
        let (w, _) = self.window_size();
        let (fw, _) = self.framebuffer_size();
        if w == 0 {
            return 1.0;
        }
        fw as f32 / w as f32
    }
}

/// Creates and destroys windows and drawing contexts.
pub trait Platform {
    type Window: Window;
    type Context: DrawingContext;

    fn create_window(&mut self, config: &Config) -> Result<Self::Window, InitializationError>;
    /// Called with `window`'s context current.
    fn create_context(&mut self, window: &mut Self::Window) -> Result<Self::Context, InitializationError>;
    fn destroy_context(&mut self, context: Self::Context);
    fn destroy_window(&mut self, window: Self::Window);
}

use log::{debug, info, trace};

use crate::events::{Action, Key, MouseButton, WindowEvent};
use crate::math::Viewport;
use crate::state::ApplicationState;
use crate::window::Window;

/// What an event handler may touch.
pub struct EventContext<'a> {
    pub state: &'a mut ApplicationState,
    pub window: &'a mut dyn Window,
}

/// Turns window events into [`ApplicationState`] changes.
///
/// Every method has the default behavior; override only what differs.
pub trait EventHandler {
    fn on_resize(&mut self, cx: &mut EventContext<'_>, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);

        cx.window.make_current();
        let viewport = Viewport::scaled(
            width,
            height,
            cx.window.window_size(),
            cx.window.framebuffer_size(),
        );
        debug!("resize to {width}x{height}, viewport {}x{}", viewport.width, viewport.height);
        cx.window.set_viewport(viewport);

        cx.state.width = width;
        cx.state.height = height;
    }

    fn on_key(&mut self, cx: &mut EventContext<'_>, key: &Key, action: Action) {
        if action == Action::Press && *key == Key::Escape {
            self.on_close(cx);
        }
    }

    fn on_button(&mut self, cx: &mut EventContext<'_>, button: MouseButton, action: Action) {
        // TODO: map into content space once a scene exposes its own coordinates
        let pos = cx.window.cursor_position();
        trace!("{button:?} {action:?} at ({}, {})", pos.x, pos.y);
    }

    fn on_close(&mut self, cx: &mut EventContext<'_>) {
        cx.state.quit = true;
        info!("Process closing from window");
    }

    fn dispatch(&mut self, cx: &mut EventContext<'_>, event: &WindowEvent) {
        match event {
            WindowEvent::Resized(w, h) => self.on_resize(cx, *w, *h),
            WindowEvent::Key(key, action) => self.on_key(cx, key, *action),
            WindowEvent::MouseButton(button, action) => self.on_button(cx, *button, *action),
            WindowEvent::Close => self.on_close(cx),
        }
    }
}

/// Handler with the stock behavior.
#[derive(Debug, Default, Copy, Clone)]
pub struct BaseHandler;

impl EventHandler for BaseHandler {}

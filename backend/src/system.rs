use canvas::Canvas;
use gl;
use harness::{
    Action, Color, Config, DrawingError, FrameLimit, FramePixels, InitializationError, Key,
    MouseButton, Platform, Vec2, Viewport, Window, WindowEvent,
};
use log::{debug, info, warn};
use sdl2;
use sdl2::event::{Event, WindowEvent as SdlWindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton as SdlMouseButton;
use sdl2::video::{GLProfile, SwapInterval};

use crate::blit::Blitter;
use crate::glutils::{basic_gl_setup, clear_screen, print_opengl_info, set_viewport};

/// SDL2 window with an OpenGL 3.3 core context.
///
/// Fields drop in declaration order: GL objects go before the context, the
/// context before its window and the window before SDL itself.
pub struct System {
    blitter: Blitter,
    gl_ctx: sdl2::video::GLContext,
    window: sdl2::video::Window,
    event_pump: sdl2::EventPump,
    _video_subsystem: sdl2::VideoSubsystem,
    _sdl_context: sdl2::Sdl,
}

impl System {
    pub fn new(config: &Config) -> Result<System, InitializationError> {
        let sdl_context = sdl2::init().map_err(InitializationError::Platform)?;
        let video_subsystem = sdl_context.video().map_err(InitializationError::Platform)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let wc = &config.window;
        let mut builder = video_subsystem.window(&wc.title, wc.width.max(1), wc.height.max(1));
        builder.opengl().allow_highdpi();
        if wc.resizable {
            builder.resizable();
        }
        match wc.position {
            Some((x, y)) => builder.position(x, y),
            None => builder.position_centered(),
        };
        let window = builder
            .build()
            .map_err(|e| InitializationError::Window(format!("error while building OpenGL window: {e}")))?;

        let gl_ctx = window
            .gl_create_context()
            .map_err(InitializationError::Context)?;
        window
            .gl_make_current(&gl_ctx)
            .map_err(InitializationError::Context)?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        debug_assert_eq!(gl_attr.context_version(), (3, 3));

        let interval = match config.frame_limit {
            FrameLimit::VSync => SwapInterval::VSync,
            FrameLimit::Unlimited | FrameLimit::Fps(_) => SwapInterval::Immediate,
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            warn!("swap interval {:?} not supported: {}", interval, e);
        }

        print_opengl_info();
        basic_gl_setup();
        let blitter = Blitter::new().map_err(InitializationError::Context)?;
        let event_pump = sdl_context.event_pump().map_err(InitializationError::Platform)?;

        info!(
            "window '{}' created, {:?} window units, {:?} pixels",
            wc.title,
            window.size(),
            window.drawable_size()
        );
        Ok(System {
            blitter,
            gl_ctx,
            window,
            event_pump,
            _video_subsystem: video_subsystem,
            _sdl_context: sdl_context,
        })
    }
}

impl Window for System {
    fn make_current(&mut self) {
        if let Err(e) = self.window.gl_make_current(&self.gl_ctx) {
            warn!("could not make GL context current: {}", e);
        }
    }

    fn window_size(&self) -> (u32, u32) {
        self.window.size()
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        set_viewport(viewport.width, viewport.height);
    }

    fn cursor_position(&self) -> Vec2 {
        let mouse = self.event_pump.mouse_state();
        Vec2::new(mouse.x() as f32, mouse.y() as f32)
    }

    fn clear(&mut self, color: Color) {
        clear_screen(color);
    }

    fn swap_and_poll(
        &mut self,
        frame: Option<FramePixels<'_>>,
        events: &mut Vec<WindowEvent>,
    ) -> Result<(), DrawingError> {
        if let Some(frame) = frame {
            self.blitter.draw(frame).map_err(DrawingError::Present)?;
        }
        self.window.gl_swap_window();

        events.extend(self.event_pump.poll_iter().filter_map(|e| translate(&e)));
        Ok(())
    }
}

/// Maps SDL events onto the window events the dispatcher understands.
pub fn translate(event: &Event) -> Option<WindowEvent> {
    match event {
        Event::Quit { .. } => Some(WindowEvent::Close),
        Event::Window { win_event, .. } => match win_event {
            // closing the only window also queues Event::Quit
            SdlWindowEvent::Close => None,
            SdlWindowEvent::SizeChanged(w, h) => {
                Some(WindowEvent::Resized((*w).max(0) as u32, (*h).max(0) as u32))
            }
            _ => None,
        },
        Event::KeyDown {
            keycode: Some(keycode),
            repeat,
            ..
        } => {
            let action = if *repeat { Action::Repeat } else { Action::Press };
            Some(WindowEvent::Key(translate_key(*keycode), action))
        }
        Event::KeyUp {
            keycode: Some(keycode),
            ..
        } => Some(WindowEvent::Key(translate_key(*keycode), Action::Release)),
        Event::MouseButtonDown { mouse_btn, .. } => {
            Some(WindowEvent::MouseButton(translate_button(*mouse_btn), Action::Press))
        }
        Event::MouseButtonUp { mouse_btn, .. } => {
            Some(WindowEvent::MouseButton(translate_button(*mouse_btn), Action::Release))
        }
        _ => None,
    }
}

pub fn translate_key(keycode: Keycode) -> Key {
    match keycode {
        Keycode::Escape => Key::Escape,
        other => Key::Other(other.name()),
    }
}

pub fn translate_button(button: SdlMouseButton) -> MouseButton {
    match button {
        SdlMouseButton::Left => MouseButton::Left,
        SdlMouseButton::Right => MouseButton::Right,
        SdlMouseButton::Middle => MouseButton::Middle,
        SdlMouseButton::X1 => MouseButton::Other(4),
        SdlMouseButton::X2 => MouseButton::Other(5),
        SdlMouseButton::Unknown => MouseButton::Other(0),
    }
}

/// Opens [`System`] windows and draws into them with a [`Canvas`].
#[derive(Debug, Default)]
pub struct SdlPlatform;

impl Platform for SdlPlatform {
    type Window = System;
    type Context = Canvas;

    fn create_window(&mut self, config: &Config) -> Result<System, InitializationError> {
        System::new(config)
    }

    fn create_context(&mut self, window: &mut System) -> Result<Canvas, InitializationError> {
        debug!(
            "creating canvas for a {:?} framebuffer",
            window.framebuffer_size()
        );
        Ok(Canvas::new())
    }

    fn destroy_context(&mut self, context: Canvas) {
        drop(context);
    }

    fn destroy_window(&mut self, window: System) {
        drop(window);
        info!("window destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_the_window_closes_once() {
        assert_eq!(translate(&Event::Quit { timestamp: 0 }), Some(WindowEvent::Close));
        let close = Event::Window {
            timestamp: 0,
            window_id: 1,
            win_event: SdlWindowEvent::Close,
        };
        assert_eq!(translate(&close), None);
    }

    #[test]
    fn size_changed_becomes_resize() {
        let resized = Event::Window {
            timestamp: 0,
            window_id: 1,
            win_event: SdlWindowEvent::SizeChanged(640, -3),
        };
        assert_eq!(translate(&resized), Some(WindowEvent::Resized(640, 0)));

        let moved = Event::Window {
            timestamp: 0,
            window_id: 1,
            win_event: SdlWindowEvent::Moved(10, 10),
        };
        assert_eq!(translate(&moved), None);
    }

    #[test]
    fn keys_and_buttons() {
        assert_eq!(translate_key(Keycode::Escape), Key::Escape);
        assert_eq!(translate_key(Keycode::A), Key::Other("A".to_string()));
        assert_eq!(translate_button(SdlMouseButton::Left), MouseButton::Left);
        assert_eq!(translate_button(SdlMouseButton::X1), MouseButton::Other(4));
    }
}

use std::time::Duration;

use log::{debug, info};

use crate::config::Config;
use crate::dispatch::{BaseHandler, EventContext, EventHandler};
use crate::drawing::DrawingContext;
use crate::error::{AssetLoadError, DrawingError, Error, InitializationError};
use crate::events::WindowEvent;
use crate::math::{Vec2, Viewport};
use crate::pacing::Pacer;
use crate::state::ApplicationState;
use crate::window::{Platform, Window};

/// Per-frame input handed to a [`Render`] callback.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameInfo {
    // window units
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
    pub cursor: Vec2,
    pub frame: u64,
    pub dt: Duration,
    pub elapsed: Duration,
    pub fps: f32,
}

/// Application drawing code run once per frame.
pub trait Render {
    /// Loads fonts and images; runs once after the drawing context exists.
    fn load(&mut self, _vg: &mut dyn DrawingContext) -> Result<(), AssetLoadError> {
        Ok(())
    }

    fn render(&mut self, frame: &FrameInfo, vg: &mut dyn DrawingContext) -> Result<(), DrawingError>;
}

impl<F> Render for F
where
    F: FnMut(&FrameInfo, &mut dyn DrawingContext) -> Result<(), DrawingError>,
{
    fn render(&mut self, frame: &FrameInfo, vg: &mut dyn DrawingContext) -> Result<(), DrawingError> {
        self(frame, vg)
    }
}

struct Session<P: Platform> {
    window: P::Window,
    context: P::Context,
}

/// Owns the window, the drawing context and the application state, and
/// drives the frame loop.
pub struct App<P: Platform, H: EventHandler = BaseHandler> {
    platform: P,
    config: Config,
    handler: H,
    state: ApplicationState,
    session: Option<Session<P>>,
    pacer: Pacer,
    events: Vec<WindowEvent>,
}

impl<P: Platform> App<P> {
    pub fn new(platform: P, config: Config) -> App<P> {
        App::with_handler(platform, config, BaseHandler)
    }
}

impl<P: Platform, H: EventHandler> App<P, H> {
    pub fn with_handler(platform: P, config: Config, handler: H) -> App<P, H> {
        App {
            state: ApplicationState::new(config.window.width, config.window.height),
            pacer: Pacer::new(config.frame_limit),
            platform,
            config,
            handler,
            session: None,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    pub fn is_set_up(&self) -> bool {
        self.session.is_some()
    }

    /// Creates the window, makes its context current and creates the
    /// drawing context on top of it.
    pub fn setup(&mut self) -> Result<(), InitializationError> {
        if self.session.is_some() {
            return Err(InitializationError::AlreadySetUp);
        }

        let mut window = self.platform.create_window(&self.config)?;
        window.make_current();
        let context = match self.platform.create_context(&mut window) {
            Ok(context) => context,
            Err(e) => {
                self.platform.destroy_window(window);
                return Err(e);
            }
        };

        self.state = ApplicationState::new(self.config.window.width, self.config.window.height);
        let viewport = Viewport::scaled(
            self.state.width,
            self.state.height,
            window.window_size(),
            window.framebuffer_size(),
        );
        window.set_viewport(viewport);
        self.pacer = Pacer::new(self.config.frame_limit);

        info!(
            "window {}x{} ready, framebuffer {}x{}",
            self.state.width, self.state.height, viewport.width, viewport.height
        );
        self.session = Some(Session { window, context });
        Ok(())
    }

    /// Runs one frame: clear, sample the cursor, render, present and
    /// dispatch the events that came in.
    pub fn step<R: Render + ?Sized>(&mut self, render: &mut R) -> Result<(), Error> {
        let Some(session) = self.session.as_mut() else {
            return Err(InitializationError::NotSetUp.into());
        };
        let tick = self.pacer.tick();

        session.window.clear(self.config.clear_color);
        self.state.cursor = session.window.cursor_position();

        let frame = FrameInfo {
            width: self.state.width,
            height: self.state.height,
            pixel_ratio: session.window.pixel_ratio(),
            cursor: self.state.cursor,
            frame: tick.frame,
            dt: tick.dt,
            elapsed: tick.elapsed,
            fps: tick.fps,
        };
        session
            .context
            .begin_frame(frame.width, frame.height, frame.pixel_ratio)?;
        render.render(&frame, &mut session.context)?;
        session.context.end_frame()?;

        session
            .window
            .swap_and_poll(session.context.frame_pixels(), &mut self.events)?;
        for event in self.events.drain(..) {
            let mut cx = EventContext {
                state: &mut self.state,
                window: &mut session.window,
            };
            self.handler.dispatch(&mut cx, &event);
        }

        if tick.frame % 600 == 0 {
            debug!("frame {}: {:.1} fps", tick.frame, tick.fps);
        }
        self.pacer.wait();
        Ok(())
    }

    /// Sets up, loops until quit is requested and tears down. Teardown runs
    /// on every exit path, the first error is returned.
    pub fn run<R: Render + ?Sized>(&mut self, render: &mut R) -> Result<(), Error> {
        self.setup()?;
        let result = self.run_loop(render);
        self.teardown();
        result
    }

    fn run_loop<R: Render + ?Sized>(&mut self, render: &mut R) -> Result<(), Error> {
        if let Some(session) = self.session.as_mut() {
            render.load(&mut session.context)?;
        }
        let mut frames = 0u64;
        while !self.state.quit {
            self.step(render)?;
            frames += 1;
        }
        info!("frame loop stopped after {frames} frames");
        Ok(())
    }

    /// Releases the drawing context, then the window. Does nothing when the
    /// app is not set up.
    pub fn teardown(&mut self) {
        let Some(Session { window, mut context }) = self.session.take() else {
            return;
        };
        context.reset();
        self.platform.destroy_context(context);
        self.platform.destroy_window(window);
        info!("teardown complete");
    }
}

impl<P: Platform, H: EventHandler> Drop for App<P, H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

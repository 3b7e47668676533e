use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use harness::recording::RecordingContext;
use harness::{
    Action, App, Color, Config, DrawingContext, DrawingError, Error, FrameInfo, FramePixels,
    InitializationError, Key, Platform, Vec2, Viewport, Window, WindowEvent,
};

#[derive(Default)]
struct Log {
    calls: Vec<String>,
    // events handed out on each successive swap_and_poll
    script: VecDeque<Vec<WindowEvent>>,
    viewports: Vec<Viewport>,
    context_calls: Vec<String>,
    windows_created: usize,
    windows_destroyed: usize,
    contexts_created: usize,
    contexts_destroyed: usize,
}

type Shared = Rc<RefCell<Log>>;

struct StubWindow {
    log: Shared,
}

impl Window for StubWindow {
    fn make_current(&mut self) {
        self.log.borrow_mut().calls.push("make_current".into());
    }

    fn window_size(&self) -> (u32, u32) {
        (800, 600)
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        (1600, 1200)
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.log.borrow_mut().viewports.push(viewport);
    }

    fn cursor_position(&self) -> Vec2 {
        self.log.borrow_mut().calls.push("cursor".into());
        Vec2::new(10.0, 20.0)
    }

    fn clear(&mut self, _color: Color) {
        self.log.borrow_mut().calls.push("clear".into());
    }

    fn swap_and_poll(
        &mut self,
        _frame: Option<FramePixels<'_>>,
        events: &mut Vec<WindowEvent>,
    ) -> Result<(), DrawingError> {
        let mut log = self.log.borrow_mut();
        log.calls.push("swap_and_poll".into());
        if let Some(next) = log.script.pop_front() {
            events.extend(next);
        }
        Ok(())
    }
}

#[derive(Default)]
struct StubPlatform {
    log: Shared,
    fail_window: bool,
    fail_context: bool,
}

impl StubPlatform {
    fn scripted(frames: Vec<Vec<WindowEvent>>) -> StubPlatform {
        let platform = StubPlatform::default();
        platform.log.borrow_mut().script = frames.into();
        platform
    }
}

impl Platform for StubPlatform {
    type Window = StubWindow;
    type Context = RecordingContext;

    fn create_window(&mut self, _config: &Config) -> Result<StubWindow, InitializationError> {
        if self.fail_window {
            return Err(InitializationError::Window("no display".into()));
        }
        let mut log = self.log.borrow_mut();
        log.windows_created += 1;
        log.calls.push("create_window".into());
        Ok(StubWindow {
            log: self.log.clone(),
        })
    }

    fn create_context(&mut self, _window: &mut StubWindow) -> Result<RecordingContext, InitializationError> {
        if self.fail_context {
            return Err(InitializationError::Context("no GL".into()));
        }
        let mut log = self.log.borrow_mut();
        log.contexts_created += 1;
        log.calls.push("create_context".into());
        Ok(RecordingContext::new())
    }

    fn destroy_context(&mut self, context: RecordingContext) {
        let mut log = self.log.borrow_mut();
        log.contexts_destroyed += 1;
        log.calls.push("destroy_context".into());
        log.context_calls = context.calls;
    }

    fn destroy_window(&mut self, _window: StubWindow) {
        let mut log = self.log.borrow_mut();
        log.windows_destroyed += 1;
        log.calls.push("destroy_window".into());
    }
}

fn noop(_frame: &FrameInfo, _vg: &mut dyn DrawingContext) -> Result<(), DrawingError> {
    Ok(())
}

#[test]
fn one_iteration_runs_in_fixed_order() {
    let platform = StubPlatform::default();
    let log = platform.log.clone();
    let mut app = App::new(platform, Config::default());
    app.setup().unwrap();
    log.borrow_mut().calls.clear();

    let render_log = log.clone();
    let mut render = move |_frame: &FrameInfo, vg: &mut dyn DrawingContext| -> Result<(), DrawingError> {
        render_log.borrow_mut().calls.push("render".into());
        vg.begin_path();
        vg.rect(0.0, 0.0, 1.0, 1.0);
        vg.fill()
    };
    app.step(&mut render).unwrap();

    assert_eq!(log.borrow().calls, vec!["clear", "cursor", "render", "swap_and_poll"]);

    app.teardown();
    assert_eq!(
        log.borrow().context_calls,
        vec!["begin_frame 1000 600 2", "begin_path", "rect 0 0 1 1", "fill", "end_frame", "reset"]
    );
}

#[test]
fn cursor_position_reaches_render() {
    let mut app = App::new(StubPlatform::default(), Config::default());
    app.setup().unwrap();

    let mut seen = None;
    let mut render = |frame: &FrameInfo, _vg: &mut dyn DrawingContext| -> Result<(), DrawingError> {
        seen = Some(frame.cursor);
        Ok(())
    };
    app.step(&mut render).unwrap();

    assert_eq!(seen, Some(Vec2::new(10.0, 20.0)));
    assert_eq!(app.state().cursor, Vec2::new(10.0, 20.0));
}

#[test]
fn close_event_ends_loop_after_current_iteration() {
    let platform = StubPlatform::scripted(vec![vec![], vec![WindowEvent::Close], vec![]]);
    let log = platform.log.clone();
    let mut app = App::new(platform, Config::default());

    let mut frames = 0;
    let mut render = |_frame: &FrameInfo, _vg: &mut dyn DrawingContext| -> Result<(), DrawingError> {
        frames += 1;
        Ok(())
    };
    app.run(&mut render).unwrap();

    assert_eq!(frames, 2);
    assert!(app.state().quit);
    assert!(!app.is_set_up());

    let log = log.borrow();
    assert_eq!(log.windows_destroyed, 1);
    assert_eq!(log.contexts_destroyed, 1);
    let tail: Vec<&str> = log.calls.iter().rev().take(3).map(String::as_str).collect();
    assert_eq!(tail, vec!["destroy_window", "destroy_context", "swap_and_poll"]);
}

#[test]
fn escape_key_quits_without_touching_other_state() {
    let platform = StubPlatform::scripted(vec![vec![WindowEvent::Key(Key::Escape, Action::Press)]]);
    let mut app = App::new(platform, Config::default());

    app.run(&mut noop).unwrap();

    let state = app.state();
    assert!(state.quit);
    assert_eq!((state.width, state.height), (1000, 600));
    assert_eq!(state.cursor, Vec2::new(10.0, 20.0));
}

#[test]
fn resize_applies_hidpi_viewport() {
    let platform = StubPlatform::scripted(vec![
        vec![WindowEvent::Resized(400, 300)],
        vec![WindowEvent::Close],
    ]);
    let log = platform.log.clone();
    let mut app = App::new(platform, Config::default());

    let mut sizes = Vec::new();
    let mut render = |frame: &FrameInfo, _vg: &mut dyn DrawingContext| -> Result<(), DrawingError> {
        sizes.push((frame.width, frame.height));
        Ok(())
    };
    app.run(&mut render).unwrap();

    assert_eq!(sizes, vec![(1000, 600), (400, 300)]);
    assert_eq!(
        log.borrow().viewports.last(),
        Some(&Viewport {
            width: 800,
            height: 600
        })
    );
}

#[test]
fn repeated_setup_teardown_cycles_do_not_leak() {
    let platform = StubPlatform::default();
    let log = platform.log.clone();
    let mut app = App::new(platform, Config::default());

    for _ in 0..2 {
        log.borrow_mut().script.push_back(vec![WindowEvent::Close]);
        app.run(&mut noop).unwrap();
    }

    let log = log.borrow();
    assert_eq!(log.windows_created, 2);
    assert_eq!(log.windows_destroyed, 2);
    assert_eq!(log.contexts_created, 2);
    assert_eq!(log.contexts_destroyed, 2);
}

#[test]
fn teardown_is_idempotent() {
    let platform = StubPlatform::default();
    let log = platform.log.clone();
    let mut app = App::new(platform, Config::default());

    app.teardown();
    app.setup().unwrap();
    app.teardown();
    app.teardown();
    drop(app);

    let log = log.borrow();
    assert_eq!(log.windows_destroyed, 1);
    assert_eq!(log.contexts_destroyed, 1);
}

#[test]
fn dropping_app_tears_down() {
    let platform = StubPlatform::default();
    let log = platform.log.clone();
    let mut app = App::new(platform, Config::default());
    app.setup().unwrap();
    drop(app);

    let log = log.borrow();
    assert_eq!(log.windows_destroyed, 1);
    assert_eq!(log.contexts_destroyed, 1);
}

#[test]
fn window_failure_aborts_before_loop() {
    let platform = StubPlatform {
        fail_window: true,
        ..Default::default()
    };
    let log = platform.log.clone();
    let mut app = App::new(platform, Config::default());

    let mut frames = 0;
    let mut render = |_frame: &FrameInfo, _vg: &mut dyn DrawingContext| -> Result<(), DrawingError> {
        frames += 1;
        Ok(())
    };
    let err = app.run(&mut render).unwrap_err();

    assert!(matches!(err, Error::Initialization(InitializationError::Window(_))));
    assert_eq!(frames, 0);
    assert_eq!(log.borrow().windows_destroyed, 0);
}

#[test]
fn context_failure_releases_window() {
    let platform = StubPlatform {
        fail_context: true,
        ..Default::default()
    };
    let log = platform.log.clone();
    let mut app = App::new(platform, Config::default());

    let err = app.setup().unwrap_err();

    assert!(matches!(err, InitializationError::Context(_)));
    assert!(!app.is_set_up());
    let log = log.borrow();
    assert_eq!(log.windows_created, 1);
    assert_eq!(log.windows_destroyed, 1);
    assert_eq!(log.contexts_destroyed, 0);
}

#[test]
fn drawing_error_propagates_and_tears_down_once() {
    let platform = StubPlatform::default();
    let log = platform.log.clone();
    let mut app = App::new(platform, Config::default());

    let mut render = |_frame: &FrameInfo, vg: &mut dyn DrawingContext| -> Result<(), DrawingError> {
        vg.font_face("missing")?;
        Ok(())
    };
    let err = app.run(&mut render).unwrap_err();

    assert!(matches!(err, Error::Drawing(DrawingError::UnknownFont(_))));
    let log = log.borrow();
    assert_eq!(log.windows_destroyed, 1);
    assert_eq!(log.contexts_destroyed, 1);
    assert!(!log.calls.iter().any(|c| c == "swap_and_poll"));
}

#[test]
fn setup_twice_is_rejected() {
    let mut app = App::new(StubPlatform::default(), Config::default());
    app.setup().unwrap();
    assert!(matches!(app.setup(), Err(InitializationError::AlreadySetUp)));
}

#[test]
fn step_before_setup_is_rejected() {
    let mut app = App::new(StubPlatform::default(), Config::default());
    let err = app.step(&mut noop).unwrap_err();
    assert!(matches!(err, Error::Initialization(InitializationError::NotSetUp)));
}

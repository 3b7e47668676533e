pub mod app;
pub mod config;
pub mod dispatch;
pub mod drawing;
pub mod error;
pub mod events;
pub mod math;
pub mod pacing;
pub mod recording;
pub mod state;
pub mod window;

pub use app::{App, FrameInfo, Render};
pub use config::{Config, FrameLimit, WindowConfig};
pub use dispatch::{BaseHandler, EventContext, EventHandler};
pub use drawing::{Color, DrawingContext, FontId, FramePixels, ImageFlags, ImageId, Paint};
pub use error::{AssetLoadError, DrawingError, Error, InitializationError};
pub use events::{Action, Key, MouseButton, WindowEvent};
pub use math::{Vec2, Viewport};
pub use state::ApplicationState;
pub use window::{Platform, Window};

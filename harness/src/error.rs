use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::drawing::ImageId;

/// Window system or graphics context could not be brought up.
#[derive(Error, Debug)]
pub enum InitializationError {
    #[error("windowing system initialization failed: {0}")]
    Platform(String),

    #[error("window creation failed: {0}")]
    Window(String),

    #[error("graphics context creation failed: {0}")]
    Context(String),

    #[error("application is already set up")]
    AlreadySetUp,

    #[error("application is not set up")]
    NotSetUp,
}

#[derive(Error, Debug)]
pub enum AssetLoadError {
    #[error("error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("font {} could not be loaded: {reason}", path.display())]
    Font { path: PathBuf, reason: String },

    #[error("image {} could not be loaded: {reason}", path.display())]
    Image { path: PathBuf, reason: String },
}

impl AssetLoadError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            AssetLoadError::Io { path, .. }
            | AssetLoadError::Font { path, .. }
            | AssetLoadError::Image { path, .. } => path,
        }
    }
}

/// Failure raised by a drawing context in the middle of a frame.
#[derive(Error, Debug)]
pub enum DrawingError {
    #[error("drawing outside of begin_frame/end_frame")]
    NotInFrame,

    #[error("no font face selected")]
    NoFont,

    #[error("unknown font face '{0}'")]
    UnknownFont(String),

    #[error("unknown image {0:?}")]
    UnknownImage(ImageId),

    #[error("render target error: {0}")]
    Surface(String),

    #[error("presentation error: {0}")]
    Present(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    #[error(transparent)]
    AssetLoad(#[from] AssetLoadError),

    #[error(transparent)]
    Drawing(#[from] DrawingError),
}

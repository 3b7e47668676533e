use crate::math::Vec2;

/// Everything the frame loop and the event handlers share.
///
/// Owned by [`App`](crate::App); handlers see it through
/// [`EventContext`](crate::EventContext).
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationState {
    pub width: u32,
    pub height: u32,
    pub quit: bool,
    pub cursor: Vec2,
}

impl ApplicationState {
    pub fn new(width: u32, height: u32) -> ApplicationState {
        ApplicationState {
            width: width.max(1),
            height: height.max(1),
            quit: false,
            cursor: Vec2::ZERO,
        }
    }
}

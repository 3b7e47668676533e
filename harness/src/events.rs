#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Press,
    Release,
    Repeat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    // backend specific key name
    Other(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u8),
}

/// Window system events, already translated from the backend's own types.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    // width, height in window units
    Resized(u32, u32),
    Key(Key, Action),
    MouseButton(MouseButton, Action),
    Close,
}

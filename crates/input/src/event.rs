use glam::{IVec2, Vec2};

/// Keys the viewer distinguishes. Anything else arrives as [`Key::Other`]
/// carrying the host's scan code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    W,
    A,
    S,
    D,
    L,
    Y,
    Z,
    Left,
    Right,
    Up,
    Down,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    Backslash,
    F11,
    Other(u32),
}

/// Modifier keys held when a key event was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Other(u16),
}

/// Window state changes reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// Pointer entered the window.
    MouseEntered,
    /// Pointer left the window.
    MouseLeft,
    FocusGained,
    FocusLost,
    Minimized,
    Maximized,
    Restored,
    /// The window contents were invalidated and must be redrawn.
    Exposed,
    /// Drawable size changed, in pixels.
    Resized { width: u32, height: u32 },
}

/// One event from the host platform.
///
/// Positions are window pixels with a top-left origin. The enum is
/// non-exhaustive: dispatchers must keep a default arm for variants added
/// by newer hosts.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum HostEvent {
    Key {
        key: Key,
        pressed: bool,
        /// Auto-repeat of a key that is already held.
        repeat: bool,
        modifiers: Modifiers,
    },
    MouseMove {
        position: IVec2,
    },
    MouseWheel {
        delta: Vec2,
    },
    MouseButton {
        button: MouseButton,
        pressed: bool,
        position: IVec2,
    },
    Window(WindowEvent),
    JoyAxis {
        device: u32,
        axis: u8,
        value: i16,
    },
    JoyBall {
        device: u32,
        ball: u8,
        delta: IVec2,
    },
    JoyHat {
        device: u32,
        hat: u8,
        value: u8,
    },
    JoyButton {
        device: u32,
        button: u8,
        pressed: bool,
    },
    ControllerAxis {
        device: u32,
        axis: u8,
        value: i16,
    },
    ControllerButton {
        device: u32,
        button: u8,
        pressed: bool,
    },
    /// The user or the platform asked the application to quit.
    Quit,
    /// Application-defined event.
    User {
        code: i32,
    },
}

impl HostEvent {
    pub fn key_down(key: Key) -> Self {
        Self::Key {
            key,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key_up(key: Key) -> Self {
        Self::Key {
            key,
            pressed: false,
            repeat: false,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn mouse_down(button: MouseButton, x: i32, y: i32) -> Self {
        Self::MouseButton {
            button,
            pressed: true,
            position: IVec2::new(x, y),
        }
    }

    pub fn mouse_up(button: MouseButton, x: i32, y: i32) -> Self {
        Self::MouseButton {
            button,
            pressed: false,
            position: IVec2::new(x, y),
        }
    }

    pub fn resized(width: u32, height: u32) -> Self {
        Self::Window(WindowEvent::Resized { width, height })
    }
}

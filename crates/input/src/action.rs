use crate::event::{Key, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

/// A high-level action the viewer reacts to.
///
/// The viewer consumes actions, never raw key codes, so the bindings live in
/// one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Scroll the camera while the key is held.
    Pan(PanDirection),
    /// Scroll faster while held.
    Boost,
    /// Scroll slower while held.
    Creep,
    /// Stop the event loop.
    Quit,
    /// Toggle the per-second statistics log.
    ToggleStats,
    /// Log the camera and view-window state on the next frame.
    DumpView,
    /// Undo the last tile edit.
    Undo,
    /// Redo the last undone tile edit.
    Redo,
}

/// Map a key (with the modifiers held at the time) to the action it triggers.
pub fn action_for_key(key: Key, modifiers: Modifiers) -> Option<Action> {
    let action = match key {
        Key::Escape => Action::Quit,
        Key::A | Key::Left => Action::Pan(PanDirection::Left),
        Key::D | Key::Right => Action::Pan(PanDirection::Right),
        Key::W | Key::Up => Action::Pan(PanDirection::Up),
        Key::S | Key::Down => Action::Pan(PanDirection::Down),
        Key::LeftShift | Key::RightShift => Action::Boost,
        Key::LeftControl | Key::RightControl => Action::Creep,
        Key::L => Action::ToggleStats,
        Key::Backslash => Action::DumpView,
        Key::Z if modifiers.control => Action::Undo,
        Key::Y if modifiers.control => Action::Redo,
        _ => return None,
    };
    Some(action)
}

//! Translation from winit input types to host events.

use glam::Vec2;
use tileworld_input::{Key, Modifiers, MouseButton};
use winit::event::{MouseButton as WinitButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

/// Pixels treated as one wheel line when the platform reports pixel deltas.
const PIXELS_PER_LINE: f32 = 32.0;

pub fn key(physical: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = physical else {
        // winit has no portable scan code for unidentified keys.
        return Key::Other(0);
    };
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ShiftLeft => Key::LeftShift,
        KeyCode::ShiftRight => Key::RightShift,
        KeyCode::ControlLeft => Key::LeftControl,
        KeyCode::ControlRight => Key::RightControl,
        KeyCode::Backslash => Key::Backslash,
        KeyCode::F11 => Key::F11,
        _ => Key::Other(0),
    }
}

pub fn modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        control: state.control_key(),
        alt: state.alt_key(),
    }
}

pub fn button(button: WinitButton) -> MouseButton {
    match button {
        WinitButton::Left => MouseButton::Left,
        WinitButton::Right => MouseButton::Right,
        WinitButton::Middle => MouseButton::Middle,
        WinitButton::Back => MouseButton::Other(3),
        WinitButton::Forward => MouseButton::Other(4),
        WinitButton::Other(id) => MouseButton::Other(id),
    }
}

/// Wheel motion in lines, positive away from the user.
pub fn wheel(delta: MouseScrollDelta) -> Vec2 {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => Vec2::new(x, y),
        MouseScrollDelta::PixelDelta(p) => Vec2::new(p.x as f32, p.y as f32) / PIXELS_PER_LINE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn bound_keys_translate() {
        assert_eq!(key(PhysicalKey::Code(KeyCode::KeyW)), Key::W);
        assert_eq!(key(PhysicalKey::Code(KeyCode::ArrowDown)), Key::Down);
        assert_eq!(key(PhysicalKey::Code(KeyCode::ShiftRight)), Key::RightShift);
        assert_eq!(key(PhysicalKey::Code(KeyCode::Backslash)), Key::Backslash);
        assert_eq!(key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Other(0));
    }

    #[test]
    fn modifier_state_translates() {
        let held = modifiers(ModifiersState::CONTROL | ModifiersState::SHIFT);
        assert!(held.control && held.shift && !held.alt);
        assert_eq!(modifiers(ModifiersState::empty()), Modifiers::NONE);
    }

    #[test]
    fn buttons_translate() {
        assert_eq!(button(WinitButton::Middle), MouseButton::Middle);
        assert_eq!(button(WinitButton::Back), MouseButton::Other(3));
        assert_eq!(button(WinitButton::Other(9)), MouseButton::Other(9));
    }

    #[test]
    fn pixel_wheel_deltas_scale_to_lines() {
        assert_eq!(wheel(MouseScrollDelta::LineDelta(0.0, -1.0)), Vec2::new(0.0, -1.0));
        assert_eq!(
            wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 64.0))),
            Vec2::new(0.0, 2.0)
        );
    }
}

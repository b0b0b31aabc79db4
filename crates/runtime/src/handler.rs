use glam::{IVec2, Vec2};
use tileworld_input::{HostEvent, Key, Modifiers, MouseButton, WindowEvent};

use crate::stats::LoopStats;

/// Callbacks driven by the [`Scheduler`](crate::Scheduler).
///
/// Every method defaults to a no-op, so a handler only implements what it
/// reacts to. `C` is the host's canvas; it is lent to the handler for
/// opening and rendering only.
#[allow(unused_variables)]
pub trait Handler<C> {
    // Lifecycle

    fn on_open(&mut self, canvas: &mut C) {}
    fn on_close(&mut self) {}
    /// One fixed simulation tick.
    fn on_update(&mut self) {}
    /// Rebuild render data after the simulation advanced or the view changed.
    fn on_prepare_render(&mut self) {}
    fn on_render(&mut self, canvas: &mut C) {}
    /// Heartbeat, once per clock second, with the counters for that second.
    fn on_second(&mut self, stats: &LoopStats) {}
    /// Polled once per loop iteration after events are drained.
    fn exit_requested(&self) -> bool {
        false
    }

    // Keyboard

    fn on_key_down(&mut self, key: Key, modifiers: Modifiers) {}
    fn on_key_repeat(&mut self, key: Key, modifiers: Modifiers) {}
    fn on_key_up(&mut self, key: Key, modifiers: Modifiers) {}

    // Mouse

    fn on_mouse_focus(&mut self) {}
    fn on_mouse_blur(&mut self) {}
    fn on_mouse_move(&mut self, position: IVec2) {}
    fn on_mouse_wheel(&mut self, delta: Vec2) {}
    fn on_mouse_button_down(&mut self, button: MouseButton, position: IVec2) {}
    fn on_mouse_button_up(&mut self, button: MouseButton, position: IVec2) {}

    // Joystick

    fn on_joy_axis(&mut self, device: u32, axis: u8, value: i16) {}
    fn on_joy_ball(&mut self, device: u32, ball: u8, delta: IVec2) {}
    fn on_joy_hat(&mut self, device: u32, hat: u8, value: u8) {}
    fn on_joy_button_down(&mut self, device: u32, button: u8) {}
    fn on_joy_button_up(&mut self, device: u32, button: u8) {}

    // Game controller

    fn on_controller_axis(&mut self, device: u32, axis: u8, value: i16) {}
    fn on_controller_button_down(&mut self, device: u32, button: u8) {}
    fn on_controller_button_up(&mut self, device: u32, button: u8) {}

    // Window

    fn on_input_focus(&mut self) {}
    fn on_input_blur(&mut self) {}
    fn on_minimize(&mut self) {}
    fn on_maximize(&mut self) {}
    fn on_restore(&mut self) {}
    fn on_expose(&mut self) {}
    fn on_resize(&mut self, width: u32, height: u32) {}

    // Application

    /// The host asked to quit. The loop stops after the current iteration.
    fn on_quit(&mut self) {}
    fn on_user(&mut self, code: i32) {}
}

/// Loop-level consequences of one dispatched event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatched {
    /// Run `on_prepare_render` this iteration even without a tick.
    pub force_prepare: bool,
    /// Render and present this iteration even without a tick.
    pub force_render: bool,
    pub quit: bool,
}

impl Dispatched {
    pub(crate) fn merge(&mut self, other: Dispatched) {
        self.force_prepare |= other.force_prepare;
        self.force_render |= other.force_render;
        self.quit |= other.quit;
    }
}

/// Route one host event to the matching handler callback.
pub fn dispatch<C, H>(handler: &mut H, event: HostEvent) -> Dispatched
where
    H: Handler<C> + ?Sized,
{
    let mut out = Dispatched::default();
    match event {
        HostEvent::Key {
            key,
            pressed: true,
            repeat: true,
            modifiers,
        } => handler.on_key_repeat(key, modifiers),
        HostEvent::Key {
            key,
            pressed: true,
            modifiers,
            ..
        } => handler.on_key_down(key, modifiers),
        HostEvent::Key { key, modifiers, .. } => handler.on_key_up(key, modifiers),
        HostEvent::MouseMove { position } => handler.on_mouse_move(position),
        HostEvent::MouseWheel { delta } => handler.on_mouse_wheel(delta),
        HostEvent::MouseButton {
            button,
            pressed: true,
            position,
        } => handler.on_mouse_button_down(button, position),
        HostEvent::MouseButton {
            button, position, ..
        } => handler.on_mouse_button_up(button, position),
        HostEvent::Window(window) => match window {
            WindowEvent::MouseEntered => handler.on_mouse_focus(),
            WindowEvent::MouseLeft => handler.on_mouse_blur(),
            WindowEvent::FocusGained => handler.on_input_focus(),
            WindowEvent::FocusLost => handler.on_input_blur(),
            WindowEvent::Minimized => handler.on_minimize(),
            WindowEvent::Maximized => handler.on_maximize(),
            WindowEvent::Restored => handler.on_restore(),
            WindowEvent::Exposed => {
                out.force_render = true;
                handler.on_expose();
            }
            WindowEvent::Resized { width, height } => {
                out.force_prepare = true;
                out.force_render = true;
                handler.on_resize(width, height);
            }
        },
        HostEvent::JoyAxis {
            device,
            axis,
            value,
        } => handler.on_joy_axis(device, axis, value),
        HostEvent::JoyBall {
            device,
            ball,
            delta,
        } => handler.on_joy_ball(device, ball, delta),
        HostEvent::JoyHat { device, hat, value } => handler.on_joy_hat(device, hat, value),
        HostEvent::JoyButton {
            device,
            button,
            pressed: true,
        } => handler.on_joy_button_down(device, button),
        HostEvent::JoyButton { device, button, .. } => handler.on_joy_button_up(device, button),
        HostEvent::ControllerAxis {
            device,
            axis,
            value,
        } => handler.on_controller_axis(device, axis, value),
        HostEvent::ControllerButton {
            device,
            button,
            pressed: true,
        } => handler.on_controller_button_down(device, button),
        HostEvent::ControllerButton { device, button, .. } => {
            handler.on_controller_button_up(device, button)
        }
        HostEvent::Quit => {
            out.quit = true;
            handler.on_quit();
        }
        HostEvent::User { code } => handler.on_user(code),
        other => tracing::trace!(?other, "unhandled host event"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Handler<()> for Recorder {
        fn on_key_down(&mut self, key: Key, _: Modifiers) {
            self.calls.push(format!("down {key:?}"));
        }
        fn on_key_repeat(&mut self, key: Key, _: Modifiers) {
            self.calls.push(format!("repeat {key:?}"));
        }
        fn on_key_up(&mut self, key: Key, _: Modifiers) {
            self.calls.push(format!("up {key:?}"));
        }
        fn on_mouse_button_down(&mut self, button: MouseButton, position: IVec2) {
            self.calls
                .push(format!("press {button:?} {} {}", position.x, position.y));
        }
        fn on_mouse_button_up(&mut self, button: MouseButton, _: IVec2) {
            self.calls.push(format!("release {button:?}"));
        }
        fn on_mouse_focus(&mut self) {
            self.calls.push("mouse focus".into());
        }
        fn on_expose(&mut self) {
            self.calls.push("expose".into());
        }
        fn on_resize(&mut self, width: u32, height: u32) {
            self.calls.push(format!("resize {width}x{height}"));
        }
        fn on_joy_button_up(&mut self, device: u32, button: u8) {
            self.calls.push(format!("joy up {device} {button}"));
        }
        fn on_controller_axis(&mut self, _: u32, axis: u8, value: i16) {
            self.calls.push(format!("axis {axis} {value}"));
        }
        fn on_quit(&mut self) {
            self.calls.push("quit".into());
        }
        fn on_user(&mut self, code: i32) {
            self.calls.push(format!("user {code}"));
        }
    }

    fn run(events: Vec<HostEvent>) -> (Vec<String>, Dispatched) {
        let mut recorder = Recorder::default();
        let mut total = Dispatched::default();
        for event in events {
            total.merge(dispatch::<(), _>(&mut recorder, event));
        }
        (recorder.calls, total)
    }

    #[test]
    fn keys_split_into_down_repeat_up() {
        let (calls, _) = run(vec![
            HostEvent::key_down(Key::W),
            HostEvent::Key {
                key: Key::W,
                pressed: true,
                repeat: true,
                modifiers: Modifiers::NONE,
            },
            HostEvent::key_up(Key::W),
        ]);
        assert_eq!(calls, ["down W", "repeat W", "up W"]);
    }

    #[test]
    fn mouse_buttons_carry_position() {
        let (calls, _) = run(vec![
            HostEvent::mouse_down(MouseButton::Right, 3, 4),
            HostEvent::mouse_up(MouseButton::Right, 3, 4),
        ]);
        assert_eq!(calls, ["press Right 3 4", "release Right"]);
    }

    #[test]
    fn expose_forces_render_only() {
        let (calls, d) = run(vec![HostEvent::Window(WindowEvent::Exposed)]);
        assert_eq!(calls, ["expose"]);
        assert_eq!(
            d,
            Dispatched {
                force_prepare: false,
                force_render: true,
                quit: false
            }
        );
    }

    #[test]
    fn resize_forces_prepare_and_render() {
        let (calls, d) = run(vec![HostEvent::resized(640, 480)]);
        assert_eq!(calls, ["resize 640x480"]);
        assert!(d.force_prepare && d.force_render);
    }

    #[test]
    fn quit_is_reported() {
        let (calls, d) = run(vec![HostEvent::Quit]);
        assert_eq!(calls, ["quit"]);
        assert!(d.quit);
    }

    #[test]
    fn device_and_user_events_route() {
        let (calls, d) = run(vec![
            HostEvent::Window(WindowEvent::MouseEntered),
            HostEvent::JoyButton {
                device: 1,
                button: 2,
                pressed: false,
            },
            HostEvent::ControllerAxis {
                device: 0,
                axis: 1,
                value: -5,
            },
            HostEvent::User { code: 7 },
        ]);
        assert_eq!(calls, ["mouse focus", "joy up 1 2", "axis 1 -5", "user 7"]);
        assert_eq!(d, Dispatched::default());
    }

    #[test]
    fn unimplemented_callbacks_are_no_ops() {
        let (calls, _) = run(vec![
            HostEvent::MouseWheel {
                delta: Vec2::new(0.0, 1.0),
            },
            HostEvent::Window(WindowEvent::Minimized),
        ]);
        assert!(calls.is_empty());
    }
}

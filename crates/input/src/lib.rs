//! Input: the host event model and the key bindings that turn key presses
//! into viewer actions.
//!
//! # Invariants
//! - Hosts translate their native events into [`HostEvent`]; nothing past the
//!   scheduler sees platform types.
//! - The viewer reacts to [`Action`]s, never to raw key codes.

pub mod action;
pub mod event;

pub use action::{Action, PanDirection, action_for_key};
pub use event::{HostEvent, Key, Modifiers, MouseButton, WindowEvent};

pub fn crate_info() -> &'static str {
    "tileworld-input v0.1.0"
}

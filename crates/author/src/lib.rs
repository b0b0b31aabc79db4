//! In-World Authoring: tile edits with undo/redo.
//!
//! # Invariants
//! - Every recorded edit is reversible.
//! - Edits are bounds-checked; a rejected edit leaves grid and history unchanged.

mod editor;

pub use editor::{EditError, TileEdit, TileEditor};

pub fn crate_info() -> &'static str {
    "tileworld-author v0.1.0"
}

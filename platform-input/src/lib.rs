//! platform-input: translate host input events into control messages.
//!
//! This crate is the input-translation core of the mirror client. It
//! receives host-side events (keyboard, mouse, touch, gamepad, file drops)
//! and either acts locally through the screen service or emits typed
//! control messages to the outbound queue:
//!
//! - [`InputManager`] - the event dispatcher and shortcut state machine
//! - [`touchmap`] module - declarative gamepad-to-touch mapping and its
//!   virtual-pointer engine
//! - [`reflect_point`] - the virtual second finger used to simulate
//!   two-finger gestures from a single mouse
//!
//! Collaborators (screen, clipboard, file pusher, file dialog, key/mouse
//! processors, gamepad backend) are traits; serialization and socket I/O
//! live elsewhere.

mod bindings;
mod events;
mod gamepad;
mod manager;
mod processor;
mod screen;
mod services;
mod shortcuts;
pub mod touchmap;
mod vfinger;

pub use bindings::{MouseBinding, MouseBindings};
pub use events::{
    gamepad as gamepad_codes, GamepadDeviceKind, InputEvent, Key, Mods, MouseButton, MouseButtons,
    TouchPhase, TOUCH_MOUSE_ID,
};
pub use gamepad::{GamepadBackend, GamepadHandle, MAX_GAME_CONTROLLERS};
pub use manager::{InputManager, InputManagerParams};
pub use processor::{
    KeyEvent, KeyProcessor, MouseClickEvent, MouseMotionEvent, MouseProcessor, MouseScrollEvent,
    Position, TouchEvent,
};
pub use screen::Screen;
pub use services::{Clipboard, FilePushAction, FilePusher, TouchmapDialog};
pub use shortcuts::ShortcutMods;
pub use touchmap::{Touchmap, TouchmapError, BASE_FINGER_ID, WALK_CONTROL_DEADZONE};
pub use vfinger::reflect_point;

//! Key and mouse processor contracts.
//!
//! Processors translate forwarded host events into whatever injection
//! mechanism is active (control messages, HID, AOA). Capabilities are
//! queried before delegation; a processor that does not support a path
//! silently disables it.

use mirror_common::{Point, Size};
use mirror_control::{KeyAction, Sequence, TouchAction};

use crate::events::{Key, Mods, MouseButton, MouseButtons};

/// A position within the device frame, together with the frame size it was
/// computed against.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub screen_size: Size,
    pub point: Point,
}

/// A key event forwarded to the key processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub action: KeyAction,
    pub key: Key,
    pub scancode: u32,
    pub repeat: bool,
    pub mods: Mods,
}

/// A mouse movement forwarded to the mouse processor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMotionEvent {
    pub position: Position,
    pub pointer_id: u64,
    pub xrel: i32,
    pub yrel: i32,
    pub buttons: MouseButtons,
}

/// A mouse click forwarded to the mouse processor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseClickEvent {
    pub position: Position,
    pub action: KeyAction,
    pub button: MouseButton,
    pub pointer_id: u64,
    pub buttons: MouseButtons,
}

/// A scroll event forwarded to the mouse processor. Deltas are clamped to
/// [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseScrollEvent {
    pub position: Position,
    pub hscroll: f32,
    pub vscroll: f32,
    pub buttons: MouseButtons,
}

/// A touch event forwarded to the mouse processor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub position: Position,
    pub action: TouchAction,
    pub pointer_id: u64,
    pub pressure: f32,
}

/// Key-event processor.
pub trait KeyProcessor {
    /// Whether committed text input is supported.
    fn supports_text(&self) -> bool {
        false
    }

    /// Whether pasting happens asynchronously on the device, requiring the
    /// processor to wait for a clipboard acknowledgment before injecting
    /// Ctrl+v.
    fn async_paste(&self) -> bool {
        false
    }

    /// Whether the processor drives a physical (HID) keyboard.
    fn is_hid(&self) -> bool {
        false
    }

    /// Forward a key event. A non-zero `ack_to_wait` tells the processor to
    /// hold this injection until the device acknowledges that clipboard
    /// sequence.
    fn process_key(&mut self, event: &KeyEvent, ack_to_wait: Sequence);

    /// Forward committed text. Only called when [`supports_text`] is true.
    ///
    /// [`supports_text`]: KeyProcessor::supports_text
    fn process_text(&mut self, text: &str) {
        let _ = text;
    }
}

/// Mouse-event processor.
pub trait MouseProcessor {
    /// In relative mode only deltas are meaningful; absolute positions are
    /// zeroed and the virtual finger is disabled.
    fn relative_mode(&self) -> bool {
        false
    }

    fn process_mouse_motion(&mut self, event: &MouseMotionEvent);

    fn process_mouse_click(&mut self, event: &MouseClickEvent);

    /// Whether scroll events are supported.
    fn supports_mouse_scroll(&self) -> bool {
        false
    }

    fn process_mouse_scroll(&mut self, event: &MouseScrollEvent) {
        let _ = event;
    }

    /// Whether touchscreen events are supported.
    fn supports_touch(&self) -> bool {
        false
    }

    fn process_touch(&mut self, event: &TouchEvent) {
        let _ = event;
    }
}

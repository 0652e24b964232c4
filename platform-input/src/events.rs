//! Host-side input event taxonomy.
//!
//! The host event loop (window system, game controller subsystem) produces
//! these tagged events; [`crate::InputManager::handle_event`] consumes them.
//! The types are self-contained: everything the dispatcher needs (modifier
//! state, pressed-button masks) travels in the events themselves.

use std::path::PathBuf;

use bitflags::bitflags;

/// Mouse device id reported for mouse events synthesized from touch input.
/// Such events are duplicates and are dropped by the dispatcher.
pub const TOUCH_MOUSE_ID: u32 = u32::MAX;

/// Host keyboard key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Return,
    Escape,
    Backspace,
    Tab,
    Space,
    Up,
    Down,
    Left,
    Right,
    LCtrl,
    RCtrl,
    LShift,
    RShift,
    LAlt,
    RAlt,
    LSuper,
    RSuper,
    #[default]
    Unknown,
}

bitflags! {
    /// Keyboard modifier state, as carried by key events.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Mods: u16 {
        const LSHIFT = 1 << 0;
        const RSHIFT = 1 << 1;
        const LCTRL  = 1 << 2;
        const RCTRL  = 1 << 3;
        const LALT   = 1 << 4;
        const RALT   = 1 << 5;
        const LSUPER = 1 << 6;
        const RSUPER = 1 << 7;
    }
}

impl Mods {
    /// Either control key.
    pub const CTRL: Mods = Mods::LCTRL.union(Mods::RCTRL);
    /// Either shift key.
    pub const SHIFT: Mods = Mods::LSHIFT.union(Mods::RSHIFT);
    /// Either alt key.
    pub const ALT: Mods = Mods::LALT.union(Mods::RALT);
    /// Either super (GUI) key.
    pub const SUPER: Mods = Mods::LSUPER.union(Mods::RSUPER);

    /// Whether any control key is held.
    pub fn ctrl(self) -> bool {
        self.intersects(Self::CTRL)
    }

    /// Whether any shift key is held.
    pub fn shift(self) -> bool {
        self.intersects(Self::SHIFT)
    }
}

/// Host mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
    Other(u8),
}

bitflags! {
    /// Pressed mouse buttons, both as reported raw by the host and as
    /// forwarded (binding-filtered) to the mouse processor.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        const LEFT   = 1 << 0;
        const RIGHT  = 1 << 1;
        const MIDDLE = 1 << 2;
        const X1     = 1 << 3;
        const X2     = 1 << 4;
    }
}

impl MouseButtons {
    /// The mask bit for one button, if it has one.
    pub fn from_button(button: MouseButton) -> Option<MouseButtons> {
        match button {
            MouseButton::Left => Some(Self::LEFT),
            MouseButton::Right => Some(Self::RIGHT),
            MouseButton::Middle => Some(Self::MIDDLE),
            MouseButton::X1 => Some(Self::X1),
            MouseButton::X2 => Some(Self::X2),
            MouseButton::Other(_) => None,
        }
    }
}

/// Touch event phase from the host touch device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Up,
    Motion,
}

/// Game controller hotplug kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamepadDeviceKind {
    Added,
    Removed,
}

/// Game controller button and axis codes.
///
/// These follow the conventional host-gamepad numbering so that raw
/// forwarding and the touchmap file share one namespace. Analog triggers are
/// additionally addressable as virtual buttons `BUTTON_MAX + axis`, so that
/// trigger travel can reuse the button dispatch path.
pub mod gamepad {
    pub const BUTTON_A: u8 = 0;
    pub const BUTTON_B: u8 = 1;
    pub const BUTTON_X: u8 = 2;
    pub const BUTTON_Y: u8 = 3;
    pub const BUTTON_BACK: u8 = 4;
    pub const BUTTON_GUIDE: u8 = 5;
    pub const BUTTON_START: u8 = 6;
    pub const BUTTON_LEFTSTICK: u8 = 7;
    pub const BUTTON_RIGHTSTICK: u8 = 8;
    pub const BUTTON_LEFTSHOULDER: u8 = 9;
    pub const BUTTON_RIGHTSHOULDER: u8 = 10;
    pub const BUTTON_DPAD_UP: u8 = 11;
    pub const BUTTON_DPAD_DOWN: u8 = 12;
    pub const BUTTON_DPAD_LEFT: u8 = 13;
    pub const BUTTON_DPAD_RIGHT: u8 = 14;
    pub const BUTTON_MISC1: u8 = 15;
    pub const BUTTON_PADDLE1: u8 = 16;
    pub const BUTTON_PADDLE2: u8 = 17;
    pub const BUTTON_PADDLE3: u8 = 18;
    pub const BUTTON_PADDLE4: u8 = 19;
    pub const BUTTON_TOUCHPAD: u8 = 20;
    /// One past the last physical button; base for trigger virtual buttons.
    pub const BUTTON_MAX: u8 = 21;
    /// Code stored for unrecognized button names; matches no real event.
    pub const BUTTON_INVALID: u8 = 255;

    pub const AXIS_LEFTX: u8 = 0;
    pub const AXIS_LEFTY: u8 = 1;
    pub const AXIS_RIGHTX: u8 = 2;
    pub const AXIS_RIGHTY: u8 = 3;
    pub const AXIS_TRIGGERLEFT: u8 = 4;
    pub const AXIS_TRIGGERRIGHT: u8 = 5;

    /// Virtual button code for the left trigger.
    pub const BUTTON_TRIGGERLEFT: u8 = BUTTON_MAX + AXIS_TRIGGERLEFT;
    /// Virtual button code for the right trigger.
    pub const BUTTON_TRIGGERRIGHT: u8 = BUTTON_MAX + AXIS_TRIGGERRIGHT;
}

/// A host input event, as produced by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Committed text input.
    TextInput { text: String },

    /// Key press or release.
    ///
    /// `mods` is the full modifier state at the time of the event. `repeat`
    /// is set on auto-repeated presses.
    Key {
        key: Key,
        scancode: u32,
        mods: Mods,
        down: bool,
        repeat: bool,
    },

    /// Mouse movement, in window coordinates.
    MouseMotion {
        x: i32,
        y: i32,
        xrel: i32,
        yrel: i32,
        buttons: MouseButtons,
        which: u32,
    },

    /// Mouse button press or release, in window coordinates.
    MouseButton {
        x: i32,
        y: i32,
        button: MouseButton,
        clicks: u8,
        down: bool,
        which: u32,
    },

    /// Mouse wheel motion; precise deltas in scroll units.
    MouseWheel { hscroll: f32, vscroll: f32 },

    /// Touchscreen/trackpad finger event; coordinates normalized to [0, 1]
    /// over the drawable.
    TouchFinger {
        finger_id: u64,
        x: f32,
        y: f32,
        pressure: f32,
        phase: TouchPhase,
    },

    /// A file dropped onto the window.
    DropFile { path: PathBuf },

    /// Game controller axis motion, value in [i16::MIN, i16::MAX].
    GamepadAxis { which: u32, axis: u8, value: i16 },

    /// Game controller button press or release.
    GamepadButton { which: u32, button: u8, pressed: bool },

    /// Game controller connected or disconnected.
    ///
    /// For `Added`, `which` is the host device index to open; for `Removed`
    /// it is the instance id of the open device.
    GamepadDevice {
        which: u32,
        kind: GamepadDeviceKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mods_composites() {
        assert!(Mods::LCTRL.ctrl());
        assert!(Mods::RCTRL.ctrl());
        assert!(!Mods::LSHIFT.ctrl());
        assert!((Mods::LSHIFT | Mods::LALT).shift());
    }

    #[test]
    fn test_trigger_virtual_button_codes() {
        assert_eq!(gamepad::BUTTON_TRIGGERLEFT, 25);
        assert_eq!(gamepad::BUTTON_TRIGGERRIGHT, 26);
        assert!(gamepad::BUTTON_TRIGGERRIGHT < gamepad::BUTTON_INVALID);
    }

    #[test]
    fn test_button_mask_mapping() {
        assert_eq!(
            MouseButtons::from_button(MouseButton::Middle),
            Some(MouseButtons::MIDDLE)
        );
        assert_eq!(MouseButtons::from_button(MouseButton::Other(9)), None);
    }
}

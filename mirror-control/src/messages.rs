//! Messages sent from the client to the remote device.

use mirror_common::{Point, Size};

use crate::Sequence;

/// Reserved sequence value meaning "no acknowledgment requested".
pub const SEQUENCE_INVALID: Sequence = 0;

/// Pointer id reported for real mouse events when a secondary click binding
/// is active.
pub const POINTER_ID_MOUSE: u64 = u64::MAX;
/// Pointer id reported for real mouse events mapped to a plain finger.
pub const POINTER_ID_GENERIC_FINGER: u64 = u64::MAX - 1;
/// Pointer id of the synthesized second finger (pinch/rotate/tilt).
pub const POINTER_ID_VIRTUAL_FINGER: u64 = u64::MAX - 2;
/// Pointer id of the synthesized second finger when the mouse pointer id is
/// in use for real events.
pub const POINTER_ID_VIRTUAL_MOUSE: u64 = u64::MAX - 3;

/// Press or release, for injected keys and mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
}

/// Touch event phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Up,
    Move,
}

/// Device keycodes injectable through [`ControlMessage::InjectKeycode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKeycode {
    Home,
    Back,
    AppSwitch,
    Menu,
    Power,
    VolumeUp,
    VolumeDown,
}

/// Which key triggered a device-clipboard read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKey {
    None,
    Copy,
    Cut,
}

/// Device screen power mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPowerMode {
    Off,
    Normal,
}

/// Game controller hotplug event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamepadDeviceEvent {
    Added,
    Removed,
}

/// A control message addressed to the remote device.
///
/// Text payloads transfer ownership to the queue on a successful push; on a
/// failed push the message (and its text) is returned to the caller and
/// dropped there.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlMessage {
    /// Inject a physical key press or release.
    InjectKeycode {
        action: KeyAction,
        keycode: DeviceKeycode,
        repeat: u32,
        metastate: u32,
    },

    /// Press BACK, or turn the screen on if it was off.
    BackOrScreenOn { action: KeyAction },

    /// Pull down the notification shade.
    ExpandNotificationPanel,

    /// Pull down the quick-settings panel.
    ExpandSettingsPanel,

    /// Collapse any open panel.
    CollapsePanels,

    /// Read the device clipboard back to the host.
    GetClipboard { copy_key: CopyKey },

    /// Write the device clipboard, optionally pasting immediately.
    ///
    /// A non-zero `sequence` requests an acknowledgment from the device once
    /// the clipboard is set.
    SetClipboard {
        sequence: Sequence,
        text: String,
        paste: bool,
    },

    /// Turn the device display on or off while mirroring continues.
    SetScreenPowerMode { mode: ScreenPowerMode },

    /// Inject text as input events.
    InjectText { text: String },

    /// Inject one touch pointer event.
    InjectTouchEvent {
        action: TouchAction,
        screen_size: Size,
        point: Point,
        pointer_id: u64,
        pressure: f32,
        action_button: u32,
        buttons: u32,
    },

    /// Ask the device to rotate its display.
    RotateDevice,

    /// Open the hard-keyboard settings activity.
    OpenHardKeyboardSettings,

    /// Forward a raw game controller axis event.
    InjectGameControllerAxis { id: u32, axis: u8, value: i16 },

    /// Forward a raw game controller button event.
    InjectGameControllerButton { id: u32, button: u8, pressed: bool },

    /// Forward a game controller hotplug event.
    InjectGameControllerDevice {
        id: u32,
        event: GamepadDeviceEvent,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_message_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<ControlMessage>();
    }

    #[test]
    fn test_pointer_ids_are_disjoint() {
        let ids = [
            POINTER_ID_MOUSE,
            POINTER_ID_GENERIC_FINGER,
            POINTER_ID_VIRTUAL_FINGER,
            POINTER_ID_VIRTUAL_MOUSE,
        ];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}

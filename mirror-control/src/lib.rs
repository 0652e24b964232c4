//! Control-message types and the outbound message queue.
//!
//! The input-translation core produces [`ControlMessage`] values and hands
//! them to a [`Controller`], a non-blocking bounded queue whose receiving
//! half is owned by the transport (serialization and socket I/O live
//! elsewhere). `Controller::push_msg` never blocks; a full queue is reported
//! to the caller, which logs and drops the message.

mod controller;
mod messages;

pub use controller::{control_channel, ControlReceiver, Controller};
pub use messages::{
    ControlMessage, CopyKey, DeviceKeycode, GamepadDeviceEvent, KeyAction, ScreenPowerMode,
    TouchAction, POINTER_ID_GENERIC_FINGER, POINTER_ID_MOUSE, POINTER_ID_VIRTUAL_FINGER,
    POINTER_ID_VIRTUAL_MOUSE, SEQUENCE_INVALID,
};

/// Sequence number used to pair clipboard updates with device acknowledgments.
pub type Sequence = u64;

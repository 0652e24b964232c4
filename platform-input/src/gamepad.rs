//! Gamepad handling: raw forwarding, hotplug slots, and the touchmap
//! engine.
//!
//! With `forward_game_controllers` set, axis and button events are pushed
//! to the device unmodified. Otherwise, when a touchmap is loaded, the
//! engine drives virtual touch pointers: the left stick orbits the walk
//! control, buttons tap their mapped positions, and the right stick aims
//! every held skill button. Control state (`touch_down`) flips only when
//! the corresponding touch message was accepted by the outbound queue, so
//! DOWN and UP counts stay paired per finger id.

use mirror_control::{ControlMessage, GamepadDeviceEvent, TouchAction};
use tracing::{debug, trace, warn};

use crate::events::gamepad::*;
use crate::events::GamepadDeviceKind;
use crate::manager::InputManager;
use crate::touchmap::WALK_CONTROL_DEADZONE;

/// Maximum simultaneously open game controllers.
pub const MAX_GAME_CONTROLLERS: usize = 4;

/// An open game controller device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamepadHandle {
    /// Host instance id, stable while the device stays connected.
    pub instance_id: u32,
}

/// Host game-controller subsystem: opens and closes devices.
pub trait GamepadBackend {
    /// Open the device at `device_index`; `None` on failure.
    fn open(&mut self, device_index: u32) -> Option<GamepadHandle>;

    /// Close an open device.
    fn close(&mut self, instance_id: u32);
}

/// Stick/trigger travel scaled into a pixel offset within `radius`.
fn axis_offset(value: i16, radius: i32) -> i32 {
    (i64::from(value) * i64::from(radius) / i64::from(i16::MAX)) as i32
}

impl InputManager {
    pub(crate) fn process_gamepad_axis(&mut self, which: u32, axis: u8, value: i16) {
        trace!("gamepad axis: which={which} axis={axis} value={value}");

        if self.forward_game_controllers {
            self.push_msg(
                ControlMessage::InjectGameControllerAxis {
                    id: which,
                    axis,
                    value,
                },
                "inject game controller axis",
            );
            return;
        }
        if self.touchmap.is_none() {
            return;
        }

        match axis {
            AXIS_LEFTX | AXIS_LEFTY => self.handle_touchmap_walk(axis == AXIS_LEFTX, value),
            AXIS_RIGHTX | AXIS_RIGHTY => {
                self.handle_touchmap_skill_cast(axis == AXIS_RIGHTX, value);
            }
            AXIS_TRIGGERLEFT | AXIS_TRIGGERRIGHT => {
                // a trigger acts as a button once it travels past ~20%
                let pressed = i64::from(value) * 5 / i64::from(i16::MAX) != 0;
                self.handle_touchmap_button(BUTTON_MAX + axis, pressed);
            }
            _ => {}
        }
    }

    pub(crate) fn process_gamepad_button(&mut self, which: u32, button: u8, pressed: bool) {
        trace!("gamepad button: which={which} button={button} pressed={pressed}");

        if self.forward_game_controllers {
            self.push_msg(
                ControlMessage::InjectGameControllerButton {
                    id: which,
                    button,
                    pressed,
                },
                "inject game controller button",
            );
        } else if self.touchmap.is_some() {
            self.handle_touchmap_button(button, pressed);
        }
    }

    pub(crate) fn process_gamepad_device(&mut self, which: u32, kind: GamepadDeviceKind) {
        let instance_id = match kind {
            GamepadDeviceKind::Added => {
                let Some(slot) = self.gamepads.iter().position(Option::is_none) else {
                    warn!("Game controller limit reached");
                    return;
                };
                let Some(backend) = self.gamepad_backend.as_mut() else {
                    warn!("No gamepad backend; ignoring game controller #{which}");
                    return;
                };
                let Some(handle) = backend.open(which) else {
                    warn!("Could not open game controller #{which}");
                    return;
                };
                self.gamepads[slot] = Some(handle);
                handle.instance_id
            }
            GamepadDeviceKind::Removed => {
                if let Some(backend) = self.gamepad_backend.as_mut() {
                    backend.close(which);
                }
                let found = self
                    .gamepads
                    .iter()
                    .position(|slot| slot.is_some_and(|handle| handle.instance_id == which));
                let Some(slot) = found else {
                    warn!("Could not find removed game controller");
                    return;
                };
                self.gamepads[slot] = None;
                which
            }
        };

        let event = match kind {
            GamepadDeviceKind::Added => GamepadDeviceEvent::Added,
            GamepadDeviceKind::Removed => GamepadDeviceEvent::Removed,
        };
        self.push_msg(
            ControlMessage::InjectGameControllerDevice {
                id: instance_id,
                event,
            },
            "inject game controller device",
        );
    }

    fn handle_touchmap_button(&mut self, button: u8, pressed: bool) {
        let frame_size = self.screen.frame_size();
        let Some(controller) = self.controller.as_ref() else {
            return;
        };
        let Some(touch_btn) = self
            .touchmap
            .as_mut()
            .and_then(|map| map.button_mut(button))
        else {
            debug!("Button {button} not found in touchmap");
            return;
        };

        if pressed {
            if !touch_btn.touch_down
                && Self::push_touch(
                    controller,
                    frame_size,
                    touch_btn.finger_id,
                    TouchAction::Down,
                    touch_btn.center,
                )
            {
                touch_btn.touch_down = true;
            }
        } else if touch_btn.touch_down
            && Self::push_touch(
                controller,
                frame_size,
                touch_btn.finger_id,
                TouchAction::Up,
                touch_btn.center,
            )
        {
            touch_btn.touch_down = false;
        }
    }

    fn handle_touchmap_walk(&mut self, x_axis: bool, value: i16) {
        let frame_size = self.screen.frame_size();
        let Some(controller) = self.controller.as_ref() else {
            return;
        };
        let Some(walk) = self.touchmap.as_mut().and_then(|map| map.walk.as_mut()) else {
            return;
        };

        let offset = axis_offset(value, walk.radius);
        if x_axis {
            walk.current_pos.x = walk.center.x + offset;
        } else {
            walk.current_pos.y = walk.center.y + offset;
        }

        let dx = i64::from(walk.current_pos.x - walk.center.x);
        let dy = i64::from(walk.current_pos.y - walk.center.y);
        let distance2 = dx * dx + dy * dy;

        if distance2 < WALK_CONTROL_DEADZONE {
            if walk.touch_down
                && Self::push_touch(
                    controller,
                    frame_size,
                    walk.finger_id,
                    TouchAction::Up,
                    walk.center,
                )
            {
                walk.touch_down = false;
            }
        } else {
            if !walk.touch_down {
                if !Self::push_touch(
                    controller,
                    frame_size,
                    walk.finger_id,
                    TouchAction::Down,
                    walk.center,
                ) {
                    return;
                }
                walk.touch_down = true;
            }
            Self::push_touch(
                controller,
                frame_size,
                walk.finger_id,
                TouchAction::Move,
                walk.current_pos,
            );
        }
    }

    /// Aim every held skill button: a skill behaves as "press to touch,
    /// drag to aim, release to cast".
    fn handle_touchmap_skill_cast(&mut self, x_axis: bool, value: i16) {
        let frame_size = self.screen.frame_size();
        let Some(controller) = self.controller.as_ref() else {
            return;
        };
        let Some(map) = self.touchmap.as_mut() else {
            return;
        };

        for btn in map
            .buttons
            .iter_mut()
            .filter(|btn| btn.is_skill && btn.touch_down)
        {
            let offset = axis_offset(value, btn.radius);
            if x_axis {
                btn.current_pos.x = btn.center.x + offset;
            } else {
                btn.current_pos.y = btn.center.y + offset;
            }
            Self::push_touch(
                controller,
                frame_size,
                btn.finger_id,
                TouchAction::Move,
                btn.current_pos,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_offset_scaling() {
        assert_eq!(axis_offset(20_000, 50), 30);
        assert_eq!(axis_offset(i16::MAX, 50), 50);
        assert_eq!(axis_offset(i16::MIN, 50), -50);
        assert_eq!(axis_offset(3, 50), 0);
    }

    #[test]
    fn test_trigger_threshold_is_twenty_percent() {
        let pressed = |value: i16| i64::from(value) * 5 / i64::from(i16::MAX) != 0;
        assert!(!pressed(0));
        assert!(!pressed(6553));
        assert!(pressed(6554));
        assert!(pressed(i16::MAX));
    }
}

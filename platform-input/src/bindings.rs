//! Mouse button bindings.
//!
//! Secondary mouse buttons can be bound to device actions instead of being
//! forwarded as clicks. The left button is always a click.

use crate::events::{MouseButton, MouseButtons};

/// Action bound to a secondary mouse button.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MouseBinding {
    /// Ignore the button entirely.
    #[default]
    Disabled,
    /// Forward the button as a click.
    Click,
    /// Press BACK (or turn the screen on).
    Back,
    /// Press HOME.
    Home,
    /// Open the app switcher.
    AppSwitch,
    /// Expand the notification panel (settings panel on double click).
    ExpandNotificationPanel,
}

/// Per-button binding configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MouseBindings {
    pub right_click: MouseBinding,
    pub middle_click: MouseBinding,
    pub click4: MouseBinding,
    pub click5: MouseBinding,
}

impl MouseBindings {
    /// Whether any secondary button is bound to a plain click. When true,
    /// real mouse events use the dedicated mouse pointer id so the device
    /// can tell buttons apart.
    pub fn has_secondary_click(&self) -> bool {
        self.right_click == MouseBinding::Click
            || self.middle_click == MouseBinding::Click
            || self.click4 == MouseBinding::Click
            || self.click5 == MouseBinding::Click
    }

    /// Resolve the binding for a host button. Left is always a click;
    /// unknown buttons are disabled.
    pub fn binding_for(&self, button: MouseButton, forward_all_clicks: bool) -> MouseBinding {
        if forward_all_clicks {
            return match button {
                MouseButton::Other(_) => MouseBinding::Disabled,
                _ => MouseBinding::Click,
            };
        }
        match button {
            MouseButton::Left => MouseBinding::Click,
            MouseButton::Right => self.right_click,
            MouseButton::Middle => self.middle_click,
            MouseButton::X1 => self.click4,
            MouseButton::X2 => self.click5,
            MouseButton::Other(_) => MouseBinding::Disabled,
        }
    }

    /// Filter a raw pressed-buttons mask down to the buttons the device
    /// should see pressed: LEFT always, a secondary button only when bound
    /// to a click.
    pub fn buttons_state(&self, raw: MouseButtons, forward_all_clicks: bool) -> MouseButtons {
        let mut state = raw & MouseButtons::LEFT;
        for (button, mask) in [
            (MouseButton::Right, MouseButtons::RIGHT),
            (MouseButton::Middle, MouseButtons::MIDDLE),
            (MouseButton::X1, MouseButtons::X1),
            (MouseButton::X2, MouseButtons::X2),
        ] {
            if raw.contains(mask)
                && self.binding_for(button, forward_all_clicks) == MouseBinding::Click
            {
                state |= mask;
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_secondary_click() {
        let mut bindings = MouseBindings::default();
        assert!(!bindings.has_secondary_click());
        bindings.middle_click = MouseBinding::Click;
        assert!(bindings.has_secondary_click());
    }

    #[test]
    fn test_left_is_always_click() {
        let bindings = MouseBindings::default();
        assert_eq!(
            bindings.binding_for(MouseButton::Left, false),
            MouseBinding::Click
        );
    }

    #[test]
    fn test_forward_all_clicks_overrides_bindings() {
        let bindings = MouseBindings {
            right_click: MouseBinding::Back,
            ..Default::default()
        };
        assert_eq!(
            bindings.binding_for(MouseButton::Right, true),
            MouseBinding::Click
        );
        assert_eq!(
            bindings.binding_for(MouseButton::Other(7), true),
            MouseBinding::Disabled
        );
    }

    #[test]
    fn test_buttons_state_filters_non_click_bindings() {
        let bindings = MouseBindings {
            right_click: MouseBinding::Back,
            middle_click: MouseBinding::Click,
            ..Default::default()
        };
        let raw = MouseButtons::LEFT | MouseButtons::RIGHT | MouseButtons::MIDDLE;
        assert_eq!(
            bindings.buttons_state(raw, false),
            MouseButtons::LEFT | MouseButtons::MIDDLE
        );
        // forward_all_clicks lets everything through
        assert_eq!(bindings.buttons_state(raw, true), raw);
    }
}

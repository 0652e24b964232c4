//! The input manager: classify host events and translate them.
//!
//! Every host event enters through [`InputManager::handle_event`], which
//! either performs a local side effect (resize, pause, orientation, FPS
//! counter), fires a shortcut, or forwards the event toward the device
//! through the key/mouse processors and the outbound control queue. The
//! manager is single-threaded and never blocks; a full outbound queue is a
//! soft failure (log and drop).

use std::path::PathBuf;

use mirror_common::{Orientation, Point, Size};
use mirror_control::{
    ControlMessage, Controller, CopyKey, DeviceKeycode, KeyAction, ScreenPowerMode, Sequence,
    TouchAction, POINTER_ID_GENERIC_FINGER, POINTER_ID_MOUSE, POINTER_ID_VIRTUAL_FINGER,
    POINTER_ID_VIRTUAL_MOUSE, SEQUENCE_INVALID,
};
use tracing::{debug, error, info, trace, warn};

use crate::bindings::{MouseBinding, MouseBindings};
use crate::events::{InputEvent, Key, Mods, MouseButton, MouseButtons, TouchPhase, TOUCH_MOUSE_ID};
use crate::gamepad::{GamepadBackend, GamepadHandle, MAX_GAME_CONTROLLERS};
use crate::processor::{
    KeyEvent, KeyProcessor, MouseClickEvent, MouseMotionEvent, MouseProcessor, MouseScrollEvent,
    Position, TouchEvent,
};
use crate::screen::Screen;
use crate::services::{Clipboard, FilePushAction, FilePusher, TouchmapDialog};
use crate::shortcuts::{is_shortcut_key, is_shortcut_mod, KeyRepeatTracker, ShortcutMods};
use crate::touchmap::Touchmap;
use crate::vfinger::VirtualFinger;

/// Everything the input manager needs at construction.
pub struct InputManagerParams {
    /// Outbound queue; `None` selects no-control mode, where remote actions
    /// are suppressed and only local shortcuts work.
    pub controller: Option<Controller>,
    pub key_processor: Option<Box<dyn KeyProcessor>>,
    pub mouse_processor: Option<Box<dyn MouseProcessor>>,
    pub screen: Box<dyn Screen>,
    pub clipboard: Box<dyn Clipboard>,
    pub file_pusher: Option<Box<dyn FilePusher>>,
    pub touchmap_dialog: Option<Box<dyn TouchmapDialog>>,
    pub gamepad_backend: Option<Box<dyn GamepadBackend>>,
    pub mouse_bindings: MouseBindings,
    /// Modifier keys that arm shortcuts.
    pub shortcut_mods: ShortcutMods,
    /// Forward every mouse button as a click, ignoring bindings.
    pub forward_all_clicks: bool,
    /// Paste by injecting text events instead of the device clipboard.
    pub legacy_paste: bool,
    /// Synchronize the host clipboard to the device before Ctrl+v.
    pub clipboard_autosync: bool,
    /// Forward raw gamepad events instead of running the touchmap engine.
    pub forward_game_controllers: bool,
    /// Touchmap to load at init.
    pub touchmap_file: Option<PathBuf>,
}

/// The input-translation core. One instance, owned by the event-loop
/// thread.
pub struct InputManager {
    pub(crate) controller: Option<Controller>,
    key_processor: Option<Box<dyn KeyProcessor>>,
    mouse_processor: Option<Box<dyn MouseProcessor>>,
    pub(crate) screen: Box<dyn Screen>,
    clipboard: Box<dyn Clipboard>,
    file_pusher: Option<Box<dyn FilePusher>>,
    touchmap_dialog: Option<Box<dyn TouchmapDialog>>,
    pub(crate) gamepad_backend: Option<Box<dyn GamepadBackend>>,

    mouse_bindings: MouseBindings,
    forward_all_clicks: bool,
    has_secondary_click: bool,
    shortcut_mods: Mods,
    legacy_paste: bool,
    clipboard_autosync: bool,
    pub(crate) forward_game_controllers: bool,

    pub(crate) touchmap: Option<Touchmap>,
    pub(crate) gamepads: [Option<GamepadHandle>; MAX_GAME_CONTROLLERS],

    vfinger: VirtualFinger,
    repeat: KeyRepeatTracker,
    next_sequence: Sequence,

    // Host state mirrored from events, used where a position or modifier
    // state is needed outside the event that carried it.
    mods: Mods,
    mouse_pos: Point,
    mouse_buttons: MouseButtons,
}

impl InputManager {
    /// Build the manager and load the configured touchmap, if any.
    ///
    /// # Panics
    ///
    /// Panics if a key or mouse processor is supplied without a controller;
    /// processors deliver through the outbound queue.
    pub fn new(params: InputManagerParams) -> Self {
        assert!(
            (params.key_processor.is_none() && params.mouse_processor.is_none())
                || params.controller.is_some(),
            "a key or mouse processor requires a controller"
        );

        let touchmap = params.touchmap_file.and_then(|path| match Touchmap::load(&path) {
            Ok(map) => Some(map),
            Err(err) => {
                error!("Failed to parse touchmap file {}: {err}", path.display());
                None
            }
        });

        Self {
            controller: params.controller,
            key_processor: params.key_processor,
            mouse_processor: params.mouse_processor,
            screen: params.screen,
            clipboard: params.clipboard,
            file_pusher: params.file_pusher,
            touchmap_dialog: params.touchmap_dialog,
            gamepad_backend: params.gamepad_backend,
            has_secondary_click: params.mouse_bindings.has_secondary_click(),
            mouse_bindings: params.mouse_bindings,
            forward_all_clicks: params.forward_all_clicks,
            shortcut_mods: params.shortcut_mods.to_mods(),
            legacy_paste: params.legacy_paste,
            clipboard_autosync: params.clipboard_autosync,
            forward_game_controllers: params.forward_game_controllers,
            touchmap,
            gamepads: [None; MAX_GAME_CONTROLLERS],
            vfinger: VirtualFinger::default(),
            repeat: KeyRepeatTracker::new(),
            next_sequence: 1, // 0 is reserved for SEQUENCE_INVALID
            mods: Mods::empty(),
            mouse_pos: Point::default(),
            mouse_buttons: MouseButtons::empty(),
        }
    }

    /// The active touchmap, if any.
    pub fn touchmap(&self) -> Option<&Touchmap> {
        self.touchmap.as_ref()
    }

    /// Whether gamepad events are forwarded raw instead of driving the
    /// touchmap engine.
    pub fn forwards_game_controllers(&self) -> bool {
        self.forward_game_controllers
    }

    /// Dispatch one host event. Total over the event taxonomy; emits zero or
    /// more control messages and zero or more local side effects.
    pub fn handle_event(&mut self, event: &InputEvent) {
        let control = self.controller.is_some();
        let paused = self.screen.is_paused();
        match event {
            InputEvent::TextInput { text } => {
                if self.key_processor.is_none() || paused {
                    return;
                }
                self.process_text_input(text);
            }
            InputEvent::Key {
                key,
                scancode,
                mods,
                down,
                repeat,
            } => {
                // some key events do not interact with the device, so
                // process the event even if control is disabled
                self.process_key(*key, *scancode, *mods, *down, *repeat);
            }
            InputEvent::MouseMotion {
                x,
                y,
                xrel,
                yrel,
                buttons,
                which,
            } => {
                if *which != TOUCH_MOUSE_ID {
                    self.mouse_pos = Point::new(*x, *y);
                    self.mouse_buttons = *buttons;
                }
                if self.mouse_processor.is_none() || paused {
                    return;
                }
                self.process_mouse_motion(*x, *y, *xrel, *yrel, *buttons, *which);
            }
            InputEvent::MouseWheel { hscroll, vscroll } => {
                if self.mouse_processor.is_none() || paused {
                    return;
                }
                self.process_mouse_wheel(*hscroll, *vscroll);
            }
            InputEvent::MouseButton {
                x,
                y,
                button,
                clicks,
                down,
                which,
            } => {
                if *which != TOUCH_MOUSE_ID {
                    self.mouse_pos = Point::new(*x, *y);
                    if let Some(mask) = MouseButtons::from_button(*button) {
                        self.mouse_buttons.set(mask, *down);
                    }
                }
                // some mouse events do not interact with the device, so
                // process the event even if control is disabled
                self.process_mouse_button(*x, *y, *button, *clicks, *down, *which);
            }
            InputEvent::TouchFinger {
                finger_id,
                x,
                y,
                pressure,
                phase,
            } => {
                if self.mouse_processor.is_none() || paused {
                    return;
                }
                self.process_touch(*finger_id, *x, *y, *pressure, *phase);
            }
            InputEvent::DropFile { path } => {
                if !control {
                    return;
                }
                self.process_drop_file(path.clone());
            }
            InputEvent::GamepadAxis { which, axis, value } => {
                if !control {
                    return;
                }
                self.process_gamepad_axis(*which, *axis, *value);
            }
            InputEvent::GamepadButton {
                which,
                button,
                pressed,
            } => {
                if !control {
                    return;
                }
                self.process_gamepad_button(*which, *button, *pressed);
            }
            InputEvent::GamepadDevice { which, kind } => {
                if !control {
                    return;
                }
                self.process_gamepad_device(*which, *kind);
            }
        }
    }

    // --- outbound helpers ---------------------------------------------------

    pub(crate) fn push_raw(&self, msg: ControlMessage) -> bool {
        match &self.controller {
            Some(controller) => controller.push_msg(msg),
            None => false,
        }
    }

    pub(crate) fn push_msg(&self, msg: ControlMessage, request: &str) -> bool {
        let ok = self.push_raw(msg);
        if !ok {
            warn!("Could not request '{request}'");
        }
        ok
    }

    fn send_keycode(&self, keycode: DeviceKeycode, action: KeyAction, name: &str) {
        let msg = ControlMessage::InjectKeycode {
            action,
            keycode,
            repeat: 0,
            metastate: 0,
        };
        if !self.push_raw(msg) {
            warn!("Could not request 'inject {name}'");
        }
    }

    fn press_back_or_turn_screen_on(&self, action: KeyAction) {
        self.push_msg(
            ControlMessage::BackOrScreenOn { action },
            "press back or turn screen on",
        );
    }

    fn expand_notification_panel(&self) {
        self.push_msg(
            ControlMessage::ExpandNotificationPanel,
            "expand notification panel",
        );
    }

    fn expand_settings_panel(&self) {
        self.push_msg(ControlMessage::ExpandSettingsPanel, "expand settings panel");
    }

    fn collapse_panels(&self) {
        self.push_msg(ControlMessage::CollapsePanels, "collapse panels");
    }

    fn get_device_clipboard(&self, copy_key: CopyKey) -> bool {
        self.push_msg(
            ControlMessage::GetClipboard { copy_key },
            "get device clipboard",
        )
    }

    fn set_device_clipboard(&mut self, paste: bool, sequence: Sequence) -> bool {
        let Some(text) = self.clipboard.text() else {
            warn!("Could not get clipboard text");
            return false;
        };
        self.push_msg(
            ControlMessage::SetClipboard {
                sequence,
                text,
                paste,
            },
            "set device clipboard",
        )
    }

    fn clipboard_paste(&mut self) {
        let Some(text) = self.clipboard.text() else {
            warn!("Could not get clipboard text");
            return;
        };
        if text.is_empty() {
            return;
        }
        self.push_msg(ControlMessage::InjectText { text }, "paste clipboard");
    }

    fn set_screen_power_mode(&self, mode: ScreenPowerMode) {
        self.push_msg(
            ControlMessage::SetScreenPowerMode { mode },
            "set screen power mode",
        );
    }

    fn rotate_device(&self) {
        self.push_msg(ControlMessage::RotateDevice, "rotate device");
    }

    fn open_hard_keyboard_settings(&self) {
        self.push_msg(
            ControlMessage::OpenHardKeyboardSettings,
            "open hard keyboard settings",
        );
    }

    /// Push one synthesized touch pointer event. Free of `self` so callers
    /// may hold a mutable borrow of the touchmap while emitting.
    pub(crate) fn push_touch(
        controller: &Controller,
        screen_size: Size,
        pointer_id: u64,
        action: TouchAction,
        point: Point,
    ) -> bool {
        let up = action == TouchAction::Up;
        trace!(
            "simulate touch id={pointer_id} point=({}, {}) up={up}",
            point.x,
            point.y
        );
        let msg = ControlMessage::InjectTouchEvent {
            action,
            screen_size,
            point,
            pointer_id,
            pressure: if up { 0.0 } else { 1.0 },
            action_button: 0,
            buttons: 0,
        };
        if !controller.push_msg(msg) {
            warn!("Could not request 'inject virtual finger event'");
            return false;
        }
        true
    }

    fn simulate_virtual_finger(&self, action: TouchAction, point: Point) -> bool {
        let Some(controller) = self.controller.as_ref() else {
            return false;
        };
        let pointer_id = if self.has_secondary_click {
            POINTER_ID_VIRTUAL_MOUSE
        } else {
            POINTER_ID_VIRTUAL_FINGER
        };
        Self::push_touch(
            controller,
            self.screen.frame_size(),
            pointer_id,
            action,
            point,
        )
    }

    // --- local side effects -------------------------------------------------

    fn switch_fps_counter_state(&mut self) {
        // the started state is only written from this thread, so there is
        // no TOCTOU issue
        if self.screen.fps_counter_started() {
            self.screen.stop_fps_counter();
        } else {
            self.screen.start_fps_counter();
        }
    }

    fn open_touchmap_file(&mut self) {
        let Some(dialog) = self.touchmap_dialog.as_mut() else {
            warn!("No file dialog available to pick a touchmap");
            return;
        };
        let Some(path) = dialog.pick_file() else {
            info!("Touchmap file selection cancelled");
            return;
        };
        info!("Selected touchmap file {}", path.display());
        // Parse before replacing: a broken file keeps the previous map.
        match Touchmap::load(&path) {
            Ok(map) => {
                self.touchmap = Some(map);
                self.forward_game_controllers = false;
            }
            Err(err) => error!("Failed to parse touchmap file {}: {err}", path.display()),
        }
    }

    fn turn_off_touchmap(&mut self) {
        self.touchmap = None;
        self.forward_game_controllers = true;
    }

    // --- event processing ---------------------------------------------------

    fn process_text_input(&mut self, text: &str) {
        let Some(kp) = self.key_processor.as_mut() else {
            return;
        };
        if !kp.supports_text() {
            return;
        }
        if is_shortcut_mod(self.shortcut_mods, self.mods) {
            // a shortcut must never generate text events
            return;
        }
        kp.process_text(text);
    }

    fn process_key(&mut self, key: Key, scancode: u32, mods: Mods, down: bool, repeat: bool) {
        self.mods = mods;

        // controller is None if no control was requested
        let control = self.controller.is_some();
        let paused = self.screen.is_paused();
        let video = self.screen.has_video();

        let ctrl = mods.ctrl();
        let shift = mods.shift();

        // Either the modifier state includes a shortcut modifier, or the
        // key itself is a modifier key. The second condition is necessary to
        // catch the modifier's own release, whose event carries empty mods.
        let is_shortcut =
            is_shortcut_mod(self.shortcut_mods, mods) || is_shortcut_key(self.shortcut_mods, key);

        if down && !repeat {
            self.repeat.on_key_down(key, mods);
        }

        if is_shortcut {
            let has_kp = self.key_processor.is_some();
            let action = if down { KeyAction::Down } else { KeyAction::Up };
            match key {
                Key::H => {
                    if has_kp && !shift && !repeat && !paused {
                        self.send_keycode(DeviceKeycode::Home, action, "HOME");
                    }
                }
                Key::B | Key::Backspace => {
                    if has_kp && !shift && !repeat && !paused {
                        self.send_keycode(DeviceKeycode::Back, action, "BACK");
                    }
                }
                Key::S => {
                    if has_kp && !shift && !repeat && !paused {
                        self.send_keycode(DeviceKeycode::AppSwitch, action, "APP_SWITCH");
                    }
                }
                Key::M => {
                    if has_kp && !shift && !repeat && !paused {
                        self.send_keycode(DeviceKeycode::Menu, action, "MENU");
                    }
                }
                Key::P => {
                    if has_kp && !shift && !repeat && !paused {
                        self.send_keycode(DeviceKeycode::Power, action, "POWER");
                    }
                }
                Key::O => {
                    if control && !repeat && down && !paused {
                        let mode = if shift {
                            ScreenPowerMode::Normal
                        } else {
                            ScreenPowerMode::Off
                        };
                        self.set_screen_power_mode(mode);
                    }
                }
                Key::Z => {
                    if video && down && !repeat {
                        self.screen.set_paused(!shift);
                    }
                }
                Key::Down => {
                    if shift {
                        if video && !repeat && down {
                            self.screen.apply_orientation_transform(Orientation::Flip180);
                        }
                    } else if has_kp && !paused {
                        // forward repeated events
                        self.send_keycode(DeviceKeycode::VolumeDown, action, "VOLUME_DOWN");
                    }
                }
                Key::Up => {
                    if shift {
                        if video && !repeat && down {
                            self.screen.apply_orientation_transform(Orientation::Flip180);
                        }
                    } else if has_kp && !paused {
                        // forward repeated events
                        self.send_keycode(DeviceKeycode::VolumeUp, action, "VOLUME_UP");
                    }
                }
                Key::Left => {
                    if video && !repeat && down {
                        let transform = if shift {
                            Orientation::Flip0
                        } else {
                            Orientation::Deg270
                        };
                        self.screen.apply_orientation_transform(transform);
                    }
                }
                Key::Right => {
                    if video && !repeat && down {
                        let transform = if shift {
                            Orientation::Flip0
                        } else {
                            Orientation::Deg90
                        };
                        self.screen.apply_orientation_transform(transform);
                    }
                }
                Key::C => {
                    if has_kp && !shift && !repeat && down && !paused {
                        self.get_device_clipboard(CopyKey::Copy);
                    }
                }
                Key::X => {
                    if has_kp && !shift && !repeat && down && !paused {
                        self.get_device_clipboard(CopyKey::Cut);
                    }
                }
                Key::V => {
                    if has_kp && !repeat && down && !paused {
                        if shift || self.legacy_paste {
                            // inject the text as input events
                            self.clipboard_paste();
                        } else {
                            // store the text in the device clipboard and
                            // paste, without requesting an acknowledgment
                            self.set_device_clipboard(true, SEQUENCE_INVALID);
                        }
                    }
                }
                Key::F => {
                    if video && !shift && !repeat && down {
                        self.screen.switch_fullscreen();
                    }
                }
                Key::W => {
                    if video && !shift && !repeat && down {
                        self.screen.resize_to_fit();
                    }
                }
                Key::G => {
                    if video && !shift && !repeat && down {
                        self.screen.resize_to_pixel_perfect();
                    }
                }
                Key::I => {
                    if video && !shift && !repeat && down {
                        self.switch_fps_counter_state();
                    }
                }
                Key::N => {
                    if control && !repeat && down && !paused {
                        if shift {
                            self.collapse_panels();
                        } else if self.repeat.count() == 0 {
                            self.expand_notification_panel();
                        } else {
                            self.expand_settings_panel();
                        }
                    }
                }
                Key::R => {
                    if control && !shift && !repeat && down && !paused {
                        self.rotate_device();
                    }
                }
                Key::K => {
                    let hid = self
                        .key_processor
                        .as_ref()
                        .is_some_and(|kp| kp.is_hid());
                    if control && !shift && !repeat && down && !paused && hid {
                        // only if the current keyboard is a physical one
                        self.open_hard_keyboard_settings();
                    }
                }
                Key::T => {
                    if control && !repeat && down && !paused && has_kp {
                        if shift {
                            self.turn_off_touchmap();
                        } else {
                            self.open_touchmap_file();
                        }
                    }
                }
                _ => {}
            }
            // a shortcut key is never forwarded, whether its guard fired or
            // not
            return;
        }

        if self.key_processor.is_none() || paused {
            return;
        }

        let mut ack_to_wait = SEQUENCE_INVALID;
        let is_ctrl_v = ctrl && !shift && key == Key::V && down && !repeat;
        if self.clipboard_autosync && is_ctrl_v {
            if self.legacy_paste {
                // inject the text as input events
                self.clipboard_paste();
                return;
            }

            // Request an acknowledgment only if necessary
            let async_paste = self
                .key_processor
                .as_ref()
                .is_some_and(|kp| kp.async_paste());
            let sequence = if async_paste {
                self.next_sequence
            } else {
                SEQUENCE_INVALID
            };

            // Synchronize the host clipboard to the device clipboard before
            // sending Ctrl+v, to allow seamless copy-paste.
            if !self.set_device_clipboard(false, sequence) {
                warn!("Clipboard could not be synchronized, Ctrl+v not injected");
                return;
            }

            if async_paste {
                // The key processor must wait for this ack before injecting
                // Ctrl+v
                ack_to_wait = sequence;
                // Increment only when the request succeeded
                self.next_sequence += 1;
            }
        }

        let event = KeyEvent {
            action: if down { KeyAction::Down } else { KeyAction::Up },
            key,
            scancode,
            repeat,
            mods,
        };
        if let Some(kp) = self.key_processor.as_mut() {
            kp.process_key(&event, ack_to_wait);
        }
    }

    fn get_position(&self, x: i32, y: i32) -> Position {
        let relative = self
            .mouse_processor
            .as_ref()
            .is_some_and(|mp| mp.relative_mode());
        if relative {
            // no absolute position
            return Position::default();
        }
        Position {
            screen_size: self.screen.frame_size(),
            point: self.screen.window_to_frame_coords(x, y),
        }
    }

    fn mouse_pointer_id(&self) -> u64 {
        if self.has_secondary_click {
            POINTER_ID_MOUSE
        } else {
            POINTER_ID_GENERIC_FINGER
        }
    }

    fn process_mouse_motion(
        &mut self,
        x: i32,
        y: i32,
        xrel: i32,
        yrel: i32,
        buttons: MouseButtons,
        which: u32,
    ) {
        if which == TOUCH_MOUSE_ID {
            // simulated from touch events, so it's a duplicate
            return;
        }

        let event = MouseMotionEvent {
            position: self.get_position(x, y),
            pointer_id: self.mouse_pointer_id(),
            xrel,
            yrel,
            buttons: self
                .mouse_bindings
                .buttons_state(buttons, self.forward_all_clicks),
        };
        if let Some(mp) = self.mouse_processor.as_mut() {
            mp.process_mouse_motion(&event);
        }

        if self.vfinger.down {
            // the virtual finger is never engaged in relative mode
            debug_assert!(!self
                .mouse_processor
                .as_ref()
                .is_some_and(|mp| mp.relative_mode()));
            let mouse = self.screen.window_to_frame_coords(x, y);
            let point = self.vfinger.reflect(mouse, self.screen.frame_size());
            self.simulate_virtual_finger(TouchAction::Move, point);
        }
    }

    fn process_mouse_button(
        &mut self,
        x: i32,
        y: i32,
        button: MouseButton,
        clicks: u8,
        down: bool,
        which: u32,
    ) {
        if which == TOUCH_MOUSE_ID {
            // simulated from touch events, so it's a duplicate
            return;
        }

        let control = self.controller.is_some();
        let paused = self.screen.is_paused();
        if control && !paused {
            let action = if down { KeyAction::Down } else { KeyAction::Up };
            match self.mouse_bindings.binding_for(button, self.forward_all_clicks) {
                MouseBinding::Disabled => {
                    // ignore click
                    return;
                }
                MouseBinding::Back => {
                    if self.key_processor.is_some() {
                        self.press_back_or_turn_screen_on(action);
                    }
                    return;
                }
                MouseBinding::Home => {
                    if self.key_processor.is_some() {
                        self.send_keycode(DeviceKeycode::Home, action, "HOME");
                    }
                    return;
                }
                MouseBinding::AppSwitch => {
                    if self.key_processor.is_some() {
                        self.send_keycode(DeviceKeycode::AppSwitch, action, "APP_SWITCH");
                    }
                    return;
                }
                MouseBinding::ExpandNotificationPanel => {
                    if down {
                        if clicks < 2 {
                            self.expand_notification_panel();
                        } else {
                            self.expand_settings_panel();
                        }
                    }
                    return;
                }
                MouseBinding::Click => {}
            }
        }

        // double-click on black borders resizes to fit the device screen
        let video = self.screen.has_video();
        let relative = self
            .mouse_processor
            .as_ref()
            .is_some_and(|mp| mp.relative_mode());
        if video && !relative && button == MouseButton::Left && clicks == 2 {
            let (sx, sy) = self.screen.hidpi_scale_coords(x, y);
            let outside = !self.screen.content_rect().contains_point(sx, sy);
            if outside {
                if down {
                    self.screen.resize_to_fit();
                }
                return;
            }
        }

        if self.mouse_processor.is_none() || paused {
            return;
        }

        let event = MouseClickEvent {
            position: self.get_position(x, y),
            action: if down { KeyAction::Down } else { KeyAction::Up },
            button,
            pointer_id: self.mouse_pointer_id(),
            buttons: self
                .mouse_bindings
                .buttons_state(self.mouse_buttons, self.forward_all_clicks),
        };
        debug!(
            "mouse click ({x}, {y}) -> pointer {} at ({}, {})",
            event.pointer_id, event.position.point.x, event.position.point.y
        );
        if let Some(mp) = self.mouse_processor.as_mut() {
            mp.process_mouse_click(&event);
        }

        if relative {
            // no pinch-to-zoom simulation
            return;
        }

        // Pinch-to-zoom, rotate and tilt simulation.
        //
        // If Ctrl is held when the left button is pressed, an additional
        // "virtual finger" event is generated on every mouse event until
        // release, mirrored through the center of the screen, so the pivot
        // of the rotation/scaling is the screen center. Shift instead
        // mirrors only horizontally, which simulates a two-finger vertical
        // tilt.
        let ctrl = self.mods.ctrl();
        let shift = self.mods.shift();
        let engage = down && !self.vfinger.down && (ctrl != shift);
        let release = !down && self.vfinger.down;
        if button == MouseButton::Left && (engage || release) {
            let mouse = self.screen.window_to_frame_coords(x, y);
            if down {
                self.vfinger.invert_x = ctrl || shift;
                self.vfinger.invert_y = ctrl;
            }
            let point = self.vfinger.reflect(mouse, self.screen.frame_size());
            let action = if down {
                TouchAction::Down
            } else {
                TouchAction::Up
            };
            if self.simulate_virtual_finger(action, point) {
                self.vfinger.down = down;
            }
        }
    }

    fn process_mouse_wheel(&mut self, hscroll: f32, vscroll: f32) {
        let supports = self
            .mouse_processor
            .as_ref()
            .is_some_and(|mp| mp.supports_mouse_scroll());
        if !supports {
            // the mouse processor does not support scroll events
            return;
        }

        let event = MouseScrollEvent {
            position: self.get_position(self.mouse_pos.x, self.mouse_pos.y),
            hscroll: hscroll.clamp(-1.0, 1.0),
            vscroll: vscroll.clamp(-1.0, 1.0),
            buttons: self
                .mouse_bindings
                .buttons_state(self.mouse_buttons, self.forward_all_clicks),
        };
        if let Some(mp) = self.mouse_processor.as_mut() {
            mp.process_mouse_scroll(&event);
        }
    }

    fn process_touch(&mut self, finger_id: u64, x: f32, y: f32, pressure: f32, phase: TouchPhase) {
        let supports = self
            .mouse_processor
            .as_ref()
            .is_some_and(|mp| mp.supports_touch());
        if !supports {
            // the mouse processor does not support touch events
            return;
        }

        // touch coordinates are normalized in the range [0; 1]
        let drawable = self.screen.drawable_size();
        let px = (x * drawable.width as f32) as i32;
        let py = (y * drawable.height as f32) as i32;

        let event = TouchEvent {
            position: Position {
                screen_size: self.screen.frame_size(),
                point: self.screen.drawable_to_frame_coords(px, py),
            },
            action: match phase {
                TouchPhase::Down => TouchAction::Down,
                TouchPhase::Up => TouchAction::Up,
                TouchPhase::Motion => TouchAction::Move,
            },
            pointer_id: finger_id,
            pressure,
        };
        if let Some(mp) = self.mouse_processor.as_mut() {
            mp.process_touch(&event);
        }
    }

    fn process_drop_file(&mut self, path: PathBuf) {
        let Some(pusher) = self.file_pusher.as_mut() else {
            debug!("File drop ignored: no file pusher");
            return;
        };
        let action = if path.extension().is_some_and(|ext| ext == "apk") {
            FilePushAction::InstallApk
        } else {
            FilePushAction::PushFile
        };
        let display_path = path.display().to_string();
        if !pusher.request(action, path) {
            warn!("Could not request file push for {display_path}");
        }
    }
}

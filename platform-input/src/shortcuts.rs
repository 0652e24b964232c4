//! Shortcut-modifier configuration and key-repeat tracking.
//!
//! A keypress is classified as a shortcut when at least one configured
//! shortcut modifier is held, or when the key itself is one of the
//! configured modifier keys (the latter catches the modifier's own release,
//! whose event carries an empty modifier state).

use bitflags::bitflags;

use crate::events::{Key, Mods};

bitflags! {
    /// Which modifier keys arm shortcuts. Configuration-level; converted to
    /// a [`Mods`] mask at init.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ShortcutMods: u8 {
        const LCTRL  = 1 << 0;
        const RCTRL  = 1 << 1;
        const LALT   = 1 << 2;
        const RALT   = 1 << 3;
        const LSUPER = 1 << 4;
        const RSUPER = 1 << 5;
    }
}

impl Default for ShortcutMods {
    fn default() -> Self {
        Self::LALT | Self::LSUPER
    }
}

impl ShortcutMods {
    /// Expand the configuration into a modifier-state mask.
    pub fn to_mods(self) -> Mods {
        let mut mods = Mods::empty();
        if self.contains(Self::LCTRL) {
            mods |= Mods::LCTRL;
        }
        if self.contains(Self::RCTRL) {
            mods |= Mods::RCTRL;
        }
        if self.contains(Self::LALT) {
            mods |= Mods::LALT;
        }
        if self.contains(Self::RALT) {
            mods |= Mods::RALT;
        }
        if self.contains(Self::LSUPER) {
            mods |= Mods::LSUPER;
        }
        if self.contains(Self::RSUPER) {
            mods |= Mods::RSUPER;
        }
        mods
    }
}

/// Modifier bits eligible as shortcut modifiers. Shift never arms a
/// shortcut; it selects the alternate action.
const SHORTCUT_MODS_MASK: Mods = Mods::CTRL.union(Mods::ALT).union(Mods::SUPER);

/// Whether the current modifier state arms shortcuts.
pub(crate) fn is_shortcut_mod(configured: Mods, mods: Mods) -> bool {
    mods.intersection(SHORTCUT_MODS_MASK).intersects(configured)
}

/// Whether the key is itself one of the configured modifier keys.
pub(crate) fn is_shortcut_key(configured: Mods, key: Key) -> bool {
    match key {
        Key::LCtrl => configured.contains(Mods::LCTRL),
        Key::RCtrl => configured.contains(Mods::RCTRL),
        Key::LAlt => configured.contains(Mods::LALT),
        Key::RAlt => configured.contains(Mods::RALT),
        Key::LSuper => configured.contains(Mods::LSUPER),
        Key::RSuper => configured.contains(Mods::RSUPER),
        _ => false,
    }
}

/// Counts successive non-auto-repeated presses of the same (key, mods)
/// combination. Drives shortcuts whose meaning changes on the second press.
#[derive(Debug)]
pub(crate) struct KeyRepeatTracker {
    last_key: Key,
    last_mods: Mods,
    count: u32,
}

impl KeyRepeatTracker {
    pub(crate) fn new() -> Self {
        Self {
            last_key: Key::Unknown,
            last_mods: Mods::empty(),
            count: 0,
        }
    }

    /// Record a non-auto-repeated DOWN and return the updated count
    /// (0 for a fresh combination).
    pub(crate) fn on_key_down(&mut self, key: Key, mods: Mods) -> u32 {
        if key == self.last_key && mods == self.last_mods {
            self.count += 1;
        } else {
            self.count = 0;
            self.last_key = key;
            self.last_mods = mods;
        }
        self.count
    }

    pub(crate) fn count(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_mods_expansion() {
        let mods = (ShortcutMods::LCTRL | ShortcutMods::RSUPER).to_mods();
        assert_eq!(mods, Mods::LCTRL | Mods::RSUPER);
    }

    #[test]
    fn test_shortcut_mod_ignores_shift() {
        let configured = ShortcutMods::LCTRL.to_mods();
        assert!(is_shortcut_mod(configured, Mods::LCTRL | Mods::LSHIFT));
        assert!(!is_shortcut_mod(configured, Mods::LSHIFT));
        assert!(!is_shortcut_mod(configured, Mods::RCTRL));
    }

    #[test]
    fn test_shortcut_key_matches_configured_modifiers_only() {
        let configured = (ShortcutMods::LALT | ShortcutMods::RSUPER).to_mods();
        assert!(is_shortcut_key(configured, Key::LAlt));
        assert!(is_shortcut_key(configured, Key::RSuper));
        assert!(!is_shortcut_key(configured, Key::LCtrl));
        assert!(!is_shortcut_key(configured, Key::A));
    }

    #[test]
    fn test_repeat_counter_resets_on_new_combination() {
        let mut tracker = KeyRepeatTracker::new();
        assert_eq!(tracker.on_key_down(Key::N, Mods::LCTRL), 0);
        assert_eq!(tracker.on_key_down(Key::N, Mods::LCTRL), 1);
        assert_eq!(tracker.on_key_down(Key::N, Mods::LCTRL), 2);
        // Different mods reset the counter.
        assert_eq!(tracker.on_key_down(Key::N, Mods::LCTRL | Mods::LSHIFT), 0);
        // Different key too.
        assert_eq!(tracker.on_key_down(Key::H, Mods::LCTRL | Mods::LSHIFT), 0);
    }
}

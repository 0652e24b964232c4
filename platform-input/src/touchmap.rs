//! Declarative gamepad-to-touch mapping.
//!
//! A touchmap binds gamepad controls to positions on the device screen: a
//! circular walk control driven by the left stick, tap buttons, and
//! press-and-aim skill buttons driven by the right stick. The file format is
//! JSON; see [`TouchmapSpec`]. Loading never replaces a working map with a
//! broken one: the file is parsed first and installed only on success.

use std::fs;
use std::path::Path;

use mirror_common::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::events::gamepad::*;

/// First finger id handed to touchmap controls. Must stay disjoint from the
/// pointer ids used for real and virtual mouse events.
pub const BASE_FINGER_ID: u64 = 100;

/// Squared distance (in device pixels) under which the walk control is
/// considered released. Independent of the walk radius: a stick within ~5
/// pixels of center lifts the finger.
pub const WALK_CONTROL_DEADZONE: i64 = 25;

/// Touchmap loading failures. Callers log and keep whatever map was active.
#[derive(Debug, Error)]
pub enum TouchmapError {
    /// The file could not be opened or read.
    #[error("failed to read touchmap file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid touchmap JSON (syntax error or missing
    /// required fields).
    #[error("failed to parse touchmap: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Map a touchmap button name to its numeric code.
///
/// The vocabulary is closed; unrecognized names map to [`BUTTON_INVALID`],
/// which is stored but never matches a real event. `LT`/`L2` and `RT`/`R2`
/// map to the trigger virtual-button codes so that analog trigger events
/// reach them through the button dispatch path.
pub fn button_name_to_code(name: &str) -> u8 {
    match name {
        "A" => BUTTON_A,
        "B" => BUTTON_B,
        "X" => BUTTON_X,
        "Y" => BUTTON_Y,
        "BACK" | "SELECT" => BUTTON_BACK,
        "GUIDE" | "HOME" => BUTTON_GUIDE,
        "START" => BUTTON_START,
        "LTHUMB" | "L3" => BUTTON_LEFTSTICK,
        "RTHUMB" | "R3" => BUTTON_RIGHTSTICK,
        "LB" | "L1" => BUTTON_LEFTSHOULDER,
        "RB" | "R1" => BUTTON_RIGHTSHOULDER,
        "UP" => BUTTON_DPAD_UP,
        "DOWN" => BUTTON_DPAD_DOWN,
        "LEFT" => BUTTON_DPAD_LEFT,
        "RIGHT" => BUTTON_DPAD_RIGHT,
        "MISC" => BUTTON_MISC1,
        "PADDLE1" => BUTTON_PADDLE1,
        "PADDLE2" => BUTTON_PADDLE2,
        "PADDLE3" => BUTTON_PADDLE3,
        "PADDLE4" => BUTTON_PADDLE4,
        "TOUCHPAD" => BUTTON_TOUCHPAD,
        "LT" | "L2" => BUTTON_TRIGGERLEFT,
        "RT" | "R2" => BUTTON_TRIGGERRIGHT,
        _ => BUTTON_INVALID,
    }
}

/// Canonical name for a button code, for touchmap emission.
pub fn button_code_to_name(code: u8) -> &'static str {
    match code {
        BUTTON_A => "A",
        BUTTON_B => "B",
        BUTTON_X => "X",
        BUTTON_Y => "Y",
        BUTTON_BACK => "BACK",
        BUTTON_GUIDE => "GUIDE",
        BUTTON_START => "START",
        BUTTON_LEFTSTICK => "LTHUMB",
        BUTTON_RIGHTSTICK => "RTHUMB",
        BUTTON_LEFTSHOULDER => "LB",
        BUTTON_RIGHTSHOULDER => "RB",
        BUTTON_DPAD_UP => "UP",
        BUTTON_DPAD_DOWN => "DOWN",
        BUTTON_DPAD_LEFT => "LEFT",
        BUTTON_DPAD_RIGHT => "RIGHT",
        BUTTON_MISC1 => "MISC",
        BUTTON_PADDLE1 => "PADDLE1",
        BUTTON_PADDLE2 => "PADDLE2",
        BUTTON_PADDLE3 => "PADDLE3",
        BUTTON_PADDLE4 => "PADDLE4",
        BUTTON_TOUCHPAD => "TOUCHPAD",
        BUTTON_TRIGGERLEFT => "LT",
        BUTTON_TRIGGERRIGHT => "RT",
        _ => "INVALID",
    }
}

/// A point in the touchmap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSpec {
    pub x: i32,
    pub y: i32,
}

impl From<PointSpec> for Point {
    fn from(spec: PointSpec) -> Self {
        Point::new(spec.x, spec.y)
    }
}

impl From<Point> for PointSpec {
    fn from(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

/// `walk_control` block: the simulated left-stick joystick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkControlSpec {
    pub center: PointSpec,
    pub radius: i32,
}

/// One `button_mappings` entry: a plain tap at a fixed position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonMappingSpec {
    pub touch: PointSpec,
    pub button: String,
}

/// One `skill_casting` entry: press to touch, aim with the right stick
/// within `radius`, release to cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCastingSpec {
    pub center: PointSpec,
    pub radius: i32,
    pub button: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingsSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walk_control: Option<WalkControlSpec>,
    #[serde(default)]
    pub button_mappings: Vec<ButtonMappingSpec>,
    #[serde(default)]
    pub skill_casting: Vec<SkillCastingSpec>,
}

/// Top-level touchmap file structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchmapSpec {
    pub mappings: MappingsSpec,
}

/// The walk control at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkControl {
    pub center: Point,
    pub radius: i32,
    pub current_pos: Point,
    pub touch_down: bool,
    pub finger_id: u64,
}

/// A touch button at runtime. Skill buttons additionally carry an aim
/// radius.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchButton {
    pub center: Point,
    pub radius: i32,
    pub current_pos: Point,
    pub touch_down: bool,
    pub finger_id: u64,
    pub button: u8,
    pub is_skill: bool,
}

/// A loaded touchmap: exclusively owned by the input manager, replaced
/// whole on reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Touchmap {
    pub walk: Option<WalkControl>,
    /// Sorted ascending by `button` code for binary search.
    pub buttons: Vec<TouchButton>,
}

impl Touchmap {
    /// Load and parse a touchmap file.
    pub fn load(path: &Path) -> Result<Self, TouchmapError> {
        let json = fs::read_to_string(path)?;
        Self::parse(&json)
    }

    /// Parse touchmap JSON.
    pub fn parse(json: &str) -> Result<Self, TouchmapError> {
        let spec: TouchmapSpec = serde_json::from_str(json)?;
        Ok(Self::from_spec(&spec))
    }

    /// Build the runtime map: walk control takes the first finger id, then
    /// buttons, then skills, in file order; the button array is sorted by
    /// code afterwards. `current_pos` starts at each control's center.
    pub fn from_spec(spec: &TouchmapSpec) -> Self {
        let mappings = &spec.mappings;
        let mut finger_id = BASE_FINGER_ID;

        let walk = mappings.walk_control.as_ref().map(|walk| {
            let center = Point::from(walk.center);
            let control = WalkControl {
                center,
                radius: walk.radius,
                current_pos: center,
                touch_down: false,
                finger_id,
            };
            finger_id += 1;
            control
        });

        let mut buttons =
            Vec::with_capacity(mappings.button_mappings.len() + mappings.skill_casting.len());
        for entry in &mappings.button_mappings {
            let center = Point::from(entry.touch);
            buttons.push(TouchButton {
                center,
                radius: 0,
                current_pos: center,
                touch_down: false,
                finger_id,
                button: button_name_to_code(&entry.button),
                is_skill: false,
            });
            finger_id += 1;
        }
        for entry in &mappings.skill_casting {
            let center = Point::from(entry.center);
            buttons.push(TouchButton {
                center,
                radius: entry.radius,
                current_pos: center,
                touch_down: false,
                finger_id,
                button: button_name_to_code(&entry.button),
                is_skill: true,
            });
            finger_id += 1;
        }

        buttons.sort_by_key(|button| button.button);

        Self { walk, buttons }
    }

    /// Emit the declarative form of this map. Together with
    /// [`Touchmap::parse`] this round-trips up to the ordering of the input
    /// arrays.
    pub fn to_spec(&self) -> TouchmapSpec {
        let mut button_mappings = Vec::new();
        let mut skill_casting = Vec::new();
        for button in &self.buttons {
            if button.is_skill {
                skill_casting.push(SkillCastingSpec {
                    center: button.center.into(),
                    radius: button.radius,
                    button: button_code_to_name(button.button).to_owned(),
                });
            } else {
                button_mappings.push(ButtonMappingSpec {
                    touch: button.center.into(),
                    button: button_code_to_name(button.button).to_owned(),
                });
            }
        }
        TouchmapSpec {
            mappings: MappingsSpec {
                walk_control: self.walk.as_ref().map(|walk| WalkControlSpec {
                    center: walk.center.into(),
                    radius: walk.radius,
                }),
                button_mappings,
                skill_casting,
            },
        }
    }

    /// Look up a button by code via binary search over the sorted array.
    pub fn button_mut(&mut self, code: u8) -> Option<&mut TouchButton> {
        let index = self
            .buttons
            .binary_search_by_key(&code, |button| button.button)
            .ok()?;
        Some(&mut self.buttons[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = r#"{
        "mappings": {
            "walk_control": { "center": {"x": 100, "y": 200}, "radius": 50 },
            "button_mappings": [
                { "touch": {"x": 50, "y": 50}, "button": "A" },
                { "touch": {"x": 90, "y": 50}, "button": "LT" }
            ],
            "skill_casting": [
                { "center": {"x": 300, "y": 400}, "radius": 80, "button": "RB" }
            ]
        }
    }"#;

    #[test]
    fn test_parse_sample() {
        let map = Touchmap::parse(SAMPLE).unwrap();
        let walk = map.walk.as_ref().unwrap();
        assert_eq!(walk.center, Point::new(100, 200));
        assert_eq!(walk.radius, 50);
        assert_eq!(walk.current_pos, walk.center);
        assert_eq!(walk.finger_id, BASE_FINGER_ID);
        assert_eq!(map.buttons.len(), 3);
    }

    #[test]
    fn test_finger_id_allocation_order() {
        let map = Touchmap::parse(SAMPLE).unwrap();
        // walk = 100, A = 101, LT = 102, RB skill = 103; the sorted array
        // keeps the ids assigned in file order.
        let a = map.buttons.iter().find(|b| b.button == BUTTON_A).unwrap();
        let lt = map
            .buttons
            .iter()
            .find(|b| b.button == BUTTON_TRIGGERLEFT)
            .unwrap();
        let rb = map
            .buttons
            .iter()
            .find(|b| b.button == BUTTON_RIGHTSHOULDER)
            .unwrap();
        assert_eq!(a.finger_id, 101);
        assert_eq!(lt.finger_id, 102);
        assert_eq!(rb.finger_id, 103);
        assert!(rb.is_skill);
        assert_eq!(rb.radius, 80);
        assert!(!a.is_skill);
        assert_eq!(a.radius, 0);
    }

    #[test]
    fn test_buttons_sorted_for_binary_search() {
        let mut map = Touchmap::parse(SAMPLE).unwrap();
        assert!(map.buttons.windows(2).all(|w| w[0].button <= w[1].button));
        assert!(map.button_mut(BUTTON_A).is_some());
        assert!(map.button_mut(BUTTON_TRIGGERLEFT).is_some());
        assert!(map.button_mut(BUTTON_B).is_none());
    }

    #[test]
    fn test_no_walk_control_block() {
        let map = Touchmap::parse(
            r#"{"mappings": {"button_mappings": [{"touch": {"x": 1, "y": 2}, "button": "B"}]}}"#,
        )
        .unwrap();
        assert!(map.walk.is_none());
        // Buttons still start at the base id.
        assert_eq!(map.buttons[0].finger_id, BASE_FINGER_ID);
    }

    #[test]
    fn test_trigger_name_aliases() {
        assert_eq!(button_name_to_code("LT"), BUTTON_TRIGGERLEFT);
        assert_eq!(button_name_to_code("L2"), BUTTON_TRIGGERLEFT);
        assert_eq!(button_name_to_code("RT"), BUTTON_TRIGGERRIGHT);
        assert_eq!(button_name_to_code("R2"), BUTTON_TRIGGERRIGHT);
        assert_eq!(button_name_to_code("SELECT"), BUTTON_BACK);
        assert_eq!(button_name_to_code("HOME"), BUTTON_GUIDE);
    }

    #[test]
    fn test_unknown_button_name_is_stored_as_invalid() {
        let map = Touchmap::parse(
            r#"{"mappings": {"button_mappings": [{"touch": {"x": 1, "y": 2}, "button": "FROB"}]}}"#,
        )
        .unwrap();
        assert_eq!(map.buttons[0].button, BUTTON_INVALID);
    }

    #[test]
    fn test_missing_entry_field_is_a_parse_error() {
        let err = Touchmap::parse(
            r#"{"mappings": {"skill_casting": [{"center": {"x": 1, "y": 2}, "button": "A"}]}}"#,
        );
        assert!(matches!(err, Err(TouchmapError::Parse(_))));
    }

    #[test]
    fn test_missing_mappings_is_a_parse_error() {
        assert!(matches!(
            Touchmap::parse("{}"),
            Err(TouchmapError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Touchmap::load(Path::new("/nonexistent/touchmap.json"));
        assert!(matches!(err, Err(TouchmapError::Io(_))));
    }

    #[test]
    fn test_round_trip_through_spec() {
        let map = Touchmap::parse(SAMPLE).unwrap();
        let emitted = serde_json::to_string(&map.to_spec()).unwrap();
        let reparsed = Touchmap::parse(&emitted).unwrap();
        assert_eq!(reparsed.walk, map.walk);
        // Button order may differ between the emitted arrays and the
        // original file; compare as sets keyed by finger id assignment.
        let mut original = map.buttons.clone();
        let mut round_tripped = reparsed.buttons.clone();
        original.sort_by_key(|b| (b.button, b.center.x));
        round_tripped.sort_by_key(|b| (b.button, b.center.x));
        assert_eq!(round_tripped.len(), original.len());
        for (a, b) in round_tripped.iter().zip(&original) {
            assert_eq!(a.button, b.button);
            assert_eq!(a.center, b.center);
            assert_eq!(a.radius, b.radius);
            assert_eq!(a.is_skill, b.is_skill);
        }
    }

    fn arbitrary_mappings() -> impl Strategy<Value = MappingsSpec> {
        let name = prop::sample::select(vec![
            "A", "B", "X", "Y", "START", "UP", "DOWN", "LB", "RB", "LT", "RT", "BOGUS",
        ]);
        let point = (-500i32..500, -500i32..500).prop_map(|(x, y)| PointSpec { x, y });
        let button = (point.clone(), name.clone()).prop_map(|(touch, n)| ButtonMappingSpec {
            touch,
            button: n.to_owned(),
        });
        let skill = (point, 0i32..200, name).prop_map(|(center, radius, n)| SkillCastingSpec {
            center,
            radius,
            button: n.to_owned(),
        });
        (
            prop::collection::vec(button, 0..8),
            prop::collection::vec(skill, 0..8),
        )
            .prop_map(|(button_mappings, skill_casting)| MappingsSpec {
                walk_control: None,
                button_mappings,
                skill_casting,
            })
    }

    proptest! {
        /// The constructed button array is always sorted, whatever the file
        /// order was.
        #[test]
        fn test_constructed_map_is_sorted(mappings in arbitrary_mappings()) {
            let map = Touchmap::from_spec(&TouchmapSpec { mappings });
            prop_assert!(map.buttons.windows(2).all(|w| w[0].button <= w[1].button));
        }

        /// Finger ids are unique and dense starting at the base.
        #[test]
        fn test_finger_ids_unique(mappings in arbitrary_mappings()) {
            let map = Touchmap::from_spec(&TouchmapSpec { mappings });
            let mut ids: Vec<u64> = map.buttons.iter().map(|b| b.finger_id).collect();
            ids.sort_unstable();
            let expected: Vec<u64> =
                (BASE_FINGER_ID..BASE_FINGER_ID + ids.len() as u64).collect();
            prop_assert_eq!(ids, expected);
        }
    }
}

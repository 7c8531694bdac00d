//! Declarative pad table and the controller configuration.
//!
//! Each physical key is described by a [`PadConfig`]. At startup the table is
//! derived once into [`PadProfile`]s, which carry the resolved [`PadMode`]
//! and never change afterwards.

use embassy_time::Duration;
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animator::AnimationCurve;
use crate::color::{Rgb, rgb_from_u32};
use crate::keycode::{KeyCombo, Keycode};

/// Number of pads on the reference 4x4 keypad
pub const PAD_COUNT: usize = 16;

/// Hue palette, 24 evenly spaced steps around the color wheel
pub mod hue {
    const SPLIT: f32 = 1.0 / 24.0;

    pub const RED: f32 = SPLIT * 0.0;
    pub const RRY: f32 = SPLIT * 1.0;
    pub const RY: f32 = SPLIT * 2.0;
    pub const RYY: f32 = SPLIT * 3.0;
    pub const YELLOW: f32 = SPLIT * 4.0;
    pub const YYG: f32 = SPLIT * 5.0;
    pub const YG: f32 = SPLIT * 6.0;
    pub const YGG: f32 = SPLIT * 7.0;
    pub const GREEN: f32 = SPLIT * 8.0;
    pub const GGC: f32 = SPLIT * 9.0;
    pub const GC: f32 = SPLIT * 10.0;
    pub const GCC: f32 = SPLIT * 11.0;
    pub const CYAN: f32 = SPLIT * 12.0;
    pub const CCB: f32 = SPLIT * 13.0;
    pub const CB: f32 = SPLIT * 14.0;
    pub const CBB: f32 = SPLIT * 15.0;
    pub const BLUE: f32 = SPLIT * 16.0;
    pub const BBM: f32 = SPLIT * 17.0;
    pub const BM: f32 = SPLIT * 18.0;
    pub const BMM: f32 = SPLIT * 19.0;
    pub const MAGENTA: f32 = SPLIT * 20.0;
    pub const MMR: f32 = SPLIT * 21.0;
    pub const MR: f32 = SPLIT * 22.0;
    pub const MRR: f32 = SPLIT * 23.0;
}

/// Static description of one pad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadConfig {
    /// Pad color (0.0-1.0), `None` renders colorless
    pub hue: Option<f32>,
    /// Pads sharing a group behave like radio buttons
    pub group: Option<&'static str>,
    /// Codes sent on activation
    pub keycodes_on: &'static [Keycode],
    /// Codes sent on deactivation, setting these makes a toggle pad
    pub keycodes_off: Option<&'static [Keycode]>,
}

impl PadConfig {
    /// Pad without a mode, never lit and never emits
    pub const UNUSED: Self = Self {
        hue: None,
        group: None,
        keycodes_on: &[],
        keycodes_off: None,
    };

    /// Momentary key
    pub const fn key(hue: f32, keycodes: &'static [Keycode]) -> Self {
        Self {
            hue: Some(hue),
            group: None,
            keycodes_on: keycodes,
            keycodes_off: None,
        }
    }

    /// Toggle key sending different codes when switched on and off
    pub const fn toggle(
        hue: f32,
        keycodes_on: &'static [Keycode],
        keycodes_off: &'static [Keycode],
    ) -> Self {
        Self {
            hue: Some(hue),
            group: None,
            keycodes_on,
            keycodes_off: Some(keycodes_off),
        }
    }

    /// Member of a mutually exclusive group
    pub const fn grouped(hue: f32, group: &'static str, keycodes: &'static [Keycode]) -> Self {
        Self {
            hue: Some(hue),
            group: Some(group),
            keycodes_on: keycodes,
            keycodes_off: None,
        }
    }

    #[must_use]
    pub const fn with_hue(mut self, hue: Option<f32>) -> Self {
        self.hue = hue;
        self
    }

    fn off_codes(&self) -> &'static [Keycode] {
        self.keycodes_off.unwrap_or(&[])
    }
}

/// Behavioral class of a pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadMode {
    /// Dead pad
    None,
    /// Momentary key: press and release follow the physical key
    Key,
    /// Flips between on/off codes on every press
    Toggle,
    /// Radio button within its group
    Group,
}

impl PadMode {
    /// Classify a pad config.
    ///
    /// Toggle wins over group, group wins over key. A pad without
    /// activation codes is always [`PadMode::None`].
    pub fn derive(config: &PadConfig) -> Self {
        let has_on = !config.keycodes_on.is_empty();
        if has_on && !config.off_codes().is_empty() {
            Self::Toggle
        } else if has_on && config.group.is_some() {
            Self::Group
        } else if has_on {
            Self::Key
        } else {
            Self::None
        }
    }

    /// Returns if pads of this mode are ever lit
    pub const fn is_lit(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Interned group name, unique per distinct name in a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub u8);

/// Pad config resolved into its mode and emitted combos
#[derive(Debug, Clone, PartialEq)]
pub struct PadProfile {
    pub hue: Option<f32>,
    pub mode: PadMode,
    /// Set only for [`PadMode::Group`] pads
    pub group: Option<GroupId>,
    pub group_name: Option<&'static str>,
    pub keycodes_on: KeyCombo,
    pub keycodes_off: KeyCombo,
}

impl PadProfile {
    /// Derive the profile of a single pad with an already resolved group id
    pub fn derive(config: &PadConfig, group: Option<GroupId>) -> Self {
        let mode = PadMode::derive(config);
        let (keycodes_on, on_truncated) = KeyCombo::from_slice_truncated(config.keycodes_on);
        let (keycodes_off, off_truncated) = match mode {
            PadMode::Toggle => KeyCombo::from_slice_truncated(config.off_codes()),
            _ => (KeyCombo::new(), false),
        };
        #[cfg(feature = "esp32-log")]
        if on_truncated || off_truncated {
            println!(
                "[PadProfile.derive] combo longer than {} codes truncated",
                crate::keycode::MAX_COMBO
            );
        }
        #[cfg(not(feature = "esp32-log"))]
        let _ = (on_truncated, off_truncated);

        let is_group = mode == PadMode::Group;
        Self {
            hue: config.hue,
            mode,
            group: group.filter(|_| is_group),
            group_name: config.group.filter(|_| is_group),
            keycodes_on,
            keycodes_off,
        }
    }

    /// Saturation used for rendering
    pub fn saturation(&self) -> f32 {
        if self.hue.is_some() { 1.0 } else { 0.0 }
    }
}

/// Derive every pad of a table, interning group names in order of appearance
#[allow(clippy::cast_possible_truncation)]
pub fn derive_profiles<const N: usize>(table: &[PadConfig; N]) -> [PadProfile; N] {
    let mut names: Vec<&'static str, N> = Vec::new();
    core::array::from_fn(|i| {
        let config = &table[i];
        let group = match (PadMode::derive(config), config.group) {
            (PadMode::Group, Some(name)) => {
                let known = names.iter().position(|known| *known == name);
                let index = match known {
                    Some(index) => index,
                    None => {
                        // At most one new name per pad, so there is always room
                        let _ = names.push(name);
                        names.len() - 1
                    }
                };
                Some(GroupId(index as u8))
            }
            _ => None,
        };
        PadProfile::derive(config, group)
    })
}

/// Brightness levels used by the animator (0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessLevels {
    /// Unlit
    pub min: f32,
    /// Resting level of a pad that is off
    pub off: f32,
    /// Resting level of a pad that is on
    pub on: f32,
    /// Held down
    pub max: f32,
}

impl BrightnessLevels {
    const SPLIT: f32 = 1.0 / 32.0;

    pub const DEFAULT: Self = Self {
        min: Self::SPLIT * 0.0,
        off: Self::SPLIT * 2.0,
        on: Self::SPLIT * 30.0,
        max: Self::SPLIT * 32.0,
    };
}

impl Default for BrightnessLevels {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Output transport settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// When false no codes are sent, pads still light up
    pub live: bool,
    /// Keep the transport discoverable while no host is connected
    pub advertise: bool,
}

impl OutputConfig {
    pub const DEFAULT: Self = Self {
        live: true,
        advertise: true,
    };
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Battery voltage to color calibration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryCalibration {
    /// Voltage shown fully as `low_color`
    pub low_voltage: f32,
    /// Voltage shown fully as `high_color`
    pub high_voltage: f32,
    pub low_color: Rgb,
    pub high_color: Rgb,
    /// Interval between samples
    pub period: Duration,
}

impl BatteryCalibration {
    pub const DEFAULT: Self = Self {
        low_voltage: 3.3,
        high_voltage: 4.2,
        low_color: rgb_from_u32(0xFF_00_00),
        high_color: rgb_from_u32(0x00_FF_00),
        period: Duration::from_secs(10),
    };
}

/// Marching ring shown while the keyboard link is down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingConfig {
    /// Pixel indices visited in order, one per tick
    pub order: &'static [usize],
    /// Color while the transport is discoverable
    pub advertising_color: Rgb,
    /// Color while the transport is neither connected nor discoverable
    pub idle_color: Rgb,
}

impl RingConfig {
    /// Outer ring of a 4x4 grid, clockwise from the top left
    pub const PERIMETER_4X4: &'static [usize] = &[0, 1, 2, 3, 7, 11, 15, 14, 13, 12, 8, 4];

    pub const DEFAULT: Self = Self {
        order: Self::PERIMETER_4X4,
        advertising_color: rgb_from_u32(0x00_00_7F),
        idle_color: rgb_from_u32(0x7F_00_00),
    };
}

/// Battery and connection indication
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusConfig {
    pub battery: BatteryCalibration,
    pub ring: RingConfig,
}

impl StatusConfig {
    pub const DEFAULT: Self = Self {
        battery: BatteryCalibration::DEFAULT,
        ring: RingConfig::DEFAULT,
    };
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration for the keypad controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    pub levels: BrightnessLevels,
    pub curve: AnimationCurve,
    /// Interval between ticks
    pub tick_interval: Duration,
    /// Shortest gap between two keypad polls, the keypad misreads when polled faster
    pub min_poll_interval: Duration,
    pub output: OutputConfig,
    /// `None` disables battery and connection indication
    pub status: Option<StatusConfig>,
    /// Color shown on every pad before the first tick
    pub boot_color: Rgb,
}

impl ControllerConfig {
    pub const DEFAULT: Self = Self {
        levels: BrightnessLevels::DEFAULT,
        curve: AnimationCurve::DEFAULT,
        tick_interval: Duration::from_millis(20),
        min_poll_interval: Duration::from_millis(17),
        output: OutputConfig::DEFAULT,
        status: None,
        boot_color: rgb_from_u32(0x00_00_7F),
    };

    /// Default config with battery and connection indication enabled
    pub const fn with_status() -> Self {
        let mut config = Self::DEFAULT;
        config.status = Some(StatusConfig::DEFAULT);
        config
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Group shared by the scene selection pads of [`OBS_PADS`]
pub const SCENE_GROUP: &str = "scene";

/// Streaming deck for OBS studio
///
/// Pad 0 toggles recording, pads 1-11 select scenes, pads 12-14 are
/// momentary shortcuts and pad 15 toggles the virtual camera.
pub const OBS_PADS: [PadConfig; PAD_COUNT] = [
    PadConfig::toggle(
        hue::RED,
        &[Keycode::ALT, Keycode::F13],
        &[Keycode::CONTROL, Keycode::F13],
    ),
    PadConfig::grouped(hue::MR, SCENE_GROUP, &[Keycode::F13]),
    PadConfig::grouped(hue::MR, SCENE_GROUP, &[Keycode::F14]),
    PadConfig::grouped(hue::MR, SCENE_GROUP, &[Keycode::F15]),
    PadConfig::grouped(hue::MAGENTA, SCENE_GROUP, &[Keycode::F16]),
    PadConfig::grouped(hue::MAGENTA, SCENE_GROUP, &[Keycode::F17]),
    PadConfig::grouped(hue::MAGENTA, SCENE_GROUP, &[Keycode::F18]),
    PadConfig::grouped(hue::MAGENTA, SCENE_GROUP, &[Keycode::F19]),
    PadConfig::grouped(hue::BM, SCENE_GROUP, &[Keycode::F20]),
    PadConfig::grouped(hue::BM, SCENE_GROUP, &[Keycode::F21]),
    PadConfig::grouped(hue::BM, SCENE_GROUP, &[Keycode::F22]),
    PadConfig::grouped(hue::BM, SCENE_GROUP, &[Keycode::F23]),
    PadConfig::key(hue::BLUE, &[Keycode::SHIFT, Keycode::F13]),
    PadConfig::key(hue::CYAN, &[Keycode::ALT, Keycode::LEFT_ARROW]),
    PadConfig::key(hue::CYAN, &[Keycode::ALT, Keycode::RIGHT_ARROW]),
    PadConfig::toggle(
        hue::GREEN,
        &[Keycode::ALT, Keycode::F14],
        &[Keycode::CONTROL, Keycode::F14],
    ),
];

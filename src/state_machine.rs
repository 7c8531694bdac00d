//! Pad state machine
//!
//! Converts raw key edges into pad state changes and the key action that
//! should be sent to the host. All modes share the single [`PadStateMachine::on_edge`]
//! entry point and differ only in their transition rule.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::{BrightnessLevels, PadConfig, PadMode, PadProfile, derive_profiles};
use crate::keycode::KeyCombo;

/// Key transition reported by the input transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Key pressed
    Rising,
    /// Key released
    Falling,
}

/// Edge of a single pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeEvent {
    pub pad: usize,
    pub edge: Edge,
}

impl EdgeEvent {
    pub const fn press(pad: usize) -> Self {
        Self {
            pad,
            edge: Edge::Rising,
        }
    }

    pub const fn release(pad: usize) -> Self {
        Self {
            pad,
            edge: Edge::Falling,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyActionKind {
    Press,
    Release,
}

/// Key combo to press or release on the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAction {
    pub kind: KeyActionKind,
    pub codes: KeyCombo,
}

impl KeyAction {
    pub fn press(codes: &KeyCombo) -> Self {
        Self {
            kind: KeyActionKind::Press,
            codes: codes.clone(),
        }
    }

    pub fn release(codes: &KeyCombo) -> Self {
        Self {
            kind: KeyActionKind::Release,
            codes: codes.clone(),
        }
    }
}

/// Mutable state of one pad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadRuntimeState {
    /// Physical key is held
    pub down: bool,
    /// Logical activation, used by toggle and group pads
    pub on: bool,
    /// Current indicator brightness (0.0-1.0)
    pub brightness: f32,
}

impl PadRuntimeState {
    /// Initial state, lit pads start at full brightness and fade to rest
    pub fn initial(mode: PadMode, levels: &BrightnessLevels) -> Self {
        Self {
            down: false,
            on: false,
            brightness: if mode.is_lit() { levels.max } else { levels.min },
        }
    }
}

/// Runtime table of all pads
#[derive(Debug, Clone)]
pub struct PadStateMachine<const N: usize> {
    profiles: [PadProfile; N],
    states: [PadRuntimeState; N],
    min_brightness: f32,
}

impl<const N: usize> PadStateMachine<N> {
    /// Derive pad modes from the table and initialize their runtime state
    pub fn new(table: &[PadConfig; N], levels: &BrightnessLevels) -> Self {
        Self::from_profiles(derive_profiles(table), levels)
    }

    pub fn from_profiles(profiles: [PadProfile; N], levels: &BrightnessLevels) -> Self {
        let states = core::array::from_fn(|i| PadRuntimeState::initial(profiles[i].mode, levels));
        Self {
            profiles,
            states,
            min_brightness: levels.min,
        }
    }

    /// Number of pads
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn profile(&self, pad: usize) -> &PadProfile {
        &self.profiles[pad]
    }

    pub fn state(&self, pad: usize) -> &PadRuntimeState {
        &self.states[pad]
    }

    pub fn profiles(&self) -> &[PadProfile; N] {
        &self.profiles
    }

    pub fn states(&self) -> &[PadRuntimeState; N] {
        &self.states
    }

    /// Pad currently switched on in the named group
    pub fn active_in_group(&self, name: &str) -> Option<usize> {
        self.profiles
            .iter()
            .zip(self.states.iter())
            .position(|(profile, state)| profile.group_name == Some(name) && state.on)
    }

    /// Iterate pads with mutable access to their runtime state
    pub fn pads_mut(&mut self) -> impl Iterator<Item = (&PadProfile, &mut PadRuntimeState)> {
        self.profiles.iter().zip(self.states.iter_mut())
    }

    /// Process one edge and return the key action to send, if any.
    ///
    /// # Panics
    ///
    /// Panics if `pad` is out of range, which means the input transport and
    /// the pad table disagree.
    pub fn on_edge(&mut self, pad: usize, edge: Edge) -> Option<KeyAction> {
        assert!(pad < N, "pad index {} out of range ({} pads)", pad, N);
        match edge {
            Edge::Rising => self.press(pad),
            Edge::Falling => self.release(pad),
        }
    }

    /// Convenience wrapper around [`Self::on_edge`]
    pub fn handle(&mut self, event: EdgeEvent) -> Option<KeyAction> {
        self.on_edge(event.pad, event.edge)
    }

    fn press(&mut self, pad: usize) -> Option<KeyAction> {
        #[cfg(feature = "esp32-log")]
        println!("[PadStateMachine] press {}", pad);

        let profile = &self.profiles[pad];
        let state = &mut self.states[pad];
        state.down = true;

        match profile.mode {
            PadMode::None => None,
            PadMode::Key => Some(KeyAction::press(&profile.keycodes_on)),
            PadMode::Toggle => {
                state.on = !state.on;
                if state.on {
                    Some(KeyAction::press(&profile.keycodes_on))
                } else {
                    Some(KeyAction::press(&profile.keycodes_off))
                }
            }
            PadMode::Group => {
                state.on = true;
                let action = KeyAction::press(&profile.keycodes_on);
                self.clear_group_except(pad);
                Some(action)
            }
        }
    }

    fn release(&mut self, pad: usize) -> Option<KeyAction> {
        #[cfg(feature = "esp32-log")]
        println!("[PadStateMachine] release {}", pad);

        let profile = &self.profiles[pad];
        let state = &mut self.states[pad];
        state.down = false;

        match profile.mode {
            PadMode::None => None,
            PadMode::Key | PadMode::Group => Some(KeyAction::release(&profile.keycodes_on)),
            PadMode::Toggle => {
                if state.on {
                    Some(KeyAction::release(&profile.keycodes_on))
                } else {
                    Some(KeyAction::release(&profile.keycodes_off))
                }
            }
        }
    }

    /// Switch off every other member of the pad's group.
    ///
    /// Cleared pads drop to minimum brightness at once instead of fading.
    fn clear_group_except(&mut self, pad: usize) {
        let Some(group) = self.profiles[pad].group else {
            return;
        };
        for (i, (profile, state)) in self.profiles.iter().zip(self.states.iter_mut()).enumerate() {
            if i == pad || profile.mode != PadMode::Group || profile.group != Some(group) {
                continue;
            }
            if state.on {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[PadStateMachine] pad {} cleared from group {:?}",
                    i, profile.group_name
                );
                state.on = false;
                state.brightness = self.min_brightness;
            }
        }
    }
}

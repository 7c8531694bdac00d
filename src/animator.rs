//! Per-tick brightness easing for pad indicators
//!
//! Every tick the target brightness of a pad is recomputed from its logical
//! state, then the current brightness moves towards it by a bounded step.
//! The step never overshoots and the value always lands exactly on target.

use libm::fabsf;

use crate::config::{BrightnessLevels, PadMode};
use crate::state_machine::PadRuntimeState;

/// How brightness approaches its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationCurve {
    /// Constant step per tick
    Linear {
        /// Brightness change per tick
        step: f32,
    },
    /// Close a fixed fraction of the remaining gap per tick
    Exponential {
        /// Fraction of the gap closed is `1 / divisor`
        divisor: f32,
        /// Steps smaller than this snap to the target
        min_step: f32,
    },
}

impl AnimationCurve {
    pub const DEFAULT: Self = Self::Exponential {
        divisor: 16.0,
        min_step: 1.0 / 1024.0,
    };

    /// Fixed step of 1% per tick
    pub const LINEAR: Self = Self::Linear { step: 0.01 };

    /// Move `current` one step towards `target`
    pub fn step(self, current: f32, target: f32) -> f32 {
        let gap = fabsf(target - current);
        let step = match self {
            Self::Linear { step } => {
                if gap <= step || step <= 0.0 {
                    return target;
                }
                step
            }
            Self::Exponential { divisor, min_step } => {
                let step = gap / divisor.max(1.0);
                if step < min_step.max(f32::EPSILON) || step >= gap {
                    return target;
                }
                step
            }
        };

        if target > current {
            (current + step).min(target)
        } else {
            (current - step).max(target)
        }
    }
}

impl Default for AnimationCurve {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Brightness a pad animates towards given its mode and state
pub fn target_brightness(
    mode: PadMode,
    state: &PadRuntimeState,
    levels: &BrightnessLevels,
) -> f32 {
    match (mode, state.down) {
        (PadMode::None, _) => levels.min,
        (PadMode::Key | PadMode::Group, true) => levels.max,
        (PadMode::Toggle, true) => {
            if state.on {
                levels.max
            } else {
                levels.min
            }
        }
        (_, false) => {
            if state.on {
                levels.on
            } else {
                levels.off
            }
        }
    }
}

/// Steps pad brightness towards its target once per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessAnimator {
    levels: BrightnessLevels,
    curve: AnimationCurve,
}

impl BrightnessAnimator {
    pub const fn new(levels: BrightnessLevels, curve: AnimationCurve) -> Self {
        Self { levels, curve }
    }

    pub const fn levels(&self) -> &BrightnessLevels {
        &self.levels
    }

    pub const fn curve(&self) -> AnimationCurve {
        self.curve
    }

    /// Advance one pad by a single tick
    ///
    /// Dead pads are pinned to the minimum level.
    pub fn tick(&self, mode: PadMode, state: &mut PadRuntimeState) {
        if !mode.is_lit() {
            state.brightness = self.levels.min;
            return;
        }
        let target = target_brightness(mode, state, &self.levels);
        state.brightness = self.curve.step(state.brightness, target);
    }
}

impl Default for BrightnessAnimator {
    fn default() -> Self {
        Self::new(BrightnessLevels::DEFAULT, AnimationCurve::DEFAULT)
    }
}

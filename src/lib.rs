#![no_std]

pub mod animator;
pub mod channel;
pub mod color;
pub mod config;
pub mod controller;
pub mod keycode;
pub mod math8;
pub mod output;
pub mod scheduler;
pub mod state_machine;
pub mod status;

pub use animator::{AnimationCurve, BrightnessAnimator, target_brightness};
pub use channel::{EdgeChannel, EdgeReceiver, EdgeSender};
pub use config::{
    BatteryCalibration, BrightnessLevels, ControllerConfig, OBS_PADS, OutputConfig, PAD_COUNT,
    PadConfig, PadMode, PadProfile, RingConfig, StatusConfig,
};
pub use controller::Controller;
pub use keycode::{KeyCombo, Keycode};
pub use output::{EmitError, KeyboardTransport, LinkState, OutputSink};
pub use scheduler::{StopSignal, TickResult, TickScheduler};
pub use state_machine::{Edge, EdgeEvent, KeyAction, KeyActionKind, PadRuntimeState, PadStateMachine};
pub use status::{BatterySensor, NoBattery, StatusIndicator};

pub use color::{Rgb, hsv_to_rgb};
pub use embassy_time::{Duration, Instant};

/// Source of key edges (keypad scanner, debounced GPIO, interrupt queue)
///
/// Implement this trait to support different input hardware.
pub trait EdgeSource {
    /// Take the oldest pending edge, `None` once drained
    fn poll(&mut self) -> Option<EdgeEvent>;

    /// Enable reporting of the given edge for a pad
    fn activate(&mut self, _pad: usize, _edge: Edge) {}
}

/// Abstract pad indicator driver
///
/// Implement this trait to support different LED hardware.
/// The controller is generic over this trait.
pub trait IndicatorSurface {
    /// Set the color of a single pad indicator
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Write a whole frame, starting at pixel 0
    fn write(&mut self, colors: &[Rgb]) {
        for (index, color) in colors.iter().enumerate() {
            self.set_pixel(index, *color);
        }
    }

    /// Latch written pixels, for drivers that buffer a frame
    fn show(&mut self) {}
}

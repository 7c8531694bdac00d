//! Battery and connection indication

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{BLACK, Rgb, blend_colors};
use crate::config::{BatteryCalibration, RingConfig};
use crate::math8::{progress_between, unit8};
use crate::output::LinkState;

/// Battery voltage source
pub trait BatterySensor {
    /// Battery voltage in volts
    fn read_voltage(&mut self) -> f32;
}

/// Single status LED, separate from the pad indicators
pub trait StatusIndicator {
    fn set_status(&mut self, color: Rgb);
}

/// Placeholder for boards without a battery
///
/// Uninhabited, so `Option<NoBattery>` is always `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoBattery {}

impl BatterySensor for NoBattery {
    fn read_voltage(&mut self) -> f32 {
        match *self {}
    }
}

impl StatusIndicator for NoBattery {
    fn set_status(&mut self, _color: Rgb) {
        match *self {}
    }
}

/// Map a voltage onto the calibrated low/high colors, clamped outside
pub fn battery_color(voltage: f32, calibration: &BatteryCalibration) -> Rgb {
    let level = progress_between(voltage, calibration.low_voltage, calibration.high_voltage);
    blend_colors(calibration.low_color, calibration.high_color, unit8(level))
}

/// Periodic battery sampling
#[derive(Debug, Clone)]
pub struct BatteryMonitor {
    calibration: BatteryCalibration,
    next_sample: Option<Instant>,
    last_voltage: Option<f32>,
}

impl BatteryMonitor {
    pub const fn new(calibration: BatteryCalibration) -> Self {
        Self {
            calibration,
            next_sample: None,
            last_voltage: None,
        }
    }

    /// Returns if a sample is due, the first tick always samples
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_sample.is_none_or(|deadline| now >= deadline)
    }

    /// Sample the sensor if due and return the color to show
    pub fn poll<B: BatterySensor>(&mut self, now: Instant, sensor: &mut B) -> Option<Rgb> {
        if !self.is_due(now) {
            return None;
        }
        let voltage = sensor.read_voltage();
        self.last_voltage = Some(voltage);
        self.next_sample = Some(now + self.period());

        #[cfg(feature = "esp32-log")]
        println!("[BatteryMonitor] battery {}V", voltage);

        Some(battery_color(voltage, &self.calibration))
    }

    pub const fn period(&self) -> Duration {
        self.calibration.period
    }

    pub const fn last_voltage(&self) -> Option<f32> {
        self.last_voltage
    }
}

/// Single lit pixel walking around a ring while the link is down
#[derive(Debug, Clone)]
pub struct MarchingRing {
    config: RingConfig,
    position: usize,
}

impl MarchingRing {
    pub const fn new(config: RingConfig) -> Self {
        Self {
            config,
            position: 0,
        }
    }

    /// Pixel lit on the next frame
    pub fn current_pixel(&self) -> Option<usize> {
        self.config.order.get(self.position).copied()
    }

    /// Color for the given link state, `None` while connected
    pub fn color(&self, link: LinkState) -> Option<Rgb> {
        match link {
            LinkState::Ready => None,
            LinkState::Advertising => Some(self.config.advertising_color),
            LinkState::Idle => Some(self.config.idle_color),
        }
    }

    /// Render one step into the frame and advance.
    ///
    /// Returns false without touching the frame when the link is ready.
    pub fn render(&mut self, link: LinkState, frame: &mut [Rgb]) -> bool {
        let Some(color) = self.color(link) else {
            self.position = 0;
            return false;
        };

        frame.fill(BLACK);
        if let Some(pixel) = self.current_pixel() {
            if let Some(led) = frame.get_mut(pixel) {
                *led = color;
            }
        }
        if !self.config.order.is_empty() {
            self.position = (self.position + 1) % self.config.order.len();
        }
        true
    }
}

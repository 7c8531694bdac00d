use embassy_time::{Duration, Instant};

use crate::animator::BrightnessAnimator;
use crate::color::{BLACK, Rgb, hsv_to_rgb};
use crate::config::{ControllerConfig, PadConfig};
use crate::output::{EmitError, KeyboardTransport, LinkState, OutputSink};
use crate::state_machine::{Edge, EdgeEvent, PadStateMachine};
use crate::status::{BatteryMonitor, BatterySensor, MarchingRing, StatusIndicator};
use crate::EdgeSource;

/// Battery and connection indication state
#[derive(Debug, Clone)]
struct StatusIndication {
    battery: BatteryMonitor,
    ring: MarchingRing,
}

/// Keypad controller - the main orchestrator
///
/// Owns the pad table, animator and output sink. Everything here runs on the
/// tick loop, nothing is shared with other tasks.
pub struct Controller<K: KeyboardTransport, const N: usize> {
    // External dependencies and configuration
    sink: OutputSink<K>,
    animator: BrightnessAnimator,
    advertise: bool,
    boot_color: Rgb,
    tick_interval: Duration,
    min_poll_interval: Duration,

    // Internal state
    pads: PadStateMachine<N>,
    status: Option<StatusIndication>,
    frame_buffer: [Rgb; N],
}

impl<K: KeyboardTransport, const N: usize> Controller<K, N> {
    /// Create a controller for the pad table
    pub fn new(table: &[PadConfig; N], keyboard: K, config: &ControllerConfig) -> Self {
        Self {
            sink: OutputSink::new(keyboard, config.output),
            animator: BrightnessAnimator::new(config.levels, config.curve),
            advertise: config.output.advertise,
            boot_color: config.boot_color,
            tick_interval: config.tick_interval,
            min_poll_interval: config.min_poll_interval,
            pads: PadStateMachine::new(table, &config.levels),
            status: config.status.map(|status| StatusIndication {
                battery: BatteryMonitor::new(status.battery),
                ring: MarchingRing::new(status.ring),
            }),
            frame_buffer: [config.boot_color; N],
        }
    }

    /// Prepare the input transport and the transport link.
    ///
    /// Enables edge reporting for every pad and fills the frame with the
    /// boot color.
    pub fn begin<I: EdgeSource>(&mut self, input: &mut I) -> &[Rgb] {
        for pad in 0..N {
            input.activate(pad, Edge::Rising);
            input.activate(pad, Edge::Falling);
        }
        if self.advertise {
            self.sink.maintain_advertising();
        }
        self.frame_buffer = [self.boot_color; N];
        &self.frame_buffer
    }

    /// Process a single edge and send the resulting key action
    ///
    /// The pad state changes even if the action could not be delivered.
    pub fn handle_edge(&mut self, event: EdgeEvent) -> Result<(), EmitError> {
        match self.pads.handle(event) {
            Some(action) => self.sink.emit(&action),
            None => Ok(()),
        }
    }

    /// Drain all pending edges in arrival order
    ///
    /// Returns the number of processed edges.
    pub fn process_edges<I: EdgeSource>(&mut self, input: &mut I) -> usize {
        let mut processed = 0;
        while let Some(event) = input.poll() {
            // Delivery failures are logged and counted by the sink
            let _ = self.handle_edge(event);
            processed += 1;
        }
        processed
    }

    /// Step every pad's brightness towards its target
    pub fn animate(&mut self) {
        let animator = self.animator;
        for (profile, state) in self.pads.pads_mut() {
            animator.tick(profile.mode, state);
        }
    }

    /// Render one frame
    ///
    /// Animates and composes every pad. While the link is down and status
    /// indication is enabled, the connection ring replaces pad colors.
    pub fn render(&mut self) -> &[Rgb] {
        self.animate();
        self.compose();

        if self.advertise {
            self.sink.maintain_advertising();
        }

        let link = self.sink.link_state();
        if let Some(status) = self.status.as_mut() {
            status.ring.render(link, &mut self.frame_buffer);
        }

        &self.frame_buffer
    }

    /// Sample the battery when due and update the status indicator
    pub fn update_battery<B: BatterySensor, L: StatusIndicator>(
        &mut self,
        now: Instant,
        sensor: &mut B,
        indicator: &mut L,
    ) {
        let Some(status) = self.status.as_mut() else {
            return;
        };
        if let Some(color) = status.battery.poll(now, sensor) {
            indicator.set_status(color);
        }
    }

    /// Compose pad colors from hue and current brightness
    fn compose(&mut self) {
        let profiles = self.pads.profiles();
        let states = self.pads.states();
        for (pixel, (profile, state)) in self
            .frame_buffer
            .iter_mut()
            .zip(profiles.iter().zip(states.iter()))
        {
            *pixel = if profile.mode.is_lit() {
                hsv_to_rgb(
                    profile.hue.unwrap_or(0.0),
                    profile.saturation(),
                    state.brightness,
                )
            } else {
                BLACK
            };
        }
    }

    /// Interval between ticks
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Shortest allowed gap between two calls to [`Self::process_edges`]
    pub const fn min_poll_interval(&self) -> Duration {
        self.min_poll_interval
    }

    pub fn frame(&self) -> &[Rgb; N] {
        &self.frame_buffer
    }

    pub fn pads(&self) -> &PadStateMachine<N> {
        &self.pads
    }

    pub fn pads_mut(&mut self) -> &mut PadStateMachine<N> {
        &mut self.pads
    }

    pub fn sink(&self) -> &OutputSink<K> {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut OutputSink<K> {
        &mut self.sink
    }

    pub fn link_state(&self) -> LinkState {
        self.sink.link_state()
    }

    /// Returns if battery and connection indication is enabled
    pub fn has_status(&self) -> bool {
        self.status.is_some()
    }

    /// Last sampled battery voltage
    pub fn battery_voltage(&self) -> Option<f32> {
        self.status.as_ref().and_then(|status| status.battery.last_voltage())
    }
}

//! Tick scheduling and timing utilities.
//!
//! Provides portable tick pacing for the keypad loop. [`TickScheduler::tick`]
//! does not sleep, the caller waits for the returned duration. [`TickScheduler::run`]
//! wraps this into an async loop that ends when a [`StopSignal`] is raised.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_time::{Duration, Instant, Timer};

use crate::controller::Controller;
use crate::output::KeyboardTransport;
use crate::status::{BatterySensor, NoBattery, StatusIndicator};
use crate::{EdgeSource, IndicatorSurface};

/// Result of a tick.
///
/// `sleep_duration` is never shorter than the minimum poll interval, so a
/// caller honoring it never polls the keypad too early.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick.
    pub sleep_duration: Duration,
    /// Number of edges processed during this tick.
    pub edges: usize,
}

/// Flag ending [`TickScheduler::run`]
///
/// Safe to raise from another task or an interrupt handler.
pub struct StopSignal {
    stopped: Mutex<Cell<bool>>,
}

impl StopSignal {
    pub const fn new() -> Self {
        Self {
            stopped: Mutex::new(Cell::new(false)),
        }
    }

    /// Request the loop to stop after the current tick
    pub fn stop(&self) {
        critical_section::with(|cs| self.stopped.borrow(cs).set(true));
    }

    pub fn is_stopped(&self) -> bool {
        critical_section::with(|cs| self.stopped.borrow(cs).get())
    }

    /// Clear the flag so the loop can be started again
    pub fn reset(&self) {
        critical_section::with(|cs| self.stopped.borrow(cs).set(false));
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Portable tick scheduler that owns the keypad hardware adapters.
///
/// This scheduler:
/// - Tracks tick timing with drift correction
/// - Drains key edges, renders pads and pushes them to the indicators
/// - Samples the battery when status indication is enabled
///
/// # Usage
///
/// ```ignore
/// let controller = Controller::new(&OBS_PADS, keyboard, &ControllerConfig::DEFAULT);
/// let mut scheduler = TickScheduler::new(controller, keypad, pixels);
/// scheduler.begin();
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     sleep(result.sleep_duration);
/// }
/// ```
pub struct TickScheduler<I, S, K, B, L, const N: usize>
where
    I: EdgeSource,
    S: IndicatorSurface,
    K: KeyboardTransport,
    B: BatterySensor,
    L: StatusIndicator,
{
    input: I,
    surface: S,
    controller: Controller<K, N>,
    battery: Option<(B, L)>,
    next_tick: Instant,
    interval: Duration,
    min_poll: Duration,
}

impl<I, S, K, const N: usize> TickScheduler<I, S, K, NoBattery, NoBattery, N>
where
    I: EdgeSource,
    S: IndicatorSurface,
    K: KeyboardTransport,
{
    /// Create a scheduler without battery indication.
    pub fn new(controller: Controller<K, N>, input: I, surface: S) -> Self {
        Self {
            input,
            surface,
            interval: controller.tick_interval(),
            min_poll: controller.min_poll_interval(),
            controller,
            battery: None,
            next_tick: Instant::from_millis(0),
        }
    }

    /// Attach a battery sensor and the status indicator that shows it.
    pub fn with_battery<B, L>(self, sensor: B, indicator: L) -> TickScheduler<I, S, K, B, L, N>
    where
        B: BatterySensor,
        L: StatusIndicator,
    {
        TickScheduler {
            input: self.input,
            surface: self.surface,
            controller: self.controller,
            battery: Some((sensor, indicator)),
            next_tick: self.next_tick,
            interval: self.interval,
            min_poll: self.min_poll,
        }
    }
}

impl<I, S, K, B, L, const N: usize> TickScheduler<I, S, K, B, L, N>
where
    I: EdgeSource,
    S: IndicatorSurface,
    K: KeyboardTransport,
    B: BatterySensor,
    L: StatusIndicator,
{
    /// Use a custom tick interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Enable edge reporting and show the boot color.
    pub fn begin(&mut self) {
        let frame = self.controller.begin(&mut self.input);
        self.surface.write(frame);
        self.surface.show();
    }

    /// Process one tick and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Drains edges and renders the pads
    /// 3. Writes to the indicator surface and updates the battery indicator
    /// 4. Returns the deadline for the next tick, at least the minimum poll
    ///    interval away so catching up never polls the keypad too early
    pub fn tick(&mut self, now: Instant) -> TickResult {
        // Skip the backlog after long stalls instead of bursting
        let max_drift = self.interval * 2;
        if now > self.next_tick + max_drift {
            self.next_tick = now;
        }

        let edges = self.controller.process_edges(&mut self.input);
        let frame = self.controller.render();
        self.surface.write(frame);
        self.surface.show();

        if let Some((sensor, indicator)) = self.battery.as_mut() {
            self.controller.update_battery(now, sensor, indicator);
        }

        self.next_tick += self.interval;

        let until_deadline = if self.next_tick > now {
            self.next_tick - now
        } else {
            Duration::from_millis(0)
        };
        let sleep_duration = until_deadline.max(self.min_poll);
        self.next_tick = now + sleep_duration;

        TickResult {
            next_deadline: self.next_tick,
            sleep_duration,
            edges,
        }
    }

    /// Run the tick loop until `stop` is raised.
    pub async fn run(&mut self, stop: &StopSignal) {
        self.begin();
        while !stop.is_stopped() {
            let result = self.tick(Instant::now());
            Timer::after(result.sleep_duration).await;
        }
    }

    pub fn controller(&self) -> &Controller<K, N> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<K, N> {
        &mut self.controller
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn battery(&self) -> Option<&(B, L)> {
        self.battery.as_ref()
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Shortest returned sleep
    pub const fn min_poll(&self) -> Duration {
        self.min_poll
    }
}

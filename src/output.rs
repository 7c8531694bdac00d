//! Output event sink
//!
//! Sends key actions through whatever keyboard transport is live. A transport
//! that is not ready drops the action with a diagnostic, the pad state is
//! never rolled back.

use core::fmt;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::OutputConfig;
use crate::keycode::Keycode;
use crate::state_machine::{KeyAction, KeyActionKind};

/// Keyboard transport (USB or BLE HID)
pub trait KeyboardTransport {
    /// Press all codes together
    fn press(&mut self, codes: &[Keycode]);

    /// Release all codes together
    fn release(&mut self, codes: &[Keycode]);

    /// Returns if the host is connected and accepts reports
    fn is_ready(&self) -> bool;

    /// Returns if the transport is discoverable
    fn is_advertising(&self) -> bool {
        false
    }

    /// Start advertising to hosts
    fn start_advertising(&mut self) {}

    /// Stop advertising to hosts
    fn stop_advertising(&mut self) {}
}

/// Reason a key action was not delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitError {
    /// Transport is not connected
    NotReady,
    /// Sending is switched off in the config
    Disabled,
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => f.write_str("transport not ready"),
            Self::Disabled => f.write_str("output disabled"),
        }
    }
}

/// Connection state of the keyboard transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Host connected
    Ready,
    /// Waiting for a host and discoverable
    Advertising,
    /// Waiting for a host, not discoverable
    Idle,
}

/// Sink delivering key actions to a [`KeyboardTransport`]
#[derive(Debug)]
pub struct OutputSink<K: KeyboardTransport> {
    transport: K,
    config: OutputConfig,
    sent: u32,
    dropped: u32,
}

impl<K: KeyboardTransport> OutputSink<K> {
    pub const fn new(transport: K, config: OutputConfig) -> Self {
        Self {
            transport,
            config,
            sent: 0,
            dropped: 0,
        }
    }

    /// Send a key action, dropping it if the transport can't take it
    pub fn emit(&mut self, action: &KeyAction) -> Result<(), EmitError> {
        let result = self.try_emit(action);
        match result {
            Ok(()) => self.sent = self.sent.wrapping_add(1),
            Err(_) => self.dropped = self.dropped.wrapping_add(1),
        }
        #[cfg(feature = "esp32-log")]
        match result {
            Ok(()) => println!("[OutputSink] {:?} {} sent", action.kind, action.codes),
            Err(err) => println!("[OutputSink] {:?} {} {}", action.kind, action.codes, err),
        }
        result
    }

    fn try_emit(&mut self, action: &KeyAction) -> Result<(), EmitError> {
        if !self.config.live {
            return Err(EmitError::Disabled);
        }
        if !self.transport.is_ready() {
            return Err(EmitError::NotReady);
        }
        if action.codes.is_empty() {
            return Ok(());
        }
        match action.kind {
            KeyActionKind::Press => self.transport.press(action.codes.as_slice()),
            KeyActionKind::Release => self.transport.release(action.codes.as_slice()),
        }
        Ok(())
    }

    /// Current connection state
    pub fn link_state(&self) -> LinkState {
        if self.transport.is_ready() {
            LinkState::Ready
        } else if self.transport.is_advertising() {
            LinkState::Advertising
        } else {
            LinkState::Idle
        }
    }

    /// Keep advertising in line with the link.
    ///
    /// Starts advertising while no host is connected and nobody can find us,
    /// stops it once a host is connected.
    pub fn maintain_advertising(&mut self) {
        match (self.transport.is_ready(), self.transport.is_advertising()) {
            (false, false) => {
                #[cfg(feature = "esp32-log")]
                println!("[OutputSink] link down, restarting advertising");
                self.transport.start_advertising();
            }
            (true, true) => {
                #[cfg(feature = "esp32-log")]
                println!("[OutputSink] host connected, stopping advertising");
                self.transport.stop_advertising();
            }
            _ => {}
        }
    }

    /// Number of delivered actions
    pub const fn sent(&self) -> u32 {
        self.sent
    }

    /// Number of dropped actions
    pub const fn dropped(&self) -> u32 {
        self.dropped
    }

    pub const fn transport(&self) -> &K {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut K {
        &mut self.transport
    }
}

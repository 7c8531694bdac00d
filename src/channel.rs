//! Interrupt-safe edge queue.
//!
//! The keypad scanner (or its interrupt handler) pushes edges through an
//! [`EdgeSender`], the tick loop drains them through an [`EdgeReceiver`].
//! Storage is a fixed-size `heapless::Deque` guarded by a critical section.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;
use heapless::Deque;

use crate::EdgeSource;
use crate::state_machine::EdgeEvent;

/// Queue was full, the edge is handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError(pub EdgeEvent);

/// Queue was empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Bounded queue of key edges
pub struct EdgeChannel<const SIZE: usize> {
    queue: Mutex<RefCell<Deque<EdgeEvent, SIZE>>>,
    lost: Mutex<Cell<u32>>,
}

impl<const SIZE: usize> EdgeChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
            lost: Mutex::new(Cell::new(0)),
        }
    }

    pub const fn sender(&self) -> EdgeSender<'_, SIZE> {
        EdgeSender { channel: self }
    }

    pub const fn receiver(&self) -> EdgeReceiver<'_, SIZE> {
        EdgeReceiver { channel: self }
    }

    /// Queue an edge, counting it as lost when the queue is full
    pub fn try_send(&self, event: EdgeEvent) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            let pushed = self.queue.borrow(cs).borrow_mut().push_back(event);
            if pushed.is_err() {
                let lost = self.lost.borrow(cs);
                lost.set(lost.get().wrapping_add(1));
            }
            pushed.map_err(TrySendError)
        })
    }

    /// Take the oldest queued edge
    pub fn try_receive(&self) -> Result<EdgeEvent, TryReceiveError> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .pop_front()
                .ok_or(TryReceiveError)
        })
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Edges dropped because the queue was full
    pub fn lost(&self) -> u32 {
        critical_section::with(|cs| self.lost.borrow(cs).get())
    }
}

impl<const SIZE: usize> Default for EdgeChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer side, usually held by the scanner
#[derive(Clone, Copy)]
pub struct EdgeSender<'a, const SIZE: usize> {
    channel: &'a EdgeChannel<SIZE>,
}

impl<const SIZE: usize> EdgeSender<'_, SIZE> {
    pub fn try_send(&self, event: EdgeEvent) -> Result<(), TrySendError> {
        self.channel.try_send(event)
    }
}

/// Consumer side, drained by the controller every tick
#[derive(Clone, Copy)]
pub struct EdgeReceiver<'a, const SIZE: usize> {
    channel: &'a EdgeChannel<SIZE>,
}

impl<const SIZE: usize> EdgeSource for EdgeReceiver<'_, SIZE> {
    fn poll(&mut self) -> Option<EdgeEvent> {
        self.channel.try_receive().ok()
    }
}

//! Diagnostic request/response channels.
//!
//! Uses `embassy-sync` bounded MPMC channels.  Each responder owns a
//! dedicated request channel, so routing is structural: a request placed
//! on the fuel channel can only ever be answered by the fuel responder.
//!
//! ```text
//!                 ┌──── ventilation (5) ────▶ Ventilation ───┐
//!  Supervisor ────┤                                          ├──▶ responses (5) ──▶ Supervisor
//!                 └──── fuel (5) ───────────▶ Fuel ──────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, with_timeout};

use super::message::DiagnosticMessage;

/// Slots per channel.
pub const CHANNEL_DEPTH: usize = 5;

/// Bounded FIFO of [`DiagnosticMessage`]s.
///
/// Producers wait for a free slot instead of dropping; consumers either
/// wait indefinitely or up to a caller-supplied deadline.
pub struct Mailbox {
    inner: Channel<CriticalSectionRawMutex, DiagnosticMessage, CHANNEL_DEPTH>,
}

impl Mailbox {
    pub const fn new() -> Self {
        Self {
            inner: Channel::new(),
        }
    }

    /// Enqueue, waiting as long as it takes for a free slot.
    pub async fn send(&self, msg: DiagnosticMessage) {
        self.inner.send(msg).await;
    }

    /// Enqueue, giving up after `deadline`.  `false` means the message was
    /// dropped because no slot freed up in time.
    pub async fn send_within(&self, msg: DiagnosticMessage, deadline: Duration) -> bool {
        with_timeout(deadline, self.inner.send(msg)).await.is_ok()
    }

    /// Enqueue only if a slot is free right now; hands the message back otherwise.
    pub fn try_send(&self, msg: DiagnosticMessage) -> Result<(), DiagnosticMessage> {
        self.inner.try_send(msg).map_err(|e| match e {
            embassy_sync::channel::TrySendError::Full(m) => m,
        })
    }

    /// Dequeue, waiting indefinitely.
    pub async fn receive(&self) -> DiagnosticMessage {
        self.inner.receive().await
    }

    /// Dequeue, giving up after `deadline`.  `None` means timed out.
    pub async fn receive_within(&self, deadline: Duration) -> Option<DiagnosticMessage> {
        with_timeout(deadline, self.inner.receive()).await.ok()
    }

    pub fn try_receive(&self) -> Option<DiagnosticMessage> {
        self.inner.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.inner.is_full()
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}

/// The full channel topology, created once at boot and shared by all tasks.
#[derive(Default)]
pub struct Bus {
    /// Supervisor → ventilation responder.
    pub ventilation: Mailbox,
    /// Supervisor → fuel responder.
    pub fuel: Mailbox,
    /// Both responders → supervisor.
    pub responses: Mailbox,
}

impl Bus {
    pub const fn new() -> Self {
        Self {
            ventilation: Mailbox::new(),
            fuel: Mailbox::new(),
            responses: Mailbox::new(),
        }
    }
}

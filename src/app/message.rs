//! The diagnostic message exchanged on every channel.
//!
//! Messages are small fixed-capacity value records: they are moved into a
//! channel slot by value and never reference shared memory.

use core::fmt;

use heapless::String;

/// Capacity of [`DiagnosticMessage::sender`].
pub const SENDER_CAP: usize = 15;
/// Capacity of [`DiagnosticMessage::content`].
pub const CONTENT_CAP: usize = 50;

/// The three participants of the diagnostic protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsystem {
    Motor,
    Ventilation,
    Fuel,
}

impl Subsystem {
    /// Name used as the `sender` of messages originating from this task.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Motor => "Motor",
            Self::Ventilation => "Ventilation",
            Self::Fuel => "Fuel",
        }
    }

    /// Title shown on the status display for this subsystem's updates.
    pub const fn display_title(self) -> &'static str {
        match self {
            Self::Motor => "Motor Check",
            Self::Ventilation => "Ventilation",
            Self::Fuel => "Fuel Level",
        }
    }
}

/// One request or response on a diagnostic channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub sender: String<SENDER_CAP>,
    pub content: String<CONTENT_CAP>,
    /// `true` = healthy, `false` = fault.
    pub status: bool,
}

impl DiagnosticMessage {
    /// Build a message, truncating `sender` and `content` on a char
    /// boundary if they exceed their capacity.
    pub fn new(sender: &str, content: &str, status: bool) -> Self {
        Self {
            sender: bounded(sender),
            content: bounded(content),
            status,
        }
    }

    /// A healthy message from `from`.
    pub fn ok(from: Subsystem, content: &str) -> Self {
        Self::new(from.name(), content, true)
    }

    /// A fault message from `from`.
    pub fn fault(from: Subsystem, content: &str) -> Self {
        Self::new(from.name(), content, false)
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({})",
            self.sender,
            self.content,
            if self.status { "OK" } else { "FAULT" }
        )
    }
}

fn bounded<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

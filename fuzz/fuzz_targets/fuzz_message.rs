//! Fuzz target: `DiagnosticMessage::new` + `OledStatus::show`
//!
//! Splits the input into a sender and a content string, builds a message
//! and renders it.  Fields must stay within capacity on a char boundary,
//! and rendering must never panic or draw off-panel.
//!
//! cargo fuzz run fuzz_message

#![no_main]

use libfuzzer_sys::fuzz_target;
use motordiag::adapters::oled::{FrameBuffer, OledStatus};
use motordiag::app::message::{CONTENT_CAP, DiagnosticMessage, SENDER_CAP};
use motordiag::app::ports::DisplayPort;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut mid = text.len() / 2;
    while !text.is_char_boundary(mid) {
        mid -= 1;
    }
    let (sender, content) = text.split_at(mid);

    let msg = DiagnosticMessage::new(sender, content, data.first().is_some_and(|b| b & 1 == 1));
    assert!(msg.sender.len() <= SENDER_CAP);
    assert!(msg.content.len() <= CONTENT_CAP);
    assert!(sender.starts_with(msg.sender.as_str()));
    assert!(content.starts_with(msg.content.as_str()));

    let mut oled = OledStatus::new(FrameBuffer::new());
    oled.show(&msg.sender, &msg.content);
    assert_eq!(oled.failed_draws(), 0);
});

//! The shared output sink: text log + status display behind one lock.
//!
//! Any task may write.  Lock acquisition is bounded; when the lock cannot
//! be taken in time the write is dropped, not queued and not retried.
//! Holding the lock for the whole write means two tasks can never
//! interleave text within one line.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, with_timeout};
use log::warn;

use super::ports::{DisplayPort, LinePort};

struct Console {
    log: Box<dyn LinePort + Send>,
    display: Box<dyn DisplayPort + Send>,
}

/// Mutually-exclusive output shared by the three diagnostic tasks.
pub struct OutputSink {
    console: Mutex<CriticalSectionRawMutex, Console>,
    lock_timeout: Duration,
    dropped: AtomicU32,
}

impl OutputSink {
    pub fn new(
        log: impl LinePort + Send + 'static,
        display: impl DisplayPort + Send + 'static,
        lock_timeout: Duration,
    ) -> Self {
        Self {
            console: Mutex::new(Console {
                log: Box::new(log),
                display: Box::new(display),
            }),
            lock_timeout,
            dropped: AtomicU32::new(0),
        }
    }

    /// Append one line to the log.  Returns `false` if the write was dropped.
    pub async fn append_line(&self, text: &str) -> bool {
        match with_timeout(self.lock_timeout, self.console.lock()).await {
            Ok(mut console) => {
                console.log.write_line(text);
                true
            }
            Err(_) => {
                self.record_drop("log", text);
                false
            }
        }
    }

    /// Replace the display content.  Returns `false` if the update was dropped.
    pub async fn show_status(&self, title: &str, body: &str) -> bool {
        match with_timeout(self.lock_timeout, self.console.lock()).await {
            Ok(mut console) => {
                console.display.show(title, body);
                true
            }
            Err(_) => {
                self.record_drop("display", body);
                false
            }
        }
    }

    /// Writes dropped on lock contention since boot.
    pub fn dropped_writes(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn record_drop(&self, target: &str, text: &str) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
        warn!(
            "Output: {} lock busy for {}ms, dropped '{}'",
            target,
            self.lock_timeout.as_millis(),
            text
        );
    }
}

//! ESP-IDF runtime symbols for `critical-section` and `embassy-time`.
//!
//! Both crates link against externally provided functions instead of
//! shipping an ESP-IDF backend.  The critical section is a process-wide
//! re-entrant std mutex; the time driver reads `esp_timer` and wakes
//! timers from one dedicated timer thread with a fixed-size wake table.
//! Host builds get the same symbols from the crates' own `std` features.

use core::cell::{Cell, RefCell};
use core::task::Waker;
use core::time::Duration;
use std::sync::{Condvar, Mutex, MutexGuard, Once, PoisonError};

static CRITICAL_SECTION: Mutex<()> = Mutex::new(());

thread_local! {
    static DEPTH: Cell<u8> = const { Cell::new(0) };
    static GUARD: RefCell<Option<MutexGuard<'static, ()>>> = const { RefCell::new(None) };
}

#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_acquire() -> u8 {
    DEPTH.with(|depth| {
        let d = depth.get();
        if d == 0 {
            // A panicking holder cannot leave `()` inconsistent.
            let lock = CRITICAL_SECTION
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            GUARD.with(|guard| *guard.borrow_mut() = Some(lock));
        }
        let nested = d.saturating_add(1);
        depth.set(nested);
        nested
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_release(_token: u8) {
    DEPTH.with(|depth| {
        let d = depth.get();
        if d == 0 {
            return;
        }
        depth.set(d - 1);
        if d == 1 {
            GUARD.with(|guard| *guard.borrow_mut() = None);
        }
    });
}

#[unsafe(no_mangle)]
pub extern "C" fn _embassy_time_now() -> u64 {
    // SAFETY: esp_timer is started by the IDF before app_main.
    unsafe { esp_idf_svc::sys::esp_timer_get_time() as u64 }
}

/// Pending wakes; steady state is one per waiting task.
const WAKE_SLOTS: usize = 16;
const TIMER_STACK_BYTES: usize = 4096;

struct WakeTable {
    pending: Mutex<heapless::Vec<(u64, Waker), WAKE_SLOTS>>,
    changed: Condvar,
}

static WAKES: WakeTable = WakeTable {
    pending: Mutex::new(heapless::Vec::new()),
    changed: Condvar::new(),
};
static TIMER_THREAD: Once = Once::new();

#[unsafe(no_mangle)]
pub extern "C" fn _embassy_time_schedule_wake(at: u64, waker: *mut core::ffi::c_void) {
    if waker.is_null() {
        return;
    }

    // SAFETY: embassy-time passes a valid `Waker` pointer for the duration
    // of this call; it is cloned before the call returns.
    let waker = unsafe { (*waker.cast::<Waker>()).clone() };

    TIMER_THREAD.call_once(|| {
        let spawned = std::thread::Builder::new()
            .name("timer".into())
            .stack_size(TIMER_STACK_BYTES)
            .spawn(run_timer);
        if let Err(e) = spawned {
            log::error!("platform: timer thread spawn failed: {}", e);
        }
    });

    let mut pending = WAKES.pending.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(slot) = pending.iter_mut().find(|(_, w)| w.will_wake(&waker)) {
        slot.0 = slot.0.min(at);
    } else if let Err((_, waker)) = pending.push((at, waker)) {
        // Table full: wake now.  The timer future re-polls and reschedules.
        drop(pending);
        waker.wake();
        return;
    }
    drop(pending);
    WAKES.changed.notify_one();
}

fn run_timer() {
    let mut pending = WAKES.pending.lock().unwrap_or_else(PoisonError::into_inner);
    loop {
        let now = _embassy_time_now();
        let mut i = 0;
        while i < pending.len() {
            if pending[i].0 <= now {
                // Executor wakers only signal; they never re-enter this table.
                pending.swap_remove(i).1.wake();
            } else {
                i += 1;
            }
        }

        pending = match pending.iter().map(|(at, _)| *at).min() {
            Some(next) => WAKES
                .changed
                .wait_timeout(pending, Duration::from_micros(next - now))
                .map_or_else(|e| e.into_inner().0, |(guard, _)| guard),
            None => WAKES
                .changed
                .wait(pending)
                .unwrap_or_else(PoisonError::into_inner),
        };
    }
}

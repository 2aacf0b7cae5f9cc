//! Core-pinned thread spawning for the diagnostic tasks.
//!
//! On ESP-IDF, `std::thread` is a thin wrapper over pthreads, which are
//! FreeRTOS tasks underneath.  `esp_pthread_set_cfg()` sets thread-local
//! configuration that applies to the *next* `pthread_create()` from the
//! calling thread, so the config→spawn pair must not be interleaved with
//! other thread creation on the same thread.  On other targets this is a
//! plain named thread spawn.

use crate::error::{Error, Result};

/// CPU core identifiers for the ESP32 dual-core.  Core 0 (PRO_CPU) runs
/// the IDF system tasks; diagnostic tasks only go on the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Core {
    /// Core 1 (APP_CPU).
    App = 1,
}

/// Spawn a task thread pinned to `core` with explicit priority and stack.
///
/// `name` must be null-terminated (e.g. `"motor\0"`); the terminator is
/// stripped for the Rust thread name.
#[cfg(target_os = "espidf")]
pub fn spawn_on_core(
    core: Core,
    priority: u8,
    stack_kb: usize,
    name: &'static str,
    f: impl FnOnce() + Send + 'static,
) -> Result<std::thread::JoinHandle<()>> {
    let display_name = name.trim_end_matches('\0');

    // SAFETY: the config is consumed by the very next spawn below.
    let ret = unsafe {
        let mut cfg = esp_idf_sys::esp_create_default_pthread_config();
        cfg.pin_to_core = core as i32;
        cfg.prio = i32::from(priority);
        cfg.stack_size = (stack_kb * 1024) as i32;
        cfg.thread_name = name.as_ptr().cast();
        esp_idf_sys::esp_pthread_set_cfg(&cfg)
    };
    if ret != esp_idf_sys::ESP_OK as i32 {
        log::error!("esp_pthread_set_cfg failed for '{}': {}", display_name, ret);
        return Err(Error::Spawn(display_name));
    }

    log::info!(
        "Spawning '{}' on {:?} (pri={}, stack={}KB)",
        display_name,
        core,
        priority,
        stack_kb
    );

    std::thread::Builder::new()
        .name(display_name.into())
        .spawn(f)
        .map_err(|_| Error::Spawn(display_name))
}

/// Simulation fallback: ignores core affinity and priority.
#[cfg(not(target_os = "espidf"))]
pub fn spawn_on_core(
    _core: Core,
    _priority: u8,
    stack_kb: usize,
    name: &'static str,
    f: impl FnOnce() + Send + 'static,
) -> Result<std::thread::JoinHandle<()>> {
    let display_name = name.trim_end_matches('\0');
    log::info!(
        "Spawning '{}' (sim, no core pinning, stack={}KB)",
        display_name,
        stack_kb
    );

    std::thread::Builder::new()
        .name(display_name.into())
        .stack_size(stack_kb * 1024)
        .spawn(f)
        .map_err(|_| Error::Spawn(display_name))
}

//! Named, core-pinned threads for the three control loops.
//!
//! On ESP-IDF a `std::thread` is a pthread over a FreeRTOS task.  The
//! pthread config (core, priority, stack, name) is thread-local and only
//! applies to the next spawn from the calling thread, so every loop is
//! started from `main` one after another.  Host builds spawn plain
//! threads and ignore core and priority.

use std::io;
use std::thread::JoinHandle;

/// Priority shared by the button, LED and lighting loops.
pub const LOOP_PRIORITY: u8 = 5;

/// Stack for each control loop.
pub const LOOP_STACK_KB: usize = 4;

/// CPU core identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Core {
    /// Core 0 (PRO_CPU): WiFi and lwIP.
    Pro = 0,
    /// Core 1 (APP_CPU): control loops.
    App = 1,
}

/// Spawn a thread pinned to `core` with explicit priority and stack.
///
/// `name` must be null-terminated (e.g. `"button\0"`).
#[cfg(target_os = "espidf")]
pub fn spawn_on_core(
    core: Core,
    priority: u8,
    stack_kb: usize,
    name: &'static str,
    f: impl FnOnce() + Send + 'static,
) -> io::Result<JoinHandle<()>> {
    // SAFETY: cfg lives on the stack for the duration of the call and
    // `name` is a 'static null-terminated string.
    let ret = unsafe {
        let mut cfg = esp_idf_svc::sys::esp_create_default_pthread_config();
        cfg.pin_to_core = core as i32;
        cfg.prio = i32::from(priority);
        cfg.stack_size = (stack_kb * 1024) as i32;
        cfg.thread_name = name.as_ptr().cast();
        esp_idf_svc::sys::esp_pthread_set_cfg(&cfg)
    };
    if ret != esp_idf_svc::sys::ESP_OK as i32 {
        return Err(io::Error::other(format!("esp_pthread_set_cfg failed: {ret}")));
    }

    let display_name = name.trim_end_matches('\0');
    log::info!("loop {display_name}: core {core:?}, prio {priority}, {stack_kb} KB stack");

    std::thread::Builder::new()
        .name(display_name.into())
        .spawn(f)
}

/// Host build: a plain named thread.
#[cfg(not(target_os = "espidf"))]
pub fn spawn_on_core(
    _core: Core,
    _priority: u8,
    stack_kb: usize,
    name: &'static str,
    f: impl FnOnce() + Send + 'static,
) -> io::Result<JoinHandle<()>> {
    let display_name = name.trim_end_matches('\0');
    log::debug!("loop {display_name}: host thread, {stack_kb} KB stack");

    std::thread::Builder::new()
        .name(display_name.into())
        .stack_size(stack_kb * 1024)
        .spawn(f)
}

/// Spawn a control loop with the shared loop priority and stack.
pub fn spawn_loop(
    name: &'static str,
    f: impl FnOnce() + Send + 'static,
) -> io::Result<JoinHandle<()>> {
    spawn_on_core(Core::App, LOOP_PRIORITY, LOOP_STACK_KB, name, f)
}

//! Integration tests: heartbeats → Watchdog supervisor → restart.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use glowline::adapters::time::MonotonicClock;
use glowline::drivers::watchdog::{TaskWatchdog, Watchdog};
use glowline::error::Error;

use crate::mock_hw::{MockSystem, SystemCall};

#[test]
fn stalled_loop_restarts_device() {
    let clock = MonotonicClock::new();
    let mut wd = Watchdog::new(Duration::from_millis(200), clock);
    let alive = wd.register("lighting");
    let _stuck = wd.register("button");

    let stop = Arc::new(AtomicBool::new(false));
    let beating = {
        let stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                alive.beat();
                std::thread::sleep(Duration::from_millis(5));
            }
        })
    };

    let mut system = MockSystem::default();
    let twdt = TaskWatchdog::subscribe(Duration::from_secs(10));
    let stall = wd.supervise(&mut system, &twdt);

    stop.store(true, Ordering::Relaxed);
    beating.join().unwrap();

    assert_eq!(stall, Error::Stalled("button"));
    assert_eq!(*system.calls.lock().unwrap(), [SystemCall::Restart]);
}

#[test]
fn healthy_loops_are_not_flagged() {
    let clock = MonotonicClock::new();
    let mut wd = Watchdog::new(Duration::from_millis(50), clock);
    let hbs = [wd.register("button"), wd.register("led"), wd.register("lighting")];
    for _ in 0..10 {
        std::thread::sleep(Duration::from_millis(10));
        for hb in &hbs {
            hb.beat();
        }
        assert_eq!(wd.check(clock.uptime_ms()), Ok(()));
    }
}

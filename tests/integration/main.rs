//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a subsystem against mock
//! peripherals.  All tests run on the host with no real hardware required.

mod button_flow_tests;
mod led_tests;
mod lighting_tests;
mod mock_hw;
mod watchdog_tests;

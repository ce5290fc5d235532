//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter    | Implements                 | Connects to              |
//! |------------|----------------------------|--------------------------|
//! | `hardware` | SetDutyCycle (light)       | ESP32 LEDC               |
//! |            | OutputPin (status LED)     | ESP32 GPIO               |
//! |            | EntropySource              | ESP32 hardware RNG       |
//! |            | SystemPort                 | NVS erase, esp_restart   |
//! | `log_sink` | StatePublisher             | Serial log output        |
//! | `time`     | MonotonicClock             | ESP32 high-res timer     |

pub mod hardware;
pub mod log_sink;
pub mod time;

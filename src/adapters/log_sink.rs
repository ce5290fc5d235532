//! Log-based state publisher adapter.
//!
//! Implements [`StatePublisher`] by writing the lighting state word to the
//! ESP-IDF logger (UART / USB-CDC in production).  The MQTT adapter
//! implements the same trait outside this crate.

use log::info;

use crate::app::ports::StatePublisher;

/// Logs every published state word and remembers the last one.
#[derive(Debug, Default)]
pub struct LogPublisher {
    last: Option<&'static str>,
}

impl LogPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&'static str> {
        self.last
    }
}

impl StatePublisher for LogPublisher {
    fn publish_state(&mut self, label: &'static str) {
        info!("STATE | {}", label);
        self.last = Some(label);
    }
}

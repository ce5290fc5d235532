//! Application core: commands, events, ports and the controller.
//!
//! Nothing in here touches hardware.  The three control loops in
//! [`drivers`](crate::drivers) consume [`commands`] and emit [`events`];
//! the [`controller`] turns events back into commands, and every outside
//! dependency (MQTT publish, storage erase, restart) is a trait in
//! [`ports`].

pub mod commands;
pub mod controller;
pub mod events;
pub mod ports;

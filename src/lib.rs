//! lanwatch: router device presence bot
//!
//! A library for polling a Linksys router for connected devices and
//! reporting arrivals and departures to subscribed Telegram users.

pub mod bot;
pub mod config;
pub mod device;
pub mod monitor;
pub mod notify;
pub mod router;
pub mod state;
pub mod telegram;
pub mod time;
pub mod transport;

//! Router API clients.
//!
//! [`JnapClient`] talks to Linksys routers through their local JNAP
//! endpoint and implements [`crate::device::DeviceSource`].

mod jnap;

pub use jnap::{JnapClient, action};

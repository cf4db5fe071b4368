//! HTTP transport shared by the router and Telegram clients.
//!
//! This module provides:
//! - Request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - The client abstraction used for dependency injection ([`HttpClient`])
//! - The production client ([`ReqwestClient`])

mod client;
mod error;
mod request;

pub use client::ReqwestClient;
pub use error::HttpError;
pub use request::{HttpClient, HttpRequest, HttpResponse};

#[cfg(test)]
pub mod mock;

//! Browser bindings and small helpers.
//!
//! Provides:
//! - [`FetchTransport`] - Fetch API transport with timeout
//! - [`TimerSleep`] - `setTimeout`-based delays
//! - [`endpoint_url`] - Endpoint URL building with query escaping
//! - [`log`] - Console logging

pub mod dom;
mod fetch;
pub mod log;
mod timer;
mod url;

pub use fetch::FetchTransport;
pub use timer::TimerSleep;
pub use url::endpoint_url;

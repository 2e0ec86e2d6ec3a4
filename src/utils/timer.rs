//! Browser timers.

use gloo_timers::future::TimeoutFuture;

use crate::core::reconnect::Sleep;

/// [`Sleep`] backed by `setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimerSleep;

impl Sleep for TimerSleep {
    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}

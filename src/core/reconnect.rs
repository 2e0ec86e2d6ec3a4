//! Polling state machine used to recover after a device reset.
//!
//! ```text
//! Idle --start--> Polling(1, max) --probe ok--> Done(Reconnected)
//!                   |  ^
//!        probe fail |  | attempt < max
//!                   v  |
//!              Polling(n+1, max) --probe fail at n == max--> Done(GaveUp)
//! ```
//!
//! Callers must not start a second loop while one is polling.

use crate::config::ReconnectPolicy;
use crate::core::session::RemoteFileSession;
use crate::core::transport::Transport;
use crate::utils::log;

/// Asynchronous delay.
#[allow(async_fn_in_trait)]
pub trait Sleep {
    async fn sleep(&self, ms: u32);
}

/// How a reconnect loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconnectOutcome {
    Reconnected,
    GaveUp,
}

/// State of a reconnect loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconnectState {
    Idle,
    /// Probe number `attempt` of `max` is due or in flight
    Polling { attempt: u32, max: u32 },
    Done(ReconnectOutcome),
}

/// Bounded probing of the device after a reset.
#[derive(Clone, Debug)]
pub struct ReconnectSession {
    policy: ReconnectPolicy,
    state: ReconnectState,
}

impl ReconnectSession {
    pub fn new(policy: ReconnectPolicy) -> Self {
        Self {
            policy,
            state: ReconnectState::Idle,
        }
    }

    pub fn state(&self) -> ReconnectState {
        self.state
    }

    /// `Idle -> Polling(1, max)`. No effect in any other state.
    pub fn start(&mut self) -> ReconnectState {
        if self.state == ReconnectState::Idle {
            self.state = if self.policy.max_attempts == 0 {
                ReconnectState::Done(ReconnectOutcome::GaveUp)
            } else {
                ReconnectState::Polling {
                    attempt: 1,
                    max: self.policy.max_attempts,
                }
            };
        }
        self.state
    }

    /// Apply the result of the current probe.
    pub fn record_probe(&mut self, reachable: bool) -> ReconnectState {
        let ReconnectState::Polling { attempt, max } = self.state else {
            return self.state;
        };
        self.state = if reachable {
            ReconnectState::Done(ReconnectOutcome::Reconnected)
        } else if attempt < max {
            ReconnectState::Polling {
                attempt: attempt + 1,
                max,
            }
        } else {
            ReconnectState::Done(ReconnectOutcome::GaveUp)
        };
        self.state
    }

    /// Drive the loop to completion: wait the initial delay, then start
    /// polling and probe on the fixed interval until the device answers or
    /// attempts run out.
    pub async fn run<T, S>(&mut self, session: &RemoteFileSession<T>, sleeper: &S) -> ReconnectOutcome
    where
        T: Transport,
        S: Sleep,
    {
        sleeper.sleep(self.policy.initial_delay_ms).await;
        if let ReconnectState::Done(outcome) = self.start() {
            return outcome;
        }

        loop {
            let ReconnectState::Polling { attempt, .. } = self.state else {
                break;
            };
            let reachable = session.probe().await.is_ok();
            if !reachable {
                log::debug(&format!("Reconnect attempt {} failed", attempt));
            }
            if let ReconnectState::Done(outcome) = self.record_probe(reachable) {
                log::debug(&format!("Reconnect finished: {:?}", outcome));
                return outcome;
            }
            sleeper.sleep(self.policy.interval_ms).await;
        }

        match self.state {
            ReconnectState::Done(outcome) => outcome,
            _ => ReconnectOutcome::GaveUp,
        }
    }
}

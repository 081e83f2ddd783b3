//! Timer scheduling abstraction.
//!
//! The state machine emits `Action::SetTimer`. Exactly one timer is armed at
//! any time: arming a timer replaces whatever was armed before. This trait
//! abstracts the runtime side:
//! - Production: a single `tokio::time::Sleep` slot in the event loop
//! - Simulation: a single entry in the deterministic event queue

use std::fmt;
use std::time::Duration;

/// Which phase of the discovery cycle a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// Short delay after start before the first request.
    Startup,
    /// Hold period in idle before (re)issuing a request.
    IdleHold,
    /// Window for collecting responses after a request went out.
    ResponseWindow,
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerId::Startup => write!(f, "startup"),
            TimerId::IdleHold => write!(f, "idle-hold"),
            TimerId::ResponseWindow => write!(f, "response-window"),
        }
    }
}

/// Abstraction for arming the single timer slot.
pub trait TimerScheduler {
    /// Arm `id` to fire after `duration`, replacing any armed timer.
    fn set_timer(&mut self, id: TimerId, duration: Duration);
}

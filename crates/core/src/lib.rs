//! Core types for meshscout discovery.
//!
//! This crate provides the foundational types for the discovery architecture:
//!
//! - [`HostInput`]: Everything the host delivers (timer expiry, APS callbacks)
//! - [`Event`]: Filtered, decoded events processed by the state machine
//! - [`Action`]: Outputs the runner must carry out
//! - [`StateMachine`]: The trait the discovery state machine implements
//! - [`NetworkBoundary`]: The injected outbound half of the APS layer
//!
//! # Architecture
//!
//! ```text
//! HostInput → plugin (filter + decode) → Event → StateMachine::handle() → Actions
//!                                                      │
//!                                                      └─ NetworkBoundary::submit()
//! ```
//!
//! The state machine is:
//! - **Synchronous**: No async, no .await
//! - **Deterministic**: Same state + event + boundary answers = same actions
//! - **Single owner**: Processes one event at a time, no locking
//!
//! The runner (simulation or production) delivers inputs serially, keeps a
//! single timer slot and forwards match reports to whoever is interested.

mod action;
mod aps;
mod boundary;
mod event;
mod timer;
mod traits;

pub use action::{Action, MatchReport};
pub use aps::{ApsDataConfirm, ApsDataIndication, ApsDataRequest};
pub use boundary::{NetworkBoundary, SubmitError};
pub use event::{Event, EventPriority, HostInput};
pub use timer::{TimerId, TimerScheduler};
pub use traits::StateMachine;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

//! Core traits for state machines.

use crate::{Action, Event};
use std::time::Duration;

/// A state machine that processes events.
///
/// Implementations are:
///
/// - **Synchronous**: No async, no `.await`
/// - **Deterministic**: Same state + event = same actions
/// - **Pure-ish**: Mutates self; the only outbound call is the non-blocking
///   submit on the injected network boundary
///
/// # Example
///
/// ```ignore
/// impl StateMachine for DiscoveryState<B> {
///     fn handle(&mut self, event: Event) -> Vec<Action> {
///         match event {
///             Event::Timeout { timer } => self.on_timeout(timer),
///             Event::DeliveryConfirmed { confirm } => self.on_confirm(confirm),
///             Event::MatchDescriptorResponse { source, response } => {
///                 self.on_match_response(source, response)
///             }
///         }
///     }
///     // ...
/// }
/// ```
pub trait StateMachine {
    /// Process an event, returning actions to perform.
    ///
    /// # Guarantees
    ///
    /// - **Synchronous**: This method never blocks or awaits
    /// - **Serial**: The runner never calls it re-entrantly
    ///
    /// # Returns
    ///
    /// A list of actions for the runner to execute:
    /// - Arming the timer
    /// - Emitting match reports to the host
    fn handle(&mut self, event: Event) -> Vec<Action>;

    /// Set the current time.
    ///
    /// Called by the runner before each `handle()` call to provide the
    /// current simulation or wall-clock time.
    fn set_time(&mut self, now: Duration);

    /// Get the time that was last set via `set_time()`.
    fn now(&self) -> Duration;
}

//! Deterministic simulation runner.

use crate::event_queue::EventKey;
use crate::network::SimulatedNetwork;
use meshscout_core::{Action, HostInput, MatchReport, TimerId, TimerScheduler};
use meshscout_discovery::{DiscoveryConfig, DiscoveryPhase};
use meshscout_node::{DiscoveryPlugin, PluginStats};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, trace};

/// Deterministic simulation runner.
///
/// Processes host inputs in deterministic order and executes actions.
/// Given the same seed, produces identical results every run.
pub struct SimulationRunner {
    /// The plugin under test. Owns the simulated network as its boundary.
    plugin: DiscoveryPlugin<SimulatedNetwork>,

    /// Global input queue, ordered deterministically.
    event_queue: BTreeMap<EventKey, HostInput>,

    /// Sequence counter for deterministic ordering.
    sequence: u64,

    /// Current simulation time.
    now: Duration,

    /// RNG for network conditions (seeded for determinism).
    rng: ChaCha8Rng,

    /// Key of the armed timer, if any. Arming a new timer removes it.
    timer: Option<EventKey>,

    /// Every match the plugin reported, in order.
    reports: Vec<MatchReport>,

    /// Statistics.
    stats: SimulationStats,
}

/// Statistics collected during simulation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimulationStats {
    /// Total host inputs processed.
    pub events_processed: u64,
    /// Frames the plugin handed to the network.
    pub requests_submitted: u64,
    /// Delivery confirmations scheduled.
    pub confirmations_delivered: u64,
    /// Indications scheduled.
    pub responses_delivered: u64,
    /// Match reports emitted by the plugin.
    pub matches_reported: u64,
    /// Timers set.
    pub timers_set: u64,
    /// Armed timers replaced before they fired.
    pub timers_replaced: u64,
}

impl SimulationRunner {
    /// Create a new runner. The seed drives both the transaction sequence
    /// numbers and the network conditions.
    pub fn new(config: DiscoveryConfig, network: SimulatedNetwork, seed: u64) -> Self {
        info!(seed, "Creating simulation runner");
        Self {
            plugin: DiscoveryPlugin::new(config, network, seed),
            event_queue: BTreeMap::new(),
            sequence: 0,
            now: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(seed.rotate_left(32)),
            timer: None,
            reports: Vec::new(),
            stats: SimulationStats::default(),
        }
    }

    /// Start the plugin at the current time.
    pub fn start(&mut self) {
        self.plugin.set_time(self.now);
        let actions = self.plugin.start();
        self.process_actions(actions);
    }

    /// Get the current simulation time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Get simulation statistics.
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Every match reported so far.
    pub fn reports(&self) -> &[MatchReport] {
        &self.reports
    }

    /// Get the plugin.
    pub fn plugin(&self) -> &DiscoveryPlugin<SimulatedNetwork> {
        &self.plugin
    }

    /// Get the plugin's drop/forward counters.
    pub fn plugin_stats(&self) -> PluginStats {
        self.plugin.stats()
    }

    /// Current phase of the discovery cycle.
    pub fn phase(&self) -> DiscoveryPhase {
        self.plugin.state().phase()
    }

    /// Get the simulated network.
    pub fn network(&self) -> &SimulatedNetwork {
        self.plugin.state().boundary()
    }

    /// Get the simulated network mutably.
    pub fn network_mut(&mut self) -> &mut SimulatedNetwork {
        self.plugin.state_mut().boundary_mut()
    }

    /// Schedule an input `delay` after the current time.
    pub fn schedule_input(&mut self, delay: Duration, input: HostInput) -> EventKey {
        self.schedule(self.now + delay, input)
    }

    /// Run the simulation until the specified time.
    ///
    /// Processes all inputs scheduled at or before `end_time`.
    pub fn run_until(&mut self, end_time: Duration) {
        trace!(
            end_time_secs = end_time.as_secs_f64(),
            "Running simulation step"
        );

        loop {
            match self.event_queue.first_key_value() {
                Some((key, _)) if key.time <= end_time => {}
                _ => break,
            }
            let Some((key, input)) = self.event_queue.pop_first() else {
                break;
            };
            self.now = key.time;
            if self.timer == Some(key) {
                self.timer = None;
            }

            trace!(time = ?self.now, input = input.type_name(), "Processing input");
            self.stats.events_processed += 1;

            self.plugin.set_time(self.now);
            let actions = self.plugin.handle_input(input);
            self.process_actions(actions);
        }

        if self.now < end_time {
            self.now = end_time;
        }

        debug!(
            events_processed = self.stats.events_processed,
            reports = self.reports.len(),
            final_time = ?self.now,
            "Simulation step complete"
        );
    }

    /// Execute actions, then hand whatever the plugin submitted to the network.
    fn process_actions(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::SetTimer { id, duration } => self.set_timer(id, duration),
                Action::EmitMatch(report) => {
                    self.stats.matches_reported += 1;
                    self.reports.push(report);
                }
            }
        }
        self.deliver_outbox();
    }

    fn deliver_outbox(&mut self) {
        let network = self.plugin.state_mut().boundary_mut();
        self.stats.requests_submitted += network.outbox_len() as u64;
        let deliveries = network.deliver_outbox(&mut self.rng);

        for delivery in deliveries {
            match delivery.input {
                HostInput::DeliveryConfirm(_) => self.stats.confirmations_delivered += 1,
                HostInput::Indication(_) => self.stats.responses_delivered += 1,
                HostInput::TimerFired(_) => {}
            }
            self.schedule(self.now + delivery.latency, delivery.input);
        }
    }

    fn schedule(&mut self, time: Duration, input: HostInput) -> EventKey {
        self.sequence += 1;
        let key = EventKey::new(time, &input, self.sequence);
        self.event_queue.insert(key, input);
        key
    }
}

impl TimerScheduler for SimulationRunner {
    fn set_timer(&mut self, id: TimerId, duration: Duration) {
        if let Some(old) = self.timer.take() {
            if self.event_queue.remove(&old).is_some() {
                self.stats.timers_replaced += 1;
            }
        }
        let key = self.schedule(self.now + duration, HostInput::TimerFired(id));
        self.timer = Some(key);
        self.stats.timers_set += 1;
        trace!(%id, ?duration, "Timer armed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NetworkConfig, SimulatedDevice};

    #[test]
    fn test_start_arms_startup_timer() {
        let network = SimulatedNetwork::new(NetworkConfig::default());
        let mut runner = SimulationRunner::new(DiscoveryConfig::default(), network, 1);
        runner.start();
        assert_eq!(runner.stats().timers_set, 1);

        runner.run_until(Duration::from_millis(999));
        assert_eq!(runner.stats().requests_submitted, 0);

        runner.run_until(Duration::from_millis(1000));
        assert_eq!(runner.stats().requests_submitted, 1);
        assert_eq!(runner.phase(), DiscoveryPhase::WaitingForResponse);
    }

    #[test]
    fn test_match_replaces_response_window() {
        let network = SimulatedNetwork::new(NetworkConfig::default())
            .with_device(SimulatedDevice::new(0x1234, &[0x01]));
        let mut runner = SimulationRunner::new(DiscoveryConfig::default(), network, 1);
        runner.start();
        runner.run_until(Duration::from_secs(2));

        assert_eq!(runner.reports().len(), 1);
        assert_eq!(runner.phase(), DiscoveryPhase::Idle);
        // Startup, response window, then idle hold replacing the window.
        assert_eq!(runner.stats().timers_set, 3);
        assert_eq!(runner.stats().timers_replaced, 1);
    }

    #[test]
    fn test_now_advances_without_events() {
        let network = SimulatedNetwork::new(NetworkConfig::default());
        let mut runner = SimulationRunner::new(DiscoveryConfig::default(), network, 1);
        runner.run_until(Duration::from_secs(5));
        assert_eq!(runner.now(), Duration::from_secs(5));
        assert_eq!(runner.stats().events_processed, 0);
    }
}

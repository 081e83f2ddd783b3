//! Discovery plugin: the host's view of the state machine.

use crate::filter::{filter_indication, IndicationVerdict};
use meshscout_core::{
    Action, ApsDataConfirm, ApsDataIndication, Event, HostInput, NetworkBoundary, StateMachine,
    TimerId,
};
use meshscout_discovery::{DiscoveryConfig, DiscoveryState};
use std::time::Duration;
use tracing::{debug, trace};

/// Static identifier reported to the host.
pub const PLUGIN_NAME: &str = "Match Descriptor Discovery Plugin";

/// Optional features a host may ask a plugin about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Provides a GUI widget.
    Widget,
    /// Handles HTTP client requests.
    HttpClientHandler,
}

/// Counters for inputs dropped before reaching the state machine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PluginStats {
    /// Indications for other profiles or commands.
    pub indications_ignored: u64,
    /// Match_Descr_rsp frames that could not be decoded.
    pub decode_errors: u64,
    /// Events forwarded to the state machine.
    pub events_forwarded: u64,
}

/// Host-facing discovery plugin.
///
/// Receives every host input serially, filters and decodes indications,
/// and drives the [`DiscoveryState`].
pub struct DiscoveryPlugin<B> {
    state: DiscoveryState<B>,
    stats: PluginStats,
}

impl<B: NetworkBoundary> DiscoveryPlugin<B> {
    /// Create a new plugin around the given network boundary.
    pub fn new(config: DiscoveryConfig, boundary: B, seed: u64) -> Self {
        Self {
            state: DiscoveryState::new(config, boundary, seed),
            stats: PluginStats::default(),
        }
    }

    /// Static plugin name.
    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    /// Capability negotiation. This plugin offers none.
    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Widget | Capability::HttpClientHandler => false,
        }
    }

    /// Arm the start-up timer.
    pub fn start(&mut self) -> Vec<Action> {
        self.state.start()
    }

    /// Set the current time before handling an input.
    pub fn set_time(&mut self, now: Duration) {
        self.state.set_time(now);
    }

    /// Handle one host input.
    pub fn handle_input(&mut self, input: HostInput) -> Vec<Action> {
        match input {
            HostInput::TimerFired(timer) => self.on_timer(timer),
            HostInput::DeliveryConfirm(confirm) => self.on_delivery_confirm(confirm),
            HostInput::Indication(indication) => self.on_indication(&indication),
        }
    }

    /// The armed timer expired.
    pub fn on_timer(&mut self, timer: TimerId) -> Vec<Action> {
        self.forward(Event::Timeout { timer })
    }

    /// `APSDE-DATA.confirm` callback.
    ///
    /// Called for every confirmation on the channel, even for requests this
    /// plugin did not submit; correlation happens in the state machine.
    pub fn on_delivery_confirm(&mut self, confirm: ApsDataConfirm) -> Vec<Action> {
        self.forward(Event::DeliveryConfirmed { confirm })
    }

    /// `APSDE-DATA.indication` callback.
    ///
    /// Called for every inbound frame; anything but a ZDP Match_Descr_rsp
    /// is dropped here.
    pub fn on_indication(&mut self, indication: &ApsDataIndication) -> Vec<Action> {
        match filter_indication(indication) {
            IndicationVerdict::Forward(event) => self.forward(event),
            IndicationVerdict::NotForUs => {
                trace!(
                    profile = %indication.profile,
                    cluster = %indication.cluster,
                    "Ignoring indication"
                );
                self.stats.indications_ignored += 1;
                vec![]
            }
            IndicationVerdict::Malformed(e) => {
                debug!(
                    source = %indication.src_address,
                    error = %e,
                    "Dropping malformed match descriptor response"
                );
                self.stats.decode_errors += 1;
                vec![]
            }
        }
    }

    fn forward(&mut self, event: Event) -> Vec<Action> {
        self.stats.events_forwarded += 1;
        self.state.handle(event)
    }

    /// Get the discovery state machine.
    pub fn state(&self) -> &DiscoveryState<B> {
        &self.state
    }

    /// Get the discovery state machine mutably.
    pub fn state_mut(&mut self) -> &mut DiscoveryState<B> {
        &mut self.state
    }

    /// Get the drop/forward counters.
    pub fn stats(&self) -> PluginStats {
        self.stats
    }
}

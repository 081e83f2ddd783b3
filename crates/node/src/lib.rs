//! Host-facing discovery plugin.
//!
//! This crate wraps the discovery state machine in the interface a host
//! application sees: a static name, capability negotiation, and the raw
//! APS callbacks. Indications are filtered down to ZDP Match_Descr_rsp
//! frames and decoded here, so the state machine only ever sees its own
//! protocol.

mod filter;
mod plugin;

pub use filter::{filter_indication, IndicationVerdict};
pub use plugin::{Capability, DiscoveryPlugin, PluginStats, PLUGIN_NAME};

//! Deterministic simulation runner.
//!
//! This crate drives the discovery plugin against a simulated mesh network.
//! Given the same seed, it produces identical results every run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  SimulationRunner                       │
//! │                                                         │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │  Event Queue (BTreeMap<EventKey, HostInput>)       │ │
//! │  │  Ordered by: time, priority, sequence              │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │  DiscoveryPlugin<SimulatedNetwork>                 │ │
//! │  │  Processes inputs sequentially                     │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │  Actions + submitted frames → schedule new inputs  │ │
//! │  └────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod event_queue;
mod network;
mod runner;

pub use event_queue::EventKey;
pub use network::{Delivery, NetworkConfig, SimulatedDevice, SimulatedNetwork};
pub use runner::{SimulationRunner, SimulationStats};

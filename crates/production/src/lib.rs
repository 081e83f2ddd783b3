//! Production runner for match descriptor discovery.
//!
//! Wraps the synchronous discovery plugin in a tokio event loop:
//!
//! - [`EventLoop`]: serial input processing with a single timer slot
//! - [`HostHandle`]: cloneable entry point for the host's APS callbacks
//! - [`ChannelBoundary`]: hands submitted frames to a network driver task
//! - [`RunnerConfig`]: TOML configuration
//! - [`init_tracing`]: `fmt` subscriber with an `EnvFilter`

mod boundary;
mod config;
mod event_loop;
mod telemetry;

pub use boundary::{ChannelBoundary, JoinState, OutboundFrame};
pub use config::{ConfigError, RunnerConfig};
pub use event_loop::{EventLoop, HostHandle, RunnerError};
pub use telemetry::init_tracing;

//! Async event loop for the production runner.
//!
//! [`EventLoop`] owns the discovery plugin and feeds it one input at a time.
//! Host callbacks arrive through a tokio `mpsc` channel; the single armed
//! timer is a `tokio::time::Sleep` raced against the channel:
//!
//! ```text
//! timer (priority 1) > host inputs (priority 2)
//! ```
//!
//! The loop ends when every [`HostHandle`] is dropped or one of them calls
//! [`HostHandle::shutdown`].

use meshscout_core::{
    Action, ApsDataConfirm, ApsDataIndication, HostInput, MatchReport, NetworkBoundary, TimerId,
    TimerScheduler,
};
use meshscout_node::DiscoveryPlugin;
use std::future::pending;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{sleep, Instant, Sleep};
use tracing::{debug, info, trace};

/// Errors surfaced by the runner.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Event loop has stopped")]
    Stopped,
}

#[derive(Debug)]
enum LoopMessage {
    Input(HostInput),
    Shutdown,
}

/// Cloneable sender the host's network callbacks use.
#[derive(Debug, Clone)]
pub struct HostHandle {
    tx: mpsc::Sender<LoopMessage>,
}

impl HostHandle {
    /// Deliver an `APSDE-DATA.confirm`.
    pub async fn deliver_confirm(&self, confirm: ApsDataConfirm) -> Result<(), RunnerError> {
        self.send(LoopMessage::Input(HostInput::DeliveryConfirm(confirm)))
            .await
    }

    /// Deliver an `APSDE-DATA.indication`.
    pub async fn deliver_indication(
        &self,
        indication: ApsDataIndication,
    ) -> Result<(), RunnerError> {
        self.send(LoopMessage::Input(HostInput::Indication(indication)))
            .await
    }

    /// Ask the loop to stop after the inputs already queued.
    pub async fn shutdown(&self) -> Result<(), RunnerError> {
        self.send(LoopMessage::Shutdown).await
    }

    async fn send(&self, message: LoopMessage) -> Result<(), RunnerError> {
        self.tx.send(message).await.map_err(|_| RunnerError::Stopped)
    }
}

struct ArmedTimer {
    id: TimerId,
    sleep: Pin<Box<Sleep>>,
}

/// Serial event loop around a [`DiscoveryPlugin`].
pub struct EventLoop<B> {
    plugin: DiscoveryPlugin<B>,
    rx: mpsc::Receiver<LoopMessage>,
    timer: Option<ArmedTimer>,
    reports: Option<mpsc::UnboundedSender<MatchReport>>,
    started_at: Instant,
}

impl<B: NetworkBoundary> EventLoop<B> {
    /// Create a loop and the handle feeding it.
    ///
    /// `capacity` bounds the number of queued host inputs.
    pub fn new(plugin: DiscoveryPlugin<B>, capacity: usize) -> (Self, HostHandle) {
        let (tx, rx) = mpsc::channel(capacity);
        let event_loop = Self {
            plugin,
            rx,
            timer: None,
            reports: None,
            started_at: Instant::now(),
        };
        (event_loop, HostHandle { tx })
    }

    /// Forward every match report to `tx`.
    pub fn with_reports(mut self, tx: mpsc::UnboundedSender<MatchReport>) -> Self {
        self.reports = Some(tx);
        self
    }

    fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Start the plugin and process inputs until shutdown.
    ///
    /// Returns the plugin so callers can inspect its final state.
    pub async fn run(mut self) -> DiscoveryPlugin<B> {
        info!(plugin = self.plugin.name(), "Event loop starting");
        self.started_at = Instant::now();
        self.plugin.set_time(Duration::ZERO);
        let actions = self.plugin.start();
        self.process_actions(actions);

        loop {
            let input = tokio::select! {
                biased;

                id = wait_for_timer(&mut self.timer) => {
                    self.timer = None;
                    HostInput::TimerFired(id)
                }

                message = self.rx.recv() => match message {
                    Some(LoopMessage::Input(input)) => input,
                    Some(LoopMessage::Shutdown) => {
                        debug!("Shutdown requested");
                        break;
                    }
                    None => {
                        debug!("All host handles dropped");
                        break;
                    }
                },
            };

            trace!(input = input.type_name(), "Processing input");
            let now = self.elapsed();
            self.plugin.set_time(now);
            let actions = self.plugin.handle_input(input);
            self.process_actions(actions);
        }

        info!("Event loop stopped");
        self.plugin
    }

    fn process_actions(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::SetTimer { id, duration } => self.set_timer(id, duration),
                Action::EmitMatch(report) => self.emit_match(report),
            }
        }
    }

    fn emit_match(&mut self, report: MatchReport) {
        let Some(tx) = &self.reports else {
            return;
        };
        if tx.send(report).is_err() {
            debug!("Match report receiver dropped");
            self.reports = None;
        }
    }
}

impl<B: NetworkBoundary> TimerScheduler for EventLoop<B> {
    fn set_timer(&mut self, id: TimerId, duration: Duration) {
        trace!(%id, ?duration, "Timer armed");
        self.timer = Some(ArmedTimer {
            id,
            sleep: Box::pin(sleep(duration)),
        });
    }
}

/// Resolve when the armed timer fires; never resolves with no timer armed.
async fn wait_for_timer(timer: &mut Option<ArmedTimer>) -> TimerId {
    match timer {
        Some(armed) => {
            armed.sleep.as_mut().await;
            armed.id
        }
        None => pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::ChannelBoundary;
    use meshscout_discovery::{DiscoveryConfig, DiscoveryPhase};
    use meshscout_types::{
        ApsAddress, ApsStatus, ClusterId, Endpoint, NwkAddress, ProfileId,
    };

    fn response(seq: u8) -> ApsDataIndication {
        ApsDataIndication {
            src_address: ApsAddress::Nwk(NwkAddress(0x4F21)),
            src_endpoint: Endpoint::ZDO,
            dst_endpoint: Endpoint::ZDO,
            profile: ProfileId::ZDP,
            cluster: ClusterId::MATCH_DESCRIPTOR_RESPONSE,
            asdu: vec![seq, 0x00, 0x21, 0x4F, 0x01, 0x0B],
        }
    }

    fn assert_elapsed(start: Instant, expected: Duration) {
        let elapsed = start.elapsed();
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(5),
            "elapsed {elapsed:?}, expected {expected:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_cycle_over_channels() {
        let (boundary, mut frames, joined) = ChannelBoundary::new(4);
        joined.set(true);
        let plugin = DiscoveryPlugin::new(DiscoveryConfig::default(), boundary, 3);
        let (report_tx, mut reports) = mpsc::unbounded_channel();
        let (event_loop, handle) = EventLoop::new(plugin, 16);
        let task = tokio::spawn(event_loop.with_reports(report_tx).run());

        // Start-up timer fires after one second of paused time.
        let frame = frames.recv().await.unwrap();
        assert_eq!(frame.request.cluster, ClusterId::MATCH_DESCRIPTOR_REQUEST);
        let seq = frame.request.asdu[0];

        handle
            .deliver_confirm(ApsDataConfirm {
                id: frame.id,
                status: ApsStatus::SUCCESS,
            })
            .await
            .unwrap();
        handle.deliver_indication(response(seq)).await.unwrap();

        let report = reports.recv().await.unwrap();
        assert_eq!(report.seq.0, seq);
        assert_eq!(report.endpoints, vec![Endpoint(0x0B)]);
        assert_eq!(report.nwk_addr_of_interest, Some(NwkAddress(0x4F21)));

        // Idle hold, then the next request.
        let next = frames.recv().await.unwrap();
        assert_ne!(next.id, frame.id);

        handle.shutdown().await.unwrap();
        let plugin = task.await.unwrap();
        assert_eq!(plugin.state().phase(), DiscoveryPhase::WaitingForResponse);
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_window_expires_without_answers() {
        let (boundary, mut frames, joined) = ChannelBoundary::new(4);
        joined.set(true);
        let config = DiscoveryConfig::with_timeouts(Duration::from_secs(2), Duration::from_secs(3));
        let plugin = DiscoveryPlugin::new(config, boundary, 5);
        let (event_loop, handle) = EventLoop::new(plugin, 16);
        let task = tokio::spawn(event_loop.run());

        let start = Instant::now();
        frames.recv().await.unwrap();
        assert_elapsed(start, Duration::from_secs(1));

        // Response window (3s) plus idle hold (2s).
        frames.recv().await.unwrap();
        assert_elapsed(start, Duration::from_secs(6));

        drop(handle);
        let plugin = task.await.unwrap();
        assert_eq!(plugin.state().pending_requests(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_joined_retries_after_idle_hold() {
        let (boundary, mut frames, joined) = ChannelBoundary::new(4);
        let plugin = DiscoveryPlugin::new(DiscoveryConfig::default(), boundary, 8);
        let (event_loop, handle) = EventLoop::new(plugin, 16);
        let task = tokio::spawn(event_loop.run());

        // Start-up attempt at 1s is skipped; join before the 11s retry.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(frames.try_recv().is_err());
        joined.set(true);

        let start = Instant::now();
        frames.recv().await.unwrap();
        assert_elapsed(start, Duration::from_secs(6));

        handle.shutdown().await.unwrap();
        task.await.unwrap();
    }
}

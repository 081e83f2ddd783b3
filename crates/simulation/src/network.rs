//! Simulated mesh network with deterministic latency and loss.

use meshscout_core::{
    ApsDataConfirm, ApsDataIndication, ApsDataRequest, HostInput, NetworkBoundary, SubmitError,
};
use meshscout_types::{
    ApsAddress, ApsStatus, ClusterId, DeliveryId, Endpoint, NwkAddress, ProfileId, ZdpStatus,
};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing::trace;

/// Configuration for the simulated network.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// One-way latency between the coordinator and any device.
    pub latency: Duration,
    /// Probability (0.0 - 1.0) that a submitted frame is confirmed with
    /// `NO_ACK` and never reaches the devices.
    pub delivery_failure_rate: f64,
    /// Probability (0.0 - 1.0) that a single device response is lost.
    pub response_loss_rate: f64,
    /// Inject traffic from other consumers of the APS channel alongside
    /// every submission.
    pub foreign_traffic: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(20),
            delivery_failure_rate: 0.0,
            response_loss_rate: 0.0,
            foreign_traffic: false,
        }
    }
}

/// A device that answers Match_Descr_req.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedDevice {
    /// Short address of the device.
    pub address: NwkAddress,
    /// Endpoints offering the requested cluster. Devices without any stay
    /// silent, as broadcast queries only get answers on a match.
    pub endpoints: Vec<Endpoint>,
}

impl SimulatedDevice {
    /// Create a device with the given matching endpoints.
    pub fn new(address: u16, endpoints: &[u8]) -> Self {
        Self {
            address: NwkAddress(address),
            endpoints: endpoints.iter().copied().map(Endpoint).collect(),
        }
    }

    fn match_response(&self, seq: u8) -> ApsDataIndication {
        let mut asdu = vec![seq, ZdpStatus::SUCCESS.0];
        asdu.extend_from_slice(&self.address.0.to_le_bytes());
        asdu.push(self.endpoints.len() as u8);
        asdu.extend(self.endpoints.iter().map(|ep| ep.0));

        ApsDataIndication {
            src_address: ApsAddress::Nwk(self.address),
            src_endpoint: Endpoint::ZDO,
            dst_endpoint: Endpoint::ZDO,
            profile: ProfileId::ZDP,
            cluster: ClusterId::MATCH_DESCRIPTOR_RESPONSE,
            asdu,
        }
    }
}

/// A host input the network will deliver after `latency`.
#[derive(Debug)]
pub struct Delivery {
    /// Delay relative to the moment the outbox was drained.
    pub latency: Duration,
    /// The input to deliver.
    pub input: HostInput,
}

/// Simulated network acting as the plugin's [`NetworkBoundary`].
///
/// Submissions land in an outbox; the runner drains it after every handled
/// input and schedules the resulting confirmations and responses.
#[derive(Debug)]
pub struct SimulatedNetwork {
    config: NetworkConfig,
    joined: bool,
    devices: Vec<SimulatedDevice>,
    next_delivery_id: u8,
    outbox: Vec<(DeliveryId, ApsDataRequest)>,
}

impl SimulatedNetwork {
    /// Create a joined network with no devices.
    ///
    /// Loss rates outside `0.0..=1.0` are clamped; NaN counts as no loss.
    pub fn new(mut config: NetworkConfig) -> Self {
        config.delivery_failure_rate = clamp_rate(config.delivery_failure_rate);
        config.response_loss_rate = clamp_rate(config.response_loss_rate);
        Self {
            config,
            joined: true,
            devices: Vec::new(),
            next_delivery_id: 0,
            outbox: Vec::new(),
        }
    }

    /// Add a device.
    pub fn with_device(mut self, device: SimulatedDevice) -> Self {
        self.devices.push(device);
        self
    }

    /// Change the join state.
    pub fn set_joined(&mut self, joined: bool) {
        self.joined = joined;
    }

    /// Number of submissions not yet drained.
    pub fn outbox_len(&self) -> usize {
        self.outbox.len()
    }

    fn allocate_id(&mut self) -> DeliveryId {
        let id = DeliveryId(self.next_delivery_id);
        self.next_delivery_id = self.next_delivery_id.wrapping_add(1);
        id
    }

    /// Turn every pending submission into scheduled host inputs.
    ///
    /// Each submission yields one confirmation after `latency`. When the
    /// frame is delivered, every device with matching endpoints answers
    /// after a round trip, staggered by one millisecond per device.
    pub fn deliver_outbox(&mut self, rng: &mut ChaCha8Rng) -> Vec<Delivery> {
        let latency = self.config.latency;
        let mut deliveries = Vec::new();

        for (id, request) in std::mem::take(&mut self.outbox) {
            let delivered = !rng.gen_bool(self.config.delivery_failure_rate);
            let status = if delivered {
                ApsStatus::SUCCESS
            } else {
                ApsStatus::NO_ACK
            };
            trace!(%id, ?status, "Confirming submitted frame");
            deliveries.push(Delivery {
                latency,
                input: HostInput::DeliveryConfirm(ApsDataConfirm { id, status }),
            });

            if self.config.foreign_traffic {
                deliveries.extend(self.foreign_traffic(latency));
            }

            if !delivered || request.cluster != ClusterId::MATCH_DESCRIPTOR_REQUEST {
                continue;
            }
            let Some(&seq) = request.asdu.first() else {
                continue;
            };

            let mut offset = 0u64;
            for device in self.devices.iter().filter(|d| !d.endpoints.is_empty()) {
                offset += 1;
                if rng.gen_bool(self.config.response_loss_rate) {
                    trace!(device = %device.address, "Dropping match descriptor response");
                    continue;
                }
                deliveries.push(Delivery {
                    latency: latency * 2 + Duration::from_millis(offset),
                    input: HostInput::Indication(device.match_response(seq)),
                });
            }

            if self.config.foreign_traffic {
                // A response to somebody else's transaction.
                let stale = SimulatedDevice::new(0xBEEF, &[0x0B]).match_response(seq.wrapping_add(1));
                deliveries.push(Delivery {
                    latency: latency * 2,
                    input: HostInput::Indication(stale),
                });
            }
        }

        deliveries
    }

    /// Confirmation and indication belonging to another APS consumer.
    fn foreign_traffic(&mut self, latency: Duration) -> [Delivery; 2] {
        let id = self.allocate_id();
        [
            Delivery {
                latency,
                input: HostInput::DeliveryConfirm(ApsDataConfirm {
                    id,
                    status: ApsStatus::SUCCESS,
                }),
            },
            Delivery {
                latency,
                input: HostInput::Indication(ApsDataIndication {
                    src_address: ApsAddress::Nwk(NwkAddress(0x1001)),
                    src_endpoint: Endpoint(0x01),
                    dst_endpoint: Endpoint(0x01),
                    profile: ProfileId::HOME_AUTOMATION,
                    cluster: ClusterId::ON_OFF,
                    asdu: vec![0x18, 0x01, 0x0A, 0x00, 0x00, 0x10, 0x01],
                }),
            },
        ]
    }
}

fn clamp_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        0.0
    } else {
        rate.clamp(0.0, 1.0)
    }
}

impl NetworkBoundary for SimulatedNetwork {
    fn is_joined(&self) -> bool {
        self.joined
    }

    fn submit(&mut self, request: &ApsDataRequest) -> Result<DeliveryId, SubmitError> {
        if !self.joined {
            return Err(SubmitError::NotJoined);
        }
        let id = self.allocate_id();
        self.outbox.push((id, request.clone()));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn zdp_request(seq: u8) -> ApsDataRequest {
        ApsDataRequest::zdp_broadcast(ClusterId::MATCH_DESCRIPTOR_REQUEST, vec![seq, 0xFD, 0xFF])
    }

    #[test]
    fn test_submit_requires_join() {
        let mut network = SimulatedNetwork::new(NetworkConfig::default());
        network.set_joined(false);
        assert_eq!(
            network.submit(&zdp_request(1)),
            Err(SubmitError::NotJoined)
        );
        assert_eq!(network.outbox_len(), 0);

        network.set_joined(true);
        assert_eq!(network.submit(&zdp_request(1)), Ok(DeliveryId(0)));
        assert_eq!(network.submit(&zdp_request(2)), Ok(DeliveryId(1)));
        assert_eq!(network.outbox_len(), 2);
    }

    #[test]
    fn test_devices_answer_with_echoed_sequence() {
        let mut network = SimulatedNetwork::new(NetworkConfig::default())
            .with_device(SimulatedDevice::new(0x1234, &[0x01, 0x02]))
            .with_device(SimulatedDevice::new(0x5678, &[]));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let id = network.submit(&zdp_request(0x42)).unwrap();
        let deliveries = network.deliver_outbox(&mut rng);
        assert_eq!(network.outbox_len(), 0);
        assert_eq!(deliveries.len(), 2);

        match &deliveries[0].input {
            HostInput::DeliveryConfirm(confirm) => {
                assert_eq!(confirm.id, id);
                assert!(confirm.status.is_success());
            }
            other => panic!("Expected confirm, got {:?}", other),
        }
        match &deliveries[1].input {
            HostInput::Indication(ind) => {
                assert_eq!(ind.asdu, vec![0x42, 0x00, 0x34, 0x12, 0x02, 0x01, 0x02]);
                assert_eq!(ind.cluster, ClusterId::MATCH_DESCRIPTOR_RESPONSE);
            }
            other => panic!("Expected indication, got {:?}", other),
        }
        assert_eq!(deliveries[1].latency, Duration::from_millis(41));
    }

    #[test]
    fn test_out_of_range_rates_are_clamped() {
        let config = NetworkConfig {
            delivery_failure_rate: 1.5,
            response_loss_rate: -0.2,
            ..Default::default()
        };
        let mut network =
            SimulatedNetwork::new(config).with_device(SimulatedDevice::new(0x1234, &[0x01]));
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        network.submit(&zdp_request(9)).unwrap();
        let deliveries = network.deliver_outbox(&mut rng);
        assert_eq!(deliveries.len(), 1);
        assert!(matches!(
            deliveries[0].input,
            HostInput::DeliveryConfirm(ApsDataConfirm {
                status: ApsStatus::NO_ACK,
                ..
            })
        ));

        let config = NetworkConfig {
            response_loss_rate: f64::NAN,
            ..Default::default()
        };
        let mut network =
            SimulatedNetwork::new(config).with_device(SimulatedDevice::new(0x1234, &[0x01]));
        network.submit(&zdp_request(9)).unwrap();
        assert_eq!(network.deliver_outbox(&mut rng).len(), 2);
    }

    #[test]
    fn test_failed_delivery_produces_no_responses() {
        let config = NetworkConfig {
            delivery_failure_rate: 1.0,
            ..Default::default()
        };
        let mut network =
            SimulatedNetwork::new(config).with_device(SimulatedDevice::new(0x1234, &[0x01]));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        network.submit(&zdp_request(7)).unwrap();
        let deliveries = network.deliver_outbox(&mut rng);
        assert_eq!(deliveries.len(), 1);
        assert!(matches!(
            deliveries[0].input,
            HostInput::DeliveryConfirm(ApsDataConfirm {
                status: ApsStatus::NO_ACK,
                ..
            })
        ));
    }
}

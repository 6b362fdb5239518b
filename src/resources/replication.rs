//! In-process replication transport.
//!
//! [`ReplicationHub`] stands in for the network layer that pushes
//! authoritative level state to connected observers. Every message is
//! serialized once with `serde_json` and the same payload is sent over a
//! crossbeam channel to each observer, so all observers see identical data.
//! Delivery is fire-and-forget; an observer whose receiving end was dropped
//! is removed from the fan-out on the next send.
//!
//! Two kinds of traffic exist:
//! - replicated properties ([`ReplicationHub::replicate_property`]), whose
//!   latest value is also sent to observers that connect later
//! - reliable multicasts ([`ReplicationHub::multicast_reliable`]), which
//!   only reach observers connected at the time of the call
//!
//! # Related
//!
//! - [`crate::resources::levelcoins::LevelCoinState`] – the replicated state
//! - [`crate::events::level::observe_level_complete_request`] – multicasts completion

use bevy_ecs::prelude::{Entity, Resource};
use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Network-stable reference to an actor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetActorId(pub u64);

impl From<Entity> for NetActorId {
    fn from(entity: Entity) -> Self {
        NetActorId(entity.to_bits())
    }
}

/// Messages carried from the authority to observers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplicatedMessage {
    /// Replicated property: number of coins in the level.
    LevelCoins { total_level_coins: i32 },
    /// Reliable multicast: the level finished.
    LevelComplete { actor: NetActorId, succeeded: bool },
}

impl ReplicatedMessage {
    fn property_key(&self) -> Option<&'static str> {
        match self {
            ReplicatedMessage::LevelCoins { .. } => Some("total_level_coins"),
            ReplicatedMessage::LevelComplete { .. } => None,
        }
    }
}

struct ObserverLink {
    id: u32,
    tx: Sender<String>,
}

/// Authority side of the replication channel.
#[derive(Resource, Default)]
pub struct ReplicationHub {
    links: Vec<ObserverLink>,
    next_id: u32,
    /// Latest serialized value of each replicated property.
    properties: Vec<(&'static str, String)>,
}

impl ReplicationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of observers currently connected.
    pub fn observer_count(&self) -> usize {
        self.links.len()
    }

    /// Connect a new observer. It immediately receives the current value of
    /// every replicated property.
    pub fn connect(&mut self) -> RemoteObserver {
        let (tx, rx) = unbounded();
        let id = self.next_id;
        self.next_id += 1;
        for (_, payload) in &self.properties {
            // Receiver is alive; it is held by the observer we return below.
            let _ = tx.send(payload.clone());
        }
        self.links.push(ObserverLink { id, tx });
        debug!("Replication observer {} connected", id);
        RemoteObserver {
            id,
            rx,
            replica: LevelReplica::default(),
        }
    }

    /// Send `message` to every connected observer.
    ///
    /// Returns the number of observers the payload was delivered to.
    pub fn multicast_reliable(
        &mut self,
        message: &ReplicatedMessage,
    ) -> Result<usize, serde_json::Error> {
        let payload = serde_json::to_string(message)?;
        Ok(self.fan_out(&payload))
    }

    /// Update a replicated property and push it to every observer.
    pub fn replicate_property(
        &mut self,
        message: &ReplicatedMessage,
    ) -> Result<usize, serde_json::Error> {
        let payload = serde_json::to_string(message)?;
        if let Some(key) = message.property_key() {
            match self.properties.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = payload.clone(),
                None => self.properties.push((key, payload.clone())),
            }
        }
        Ok(self.fan_out(&payload))
    }

    fn fan_out(&mut self, payload: &str) -> usize {
        let before = self.links.len();
        self.links.retain(|link| {
            let alive = link.tx.send(payload.to_string()).is_ok();
            if !alive {
                warn!("Replication observer {} disconnected, dropping it", link.id);
            }
            alive
        });
        let delivered = self.links.len();
        if delivered < before {
            debug!("{} observer(s) dropped during fan-out", before - delivered);
        }
        delivered
    }
}

/// Observer-side copy of the replicated level state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelReplica {
    pub total_level_coins: i32,
    /// `(actor, succeeded)` of the last level-complete multicast.
    pub level_result: Option<(NetActorId, bool)>,
    pub level_complete_count: u32,
}

impl LevelReplica {
    pub fn apply(&mut self, message: &ReplicatedMessage) {
        match message {
            ReplicatedMessage::LevelCoins { total_level_coins } => {
                self.total_level_coins = *total_level_coins;
            }
            ReplicatedMessage::LevelComplete { actor, succeeded } => {
                self.level_result = Some((*actor, *succeeded));
                self.level_complete_count += 1;
            }
        }
    }
}

/// Receiving end held by a remote observer.
pub struct RemoteObserver {
    id: u32,
    rx: Receiver<String>,
    replica: LevelReplica,
}

impl RemoteObserver {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn replica(&self) -> &LevelReplica {
        &self.replica
    }

    /// Drain pending payloads, apply them to the replica and return them.
    ///
    /// Payloads that fail to decode are logged and skipped.
    pub fn poll(&mut self) -> Vec<ReplicatedMessage> {
        let mut received = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(payload) => match serde_json::from_str::<ReplicatedMessage>(&payload) {
                    Ok(message) => {
                        self.replica.apply(&message);
                        received.push(message);
                    }
                    Err(e) => warn!("Observer {} failed to decode payload: {}", self.id, e),
                },
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        received
    }
}

//! Coordinator: the registry that creates, finds, and retires rooms.

use std::collections::HashMap;

use partyline_protocol::RoomId;
use tokio::sync::RwLock;

use crate::room::{spawn_room, RoomHandle, RoomSnapshot};
use crate::{RoomConfig, RoomError};

/// Maps room ids to running rooms.
///
/// This is the one structure shared between connections. Lookups take
/// the read lock; creation takes the write lock and checks again before
/// spawning, so concurrent first touches of the same id all get the same
/// room. Room state itself is never behind this lock: it lives in each
/// room's lane.
///
/// Share it between tasks with an `Arc`.
pub struct Coordinator {
    rooms: RwLock<HashMap<RoomId, RoomHandle>>,
    config: RoomConfig,
}

impl Coordinator {
    pub fn new(config: RoomConfig) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    /// Returns the room registered under `room_id`, creating and starting
    /// it on first use.
    pub async fn get_or_create(&self, room_id: impl Into<RoomId>) -> RoomHandle {
        let room_id = room_id.into();
        if let Some(handle) = self.rooms.read().await.get(&room_id) {
            return handle.clone();
        }

        let mut rooms = self.rooms.write().await;
        // Another caller may have created it between the two locks.
        if let Some(handle) = rooms.get(&room_id) {
            return handle.clone();
        }

        let handle = spawn_room(room_id.clone(), &self.config);
        rooms.insert(room_id.clone(), handle.clone());
        tracing::info!(%room_id, rooms = rooms.len(), "room created");
        handle
    }

    /// Looks a room up without ever creating one.
    pub async fn get(&self, room_id: &RoomId) -> Option<RoomHandle> {
        self.rooms.read().await.get(room_id).cloned()
    }

    /// Queries a registered room.
    pub async fn snapshot(&self, room_id: &RoomId) -> Result<RoomSnapshot, RoomError> {
        let handle = self
            .get(room_id)
            .await
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))?;
        handle.snapshot().await
    }

    /// Stops and unregisters every room without players, plus any room
    /// whose lane died. Returns how many were removed.
    ///
    /// Rooms are queried without holding the registry lock. A room is
    /// only removed if the registry still holds that same instance, so a
    /// room recreated in the meantime survives, and each room is stopped
    /// at most once by the sweep.
    pub async fn sweep_empty(&self) -> usize {
        let handles: Vec<RoomHandle> = self.rooms.read().await.values().cloned().collect();

        let mut doomed = Vec::new();
        for handle in handles {
            match handle.snapshot().await {
                Ok(snapshot) if !snapshot.is_empty() => {}
                Ok(_) => doomed.push(handle),
                Err(err) => {
                    tracing::warn!(room_id = %handle.room_id(), %err, "room not answering, removing");
                    doomed.push(handle);
                }
            }
        }

        let mut removed = Vec::new();
        {
            let mut rooms = self.rooms.write().await;
            for handle in doomed {
                let still_registered = rooms
                    .get(handle.room_id())
                    .is_some_and(|current| current.same_room(&handle));
                if still_registered {
                    rooms.remove(handle.room_id());
                    removed.push(handle);
                }
            }
        }

        for handle in &removed {
            handle.stop().await;
            tracing::info!(room_id = %handle.room_id(), "empty room removed");
        }
        removed.len()
    }

    /// Sends one countdown tick to every room. A room whose inbox is full
    /// misses this tick instead of holding up the others. Returns how many
    /// rooms were ticked.
    pub async fn tick_all(&self) -> usize {
        let handles: Vec<RoomHandle> = self.rooms.read().await.values().cloned().collect();
        let mut ticked = 0;
        for handle in &handles {
            if handle.try_tick() {
                ticked += 1;
            } else {
                tracing::debug!(room_id = %handle.room_id(), "tick skipped, room busy");
            }
        }
        ticked
    }

    /// Stops every room and empties the registry.
    pub async fn shutdown_all(&self) {
        let drained: Vec<RoomHandle> = {
            let mut rooms = self.rooms.write().await;
            rooms.drain().map(|(_, handle)| handle).collect()
        };
        let count = drained.len();
        for handle in drained {
            handle.stop().await;
        }
        tracing::info!(rooms = count, "all rooms shut down");
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Lists registered room ids, sorted.
    pub async fn room_ids(&self) -> Vec<RoomId> {
        let mut ids: Vec<RoomId> = self.rooms.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(RoomConfig::default())
    }
}

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// What `set_driver_offline` does when the driver is serving a ride.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfflinePolicy {
    /// Refuse; the ride must finish or be cancelled first.
    #[default]
    RejectWhileInRide,
    /// Cancel the active ride, then take the driver offline.
    AbandonActiveRide,
}

/// Engine-wide configuration, injected at construction.
#[derive(Debug, Clone, Copy, Default, Resource)]
pub struct EngineConfig {
    pub offline_policy: OfflinePolicy,
}

impl EngineConfig {
    pub fn with_offline_policy(mut self, policy: OfflinePolicy) -> Self {
        self.offline_policy = policy;
        self
    }
}

//! Telemetry: records completed rides and per-state counts.

use bevy_ecs::prelude::{Entity, Resource};
use serde::Serialize;

use crate::ecs::{DriverStatus, RideStatus};

/// One completed ride, recorded when the fare is charged.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedRideRecord {
    #[serde(skip)]
    pub ride: Entity,
    #[serde(skip)]
    pub driver: Entity,
    pub ride_id: u64,
    pub category: String,
    pub distance_km: f64,
    pub fare: f64,
}

/// Collects dispatch telemetry. One record is appended per successful
/// completion; a failed completion never charges.
#[derive(Debug, Default, Resource)]
pub struct DispatchTelemetry {
    pub completed_rides: Vec<CompletedRideRecord>,
}

/// Aggregated entity counts at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchCounts {
    pub rides_requested: usize,
    pub rides_accepted: usize,
    pub rides_started: usize,
    pub rides_completed: usize,
    pub rides_cancelled: usize,
    pub drivers_available: usize,
    pub drivers_in_ride: usize,
    pub drivers_offline: usize,
}

impl DispatchCounts {
    pub fn add_ride(&mut self, status: RideStatus) {
        match status {
            RideStatus::Requested => self.rides_requested += 1,
            RideStatus::Accepted => self.rides_accepted += 1,
            RideStatus::Started => self.rides_started += 1,
            RideStatus::Completed => self.rides_completed += 1,
            RideStatus::Cancelled => self.rides_cancelled += 1,
        }
    }

    pub fn add_driver(&mut self, status: DriverStatus) {
        match status {
            DriverStatus::Available => self.drivers_available += 1,
            DriverStatus::InRide => self.drivers_in_ride += 1,
            DriverStatus::Offline => self.drivers_offline += 1,
        }
    }
}

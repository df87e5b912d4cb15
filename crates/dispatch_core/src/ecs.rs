use std::sync::Arc;

use bevy_ecs::prelude::{Component, Entity, Resource};
use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, DispatchResult};

/// A point on the map. No geodesy is performed on it; trip distance is
/// supplied externally when a ride completes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        debug_assert!(
            latitude.is_finite() && longitude.is_finite(),
            "coordinates must be finite"
        );
        Self {
            latitude,
            longitude,
        }
    }
}

/// A driver's vehicle. Pure value record; ride status lives on [Ride] only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub registration: String,
    pub color: String,
    pub model_year: i32,
}

impl Vehicle {
    pub fn new(registration: impl Into<String>, color: impl Into<String>, model_year: i32) -> Self {
        Self {
            registration: registration.into(),
            color: color.into(),
            model_year,
        }
    }
}

/// A fare tier (e.g. Economy, Premium). Immutable once constructed and
/// shared across rides via `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideCategory {
    pub name: String,
    pub base_rate_per_km: f64,
}

impl RideCategory {
    /// Build a category, rejecting non-finite or non-positive base rates.
    pub fn new(name: impl Into<String>, base_rate_per_km: f64) -> DispatchResult<Self> {
        if !base_rate_per_km.is_finite() || base_rate_per_km <= 0.0 {
            return Err(DispatchError::InvalidBaseRate(base_rate_per_km));
        }
        Ok(Self {
            name: name.into(),
            base_rate_per_km,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RideStatus {
    Requested,
    Accepted,
    Started,
    Completed,
    Cancelled,
}

impl RideStatus {
    /// Completed and Cancelled permit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RideStatus::Completed | RideStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverStatus {
    Available,
    InRide,
    Offline,
}

#[derive(Debug, Clone, Component)]
pub struct Driver {
    pub name: String,
    pub mobile: String,
    pub vehicle: Vehicle,
    pub status: DriverStatus,
    /// Ride currently served; `Some` while the driver is InRide.
    pub active_ride: Option<Entity>,
}

#[derive(Debug, Clone, Component)]
pub struct Ride {
    /// Unique, strictly increasing across the engine's lifetime; starts at 1.
    pub id: u64,
    pub pickup: Location,
    pub destination: Location,
    pub category: Arc<RideCategory>,
    pub status: RideStatus,
    /// Matched driver; `Some` iff status is Accepted, Started, or Completed.
    /// Set once and never reassigned.
    pub driver: Option<Entity>,
}

/// Drivers in onboarding order. The matching scan walks this roster, not
/// query iteration order, so first-available stays deterministic.
#[derive(Debug, Default, Resource)]
pub struct DriverRoster(pub Vec<Entity>);

/// Rides in creation order.
#[derive(Debug, Default, Resource)]
pub struct RideLedger(pub Vec<Entity>);

/// Hands out ride ids; ids are never reused, even for cancelled rides.
#[derive(Debug, Resource)]
pub struct RideIdAllocator {
    next_id: u64,
}

impl Default for RideIdAllocator {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl RideIdAllocator {
    pub fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

//! Dispatch engine: owns every ride and driver and drives their lifecycles.
//!
//! All entities live in one [World]; callers hold opaque [Entity] handles
//! and go through the engine for every read or transition. Operations take
//! `&mut self`, so the availability check in [DispatchEngine::request_ride]
//! and the driver-state flip it performs happen under a single exclusive
//! borrow.

use std::sync::Arc;

use bevy_ecs::prelude::{Entity, World};

use crate::config::{EngineConfig, OfflinePolicy};
use crate::ecs::{
    Driver, DriverRoster, DriverStatus, Location, Ride, RideCategory, RideIdAllocator, RideLedger,
    RideStatus, Vehicle,
};
use crate::error::{DispatchError, DispatchResult};
use crate::fares::{FareStrategy, FareStrategyResource, NormalPricing};
use crate::matching::{FirstAvailable, MatchingPolicy, MatchingPolicyResource};
use crate::telemetry::{CompletedRideRecord, DispatchCounts, DispatchTelemetry};

pub struct DispatchEngine {
    world: World,
}

impl DispatchEngine {
    pub fn new(
        config: EngineConfig,
        policy: Box<dyn MatchingPolicy>,
        strategy: Box<dyn FareStrategy>,
    ) -> Self {
        let mut world = World::new();
        world.insert_resource(config);
        world.insert_resource(MatchingPolicyResource::new(policy));
        world.insert_resource(FareStrategyResource::new(strategy));
        world.insert_resource(DriverRoster::default());
        world.insert_resource(RideLedger::default());
        world.insert_resource(RideIdAllocator::default());
        world.insert_resource(DispatchTelemetry::default());
        Self { world }
    }

    /// Swap the active fare strategy (e.g. entering or leaving a surge
    /// window). Applies to completions from this point on.
    pub fn set_fare_strategy(&mut self, strategy: Box<dyn FareStrategy>) {
        self.world
            .insert_resource(FareStrategyResource::new(strategy));
    }

    /// Onboard a driver. Drivers start Available and keep their roster slot
    /// for the engine's lifetime.
    pub fn add_driver(
        &mut self,
        name: impl Into<String>,
        mobile: impl Into<String>,
        vehicle: Vehicle,
    ) -> Entity {
        let driver = Driver {
            name: name.into(),
            mobile: mobile.into(),
            vehicle,
            status: DriverStatus::Available,
            active_ride: None,
        };
        let name = driver.name.clone();
        let entity = self.world.spawn(driver).id();
        self.world.resource_mut::<DriverRoster>().0.push(entity);
        tracing::debug!("Driver onboarded: {}", name);
        entity
    }

    pub fn set_driver_online(&mut self, driver: Entity) -> DispatchResult<()> {
        let status = self
            .world
            .get::<Driver>(driver)
            .ok_or(DispatchError::DriverNotFound)?
            .status;
        match status {
            DriverStatus::Available => Ok(()),
            DriverStatus::InRide => Err(DispatchError::DriverInRide),
            DriverStatus::Offline => {
                if let Some(mut d) = self.world.get_mut::<Driver>(driver) {
                    d.status = DriverStatus::Available;
                    tracing::info!("Driver {} is now available", d.name);
                }
                Ok(())
            }
        }
    }

    /// Take a driver offline. For a driver mid-ride the outcome is governed
    /// by [OfflinePolicy]: reject, or cancel the active ride first.
    pub fn set_driver_offline(&mut self, driver: Entity) -> DispatchResult<()> {
        let (status, active_ride) = {
            let d = self
                .world
                .get::<Driver>(driver)
                .ok_or(DispatchError::DriverNotFound)?;
            (d.status, d.active_ride)
        };
        match status {
            DriverStatus::Offline => Ok(()),
            DriverStatus::Available => {
                if let Some(mut d) = self.world.get_mut::<Driver>(driver) {
                    d.status = DriverStatus::Offline;
                    tracing::info!("Driver {} is now offline", d.name);
                }
                Ok(())
            }
            DriverStatus::InRide => {
                let policy = self.world.resource::<EngineConfig>().offline_policy;
                match policy {
                    OfflinePolicy::RejectWhileInRide => Err(DispatchError::DriverInRide),
                    OfflinePolicy::AbandonActiveRide => {
                        if let Some(ride) = active_ride {
                            if let Some(mut r) = self.world.get_mut::<Ride>(ride) {
                                r.status = RideStatus::Cancelled;
                                r.driver = None;
                                tracing::warn!("Ride {} abandoned by its driver", r.id);
                            }
                        }
                        if let Some(mut d) = self.world.get_mut::<Driver>(driver) {
                            d.status = DriverStatus::Offline;
                            d.active_ride = None;
                        }
                        Ok(())
                    }
                }
            }
        }
    }

    /// Allocate a new ride in the Requested state. Never fails.
    pub fn create_ride(
        &mut self,
        pickup: Location,
        destination: Location,
        category: Arc<RideCategory>,
    ) -> Entity {
        let id = self.world.resource_mut::<RideIdAllocator>().allocate();
        let entity = self
            .world
            .spawn(Ride {
                id,
                pickup,
                destination,
                category,
                status: RideStatus::Requested,
                driver: None,
            })
            .id();
        self.world.resource_mut::<RideLedger>().0.push(entity);
        tracing::debug!("Ride {} created", id);
        entity
    }

    /// Match a Requested ride to a driver.
    ///
    /// Available drivers are collected in roster order and the matching
    /// policy picks one; on a match the ride moves to Accepted and the
    /// driver to InRide. With no Available driver the ride is left
    /// untouched in Requested.
    pub fn request_ride(&mut self, ride: Entity) -> DispatchResult<Entity> {
        let (ride_id, pickup) = {
            let r = self
                .world
                .get::<Ride>(ride)
                .ok_or(DispatchError::RideNotFound)?;
            if r.status != RideStatus::Requested {
                return Err(DispatchError::CannotRequest(r.status));
            }
            (r.id, r.pickup)
        };

        let candidates: Vec<Entity> = {
            let roster = self.world.resource::<DriverRoster>();
            roster
                .0
                .iter()
                .copied()
                .filter(|&entity| {
                    self.world
                        .get::<Driver>(entity)
                        .is_some_and(|d| d.status == DriverStatus::Available)
                })
                .collect()
        };

        let chosen = {
            let policy = self.world.resource::<MatchingPolicyResource>();
            policy.select_driver(&pickup, &candidates)
        };
        let Some(driver_entity) = chosen else {
            tracing::warn!("No drivers available for ride {}", ride_id);
            return Err(DispatchError::NoDriverAvailable);
        };

        let driver_name = {
            let mut d = self
                .world
                .get_mut::<Driver>(driver_entity)
                .ok_or(DispatchError::DriverNotFound)?;
            if d.status != DriverStatus::Available {
                return Err(DispatchError::NoDriverAvailable);
            }
            d.status = DriverStatus::InRide;
            d.active_ride = Some(ride);
            d.name.clone()
        };
        if let Some(mut r) = self.world.get_mut::<Ride>(ride) {
            r.driver = Some(driver_entity);
            r.status = RideStatus::Accepted;
        }

        tracing::info!("Driver {} assigned to ride {}", driver_name, ride_id);
        Ok(driver_entity)
    }

    /// Move an Accepted ride to Started. The matched driver stays InRide.
    pub fn start_ride(&mut self, ride: Entity) -> DispatchResult<()> {
        let ride_id = {
            let r = self
                .world
                .get::<Ride>(ride)
                .ok_or(DispatchError::RideNotFound)?;
            if r.status != RideStatus::Accepted || r.driver.is_none() {
                return Err(DispatchError::CannotStart(r.status));
            }
            r.id
        };
        if let Some(mut r) = self.world.get_mut::<Ride>(ride) {
            r.status = RideStatus::Started;
        }
        tracing::info!("Ride {} started", ride_id);
        Ok(())
    }

    /// Complete a Started ride and charge the fare.
    ///
    /// `distance_km` is the externally measured or estimated trip distance;
    /// it is validated before the fare strategy runs. On success the driver
    /// returns to Available, the completed ride keeps its driver reference,
    /// and a [CompletedRideRecord] is appended to telemetry.
    pub fn complete_ride(&mut self, ride: Entity, distance_km: f64) -> DispatchResult<f64> {
        let (ride_id, driver_entity, category) = {
            let r = self
                .world
                .get::<Ride>(ride)
                .ok_or(DispatchError::RideNotFound)?;
            match (r.status, r.driver) {
                (RideStatus::Started, Some(driver)) => (r.id, driver, Arc::clone(&r.category)),
                _ => return Err(DispatchError::CannotComplete(r.status)),
            }
        };
        if !distance_km.is_finite() || distance_km <= 0.0 {
            return Err(DispatchError::InvalidDistance(distance_km));
        }

        let fare = {
            let strategy = self.world.resource::<FareStrategyResource>();
            strategy.quote(distance_km, &category)
        };

        if let Some(mut d) = self.world.get_mut::<Driver>(driver_entity) {
            d.status = DriverStatus::Available;
            d.active_ride = None;
        }
        if let Some(mut r) = self.world.get_mut::<Ride>(ride) {
            r.status = RideStatus::Completed;
        }
        self.world
            .resource_mut::<DispatchTelemetry>()
            .completed_rides
            .push(CompletedRideRecord {
                ride,
                driver: driver_entity,
                ride_id,
                category: category.name.clone(),
                distance_km,
                fare,
            });

        tracing::info!("Ride {} completed, fare {:.2}", ride_id, fare);
        Ok(fare)
    }

    /// Cancel a Requested or Accepted ride. Cancelling an Accepted ride
    /// releases its driver back to Available and clears the driver link.
    pub fn cancel_ride(&mut self, ride: Entity) -> DispatchResult<()> {
        let (ride_id, status, driver_entity) = {
            let r = self
                .world
                .get::<Ride>(ride)
                .ok_or(DispatchError::RideNotFound)?;
            (r.id, r.status, r.driver)
        };
        if !matches!(status, RideStatus::Requested | RideStatus::Accepted) {
            return Err(DispatchError::CannotCancel(status));
        }

        if let Some(driver) = driver_entity {
            if let Some(mut d) = self.world.get_mut::<Driver>(driver) {
                d.status = DriverStatus::Available;
                d.active_ride = None;
            }
        }
        if let Some(mut r) = self.world.get_mut::<Ride>(ride) {
            r.status = RideStatus::Cancelled;
            r.driver = None;
        }
        tracing::info!("Ride {} cancelled", ride_id);
        Ok(())
    }

    pub fn ride(&self, ride: Entity) -> Option<&Ride> {
        self.world.get::<Ride>(ride)
    }

    pub fn driver(&self, driver: Entity) -> Option<&Driver> {
        self.world.get::<Driver>(driver)
    }

    /// Rides in creation order.
    pub fn rides(&self) -> &[Entity] {
        &self.world.resource::<RideLedger>().0
    }

    /// Drivers in onboarding order.
    pub fn drivers(&self) -> &[Entity] {
        &self.world.resource::<DriverRoster>().0
    }

    pub fn telemetry(&self) -> &DispatchTelemetry {
        self.world.resource::<DispatchTelemetry>()
    }

    /// Tally every ride and driver by state.
    pub fn counts(&self) -> DispatchCounts {
        let mut counts = DispatchCounts::default();
        for &entity in &self.world.resource::<RideLedger>().0 {
            if let Some(ride) = self.world.get::<Ride>(entity) {
                counts.add_ride(ride.status);
            }
        }
        for &entity in &self.world.resource::<DriverRoster>().0 {
            if let Some(driver) = self.world.get::<Driver>(entity) {
                counts.add_driver(driver.status);
            }
        }
        counts
    }
}

impl Default for DispatchEngine {
    fn default() -> Self {
        Self::new(
            EngineConfig::default(),
            Box::new(FirstAvailable),
            Box::new(NormalPricing),
        )
    }
}

use bevy_ecs::prelude::Entity;

use crate::ecs::Location;

/// Trait for policies that pick a driver for a requested ride.
///
/// The engine hands over `candidates`, the currently Available drivers in
/// onboarding order; drivers that are InRide or Offline are already filtered
/// out. Implementations return the chosen driver, or `None` to leave the
/// ride unmatched.
///
/// The pickup location is provided for policies that rank candidates
/// spatially; [super::FirstAvailable] ignores it.
pub trait MatchingPolicy: Send + Sync {
    fn select_driver(&self, pickup: &Location, candidates: &[Entity]) -> Option<Entity>;
}

use bevy_ecs::prelude::Entity;

use super::algorithm::MatchingPolicy;
use crate::ecs::Location;

/// First-available matching: the earliest onboarded Available driver wins.
///
/// No distance-based ranking. Deterministic given a fixed roster order,
/// which makes it the baseline policy for tests and comparisons.
#[derive(Debug, Default)]
pub struct FirstAvailable;

impl MatchingPolicy for FirstAvailable {
    fn select_driver(&self, _pickup: &Location, candidates: &[Entity]) -> Option<Entity> {
        candidates.first().copied()
    }
}

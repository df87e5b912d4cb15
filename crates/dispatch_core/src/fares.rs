//! Fare strategies applied when a ride completes.

use bevy_ecs::prelude::Resource;

use crate::ecs::RideCategory;

/// Multiplier applied by [SurgePricing] on top of the category base rate.
pub const SURGE_MULTIPLIER: f64 = 2.0;

/// Computes the fare for a completed ride.
///
/// Implementations are pure functions of the distance and the ride's
/// category. The engine validates the distance (finite, positive) before a
/// strategy is invoked, so strategies never see malformed input.
pub trait FareStrategy: Send + Sync {
    fn quote(&self, distance_km: f64, category: &RideCategory) -> f64;
}

/// Base pricing: `distance * base_rate_per_km`.
#[derive(Debug, Default)]
pub struct NormalPricing;

impl FareStrategy for NormalPricing {
    fn quote(&self, distance_km: f64, category: &RideCategory) -> f64 {
        distance_km * category.base_rate_per_km
    }
}

/// Surge pricing: doubles the base rate.
#[derive(Debug, Default)]
pub struct SurgePricing;

impl FareStrategy for SurgePricing {
    fn quote(&self, distance_km: f64, category: &RideCategory) -> f64 {
        distance_km * category.base_rate_per_km * SURGE_MULTIPLIER
    }
}

/// Resource wrapper for the active fare strategy trait object.
#[derive(Resource)]
pub struct FareStrategyResource(pub Box<dyn FareStrategy>);

impl FareStrategyResource {
    pub fn new(strategy: Box<dyn FareStrategy>) -> Self {
        Self(strategy)
    }
}

impl std::ops::Deref for FareStrategyResource {
    type Target = dyn FareStrategy;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn economy() -> RideCategory {
        RideCategory::new("Economy", 15.0).expect("valid rate")
    }

    #[test]
    fn normal_pricing_multiplies_distance_by_base_rate() {
        let fare = NormalPricing.quote(10.0, &economy());
        assert_eq!(fare, 150.0);
    }

    #[test]
    fn surge_pricing_doubles_the_normal_fare() {
        let fare = SurgePricing.quote(10.0, &economy());
        assert_eq!(fare, 300.0);
    }
}

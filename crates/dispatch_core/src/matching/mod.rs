pub mod algorithm;
pub mod first_available;

use bevy_ecs::prelude::Resource;

pub use algorithm::MatchingPolicy;
pub use first_available::FirstAvailable;

/// Resource wrapper for the matching policy trait object.
#[derive(Resource)]
pub struct MatchingPolicyResource(pub Box<dyn MatchingPolicy>);

impl MatchingPolicyResource {
    pub fn new(policy: Box<dyn MatchingPolicy>) -> Self {
        Self(policy)
    }
}

impl std::ops::Deref for MatchingPolicyResource {
    type Target = dyn MatchingPolicy;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

use std::fmt;

use crate::ecs::RideStatus;

/// Expected, recoverable dispatch outcomes.
///
/// Every precondition failure in the engine is reported through this enum;
/// none of them aborts the process or leaves an entity half-mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispatchError {
    /// The ride handle does not resolve to a ride owned by this engine.
    RideNotFound,
    /// The driver handle does not resolve to a driver owned by this engine.
    DriverNotFound,
    /// The matching scan found no Available driver; the ride stays Requested.
    NoDriverAvailable,
    /// A driver can only be requested for a ride in the Requested state.
    CannotRequest(RideStatus),
    /// Only an Accepted ride with a matched driver can start.
    CannotStart(RideStatus),
    /// Only a Started ride with a matched driver can complete.
    CannotComplete(RideStatus),
    /// Only a Requested or Accepted ride can be cancelled.
    CannotCancel(RideStatus),
    /// Online/offline management rejected while the driver serves a ride.
    DriverInRide,
    /// Trip distance must be finite and positive.
    InvalidDistance(f64),
    /// Category base rate must be finite and positive.
    InvalidBaseRate(f64),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::RideNotFound => write!(f, "Ride not found"),
            DispatchError::DriverNotFound => write!(f, "Driver not found"),
            DispatchError::NoDriverAvailable => write!(f, "No drivers available"),
            DispatchError::CannotRequest(status) => {
                write!(f, "Cannot request a driver for a ride in state {:?}", status)
            }
            DispatchError::CannotStart(status) => {
                write!(f, "Cannot start a ride in state {:?}", status)
            }
            DispatchError::CannotComplete(status) => {
                write!(f, "Cannot complete a ride in state {:?}", status)
            }
            DispatchError::CannotCancel(status) => {
                write!(f, "Cannot cancel a ride in state {:?}", status)
            }
            DispatchError::DriverInRide => write!(f, "Driver is currently serving a ride"),
            DispatchError::InvalidDistance(distance) => {
                write!(f, "Invalid trip distance: {}", distance)
            }
            DispatchError::InvalidBaseRate(rate) => {
                write!(f, "Invalid category base rate: {}", rate)
            }
        }
    }
}

impl std::error::Error for DispatchError {}

/// Convenience alias for engine results.
pub type DispatchResult<T> = Result<T, DispatchError>;

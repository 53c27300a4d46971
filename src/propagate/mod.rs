mod error;
mod frames;
mod look;
mod sgp4_backend;
mod types;

use chrono::{DateTime, Utc};

pub use error::PropagateError;
pub use frames::{geodetic_to_ecf, gmst, EARTH_EQUATORIAL_RADIUS_KM};
pub use look::look_angles;
pub(crate) use look::look_angles_from;
pub use sgp4_backend::{Sgp4Factory, Sgp4Propagator};
pub use types::{LookAngle, Vec3};

#[cfg(test)]
pub(crate) use frames::ecf_to_eci;
#[cfg(test)]
pub(crate) use sgp4_backend::fixtures;

/// Source of inertial positions for one catalog object.
pub trait Propagator: Send + Sync {
    /// Earth-centered inertial position in km, or an error when the
    /// element set has no valid solution at `instant`.
    fn position_eci(&self, instant: DateTime<Utc>) -> Result<Vec3, PropagateError>;
}

/// Builds a [`Propagator`] from a raw element set.
pub trait PropagatorFactory {
    fn build(
        &self,
        name: &str,
        line1: &str,
        line2: &str,
    ) -> Result<Box<dyn Propagator>, PropagateError>;
}

use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use super::error::PropagateError;
use super::types::Vec3;
use super::{Propagator, PropagatorFactory};

/// SGP4/SDP4 propagator built from one element set.
pub struct Sgp4Propagator {
    elements: Elements,
    constants: Constants,
}

impl Sgp4Propagator {
    pub fn from_tle(name: &str, line1: &str, line2: &str) -> Result<Self, PropagateError> {
        let elements =
            Elements::from_tle(Some(name.to_string()), line1.as_bytes(), line2.as_bytes())?;
        let constants = Constants::from_elements(&elements)?;

        Ok(Self {
            elements,
            constants,
        })
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }
}

impl Propagator for Sgp4Propagator {
    fn position_eci(&self, instant: DateTime<Utc>) -> Result<Vec3, PropagateError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&instant.naive_utc())
            .map_err(|e| PropagateError::Epoch(e.to_string()))?;

        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| PropagateError::Propagation(e.to_string()))?;

        let position = Vec3::from(prediction.position);
        if !position.is_finite() {
            return Err(PropagateError::NonFinite);
        }
        Ok(position)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sgp4Factory;

impl PropagatorFactory for Sgp4Factory {
    fn build(
        &self,
        name: &str,
        line1: &str,
        line2: &str,
    ) -> Result<Box<dyn Propagator>, PropagateError> {
        let propagator = Sgp4Propagator::from_tle(name, line1, line2)?;
        log::trace!("built sgp4 propagator for {} ({})", name, propagator.norad_id());
        Ok(Box::new(propagator))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const ISS_2008_LINE1: &str =
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    pub const ISS_2008_LINE2: &str =
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";
    pub const ISS_2020_LINE1: &str =
        "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992";
    pub const ISS_2020_LINE2: &str =
        "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008";
}

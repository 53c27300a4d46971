use chrono::{DateTime, Utc};

use super::frames::{eci_to_ecf, eci_to_geodetic, ecf_to_look, gmst};
use super::types::{LookAngle, Vec3};
use crate::catalog::CatalogRecord;
use crate::observer::Observer;

/// Look angles of `record` at `instant`, or `None` when the propagator has
/// no valid position for that instant.
pub fn look_angles(
    record: &CatalogRecord,
    instant: DateTime<Utc>,
    observer: &Observer,
) -> Option<LookAngle> {
    look_angles_from(record, instant, gmst(instant), observer, observer.position_ecf())
}

/// Same as [`look_angles`] with the sidereal angle and the observer's
/// fixed-frame position already computed for this instant.
pub(crate) fn look_angles_from(
    record: &CatalogRecord,
    instant: DateTime<Utc>,
    gmst: f64,
    observer: &Observer,
    observer_ecf: Vec3,
) -> Option<LookAngle> {
    let eci = match record.propagator().position_eci(instant) {
        Ok(eci) => eci,
        Err(e) => {
            log::debug!("{}: no position at {}: {}", record.name, instant, e);
            return None;
        }
    };

    let position_ecf = eci_to_ecf(eci, gmst);
    let look = ecf_to_look(
        observer.lat_rad(),
        observer.lon_rad(),
        observer_ecf,
        position_ecf,
    );
    let geodetic = eci_to_geodetic(eci, gmst);

    Some(LookAngle {
        name: record.name.clone(),
        azimuth_deg: look.azimuth_deg,
        elevation_deg: look.elevation_deg,
        range_km: look.range_km,
        altitude_km: geodetic.height_km,
        latitude_deg: geodetic.latitude_rad.to_degrees(),
        longitude_deg: geodetic.longitude_rad.to_degrees(),
        position_ecf,
    })
}

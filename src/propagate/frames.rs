use chrono::{DateTime, Utc};
use std::f64::consts::{PI, TAU};

use super::types::Vec3;

// WGS-84
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.137;
pub const EARTH_POLAR_RADIUS_KM: f64 = 6356.7523142;
const EARTH_E2: f64 = 0.00669437999014;

const GEODETIC_ITERATIONS: usize = 20;

/// Azimuth, elevation and slant range of a target seen from a ground site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Topocentric {
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    pub latitude_rad: f64,
    pub longitude_rad: f64,
    pub height_km: f64,
}

/// Greenwich mean sidereal time in radians.
pub fn gmst(instant: DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&instant.naive_utc()))
}

pub fn eci_to_ecf(eci: Vec3, gmst: f64) -> Vec3 {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    Vec3::new(
        eci.x * cos_gmst + eci.y * sin_gmst,
        -eci.x * sin_gmst + eci.y * cos_gmst,
        eci.z,
    )
}

#[cfg(test)]
pub(crate) fn ecf_to_eci(ecf: Vec3, gmst: f64) -> Vec3 {
    eci_to_ecf(ecf, -gmst)
}

pub fn geodetic_to_ecf(lat_rad: f64, lon_rad: f64, altitude_km: f64) -> Vec3 {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let n = EARTH_EQUATORIAL_RADIUS_KM / (1.0 - EARTH_E2 * sin_lat * sin_lat).sqrt();
    Vec3::new(
        (n + altitude_km) * cos_lat * lon_rad.cos(),
        (n + altitude_km) * cos_lat * lon_rad.sin(),
        (n * (1.0 - EARTH_E2) + altitude_km) * sin_lat,
    )
}

pub fn ecf_to_enu(dr: Vec3, lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = -sin_lon * dr.x + cos_lon * dr.y;
    let north = -sin_lat * cos_lon * dr.x - sin_lat * sin_lon * dr.y + cos_lat * dr.z;
    let up = cos_lat * cos_lon * dr.x + cos_lat * sin_lon * dr.y + sin_lat * dr.z;
    (east, north, up)
}

/// Look angles of `target` from a site at (`lat_rad`, `lon_rad`) whose
/// fixed-frame position is `site`.
pub fn ecf_to_look(lat_rad: f64, lon_rad: f64, site: Vec3, target: Vec3) -> Topocentric {
    let dr = target - site;
    let range_km = dr.norm();
    let (east, north, up) = ecf_to_enu(dr, lat_rad, lon_rad);

    let mut azimuth_deg = east.atan2(north).to_degrees().rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if azimuth_deg >= 360.0 {
        azimuth_deg = 0.0;
    }
    let elevation_deg = if range_km > 0.0 {
        (up / range_km).clamp(-1.0, 1.0).asin().to_degrees()
    } else {
        0.0
    };

    Topocentric {
        azimuth_deg,
        elevation_deg,
        range_km,
    }
}

pub fn eci_to_geodetic(eci: Vec3, gmst: f64) -> Geodetic {
    let r = (eci.x * eci.x + eci.y * eci.y).sqrt();

    let mut longitude_rad = (eci.y.atan2(eci.x) - gmst).rem_euclid(TAU);
    if longitude_rad > PI {
        longitude_rad -= TAU;
    }

    let mut latitude_rad = eci.z.atan2(r);
    let mut c = 1.0;
    for _ in 0..GEODETIC_ITERATIONS {
        let sin_lat = latitude_rad.sin();
        c = 1.0 / (1.0 - EARTH_E2 * sin_lat * sin_lat).sqrt();
        latitude_rad = (eci.z + EARTH_EQUATORIAL_RADIUS_KM * c * EARTH_E2 * sin_lat).atan2(r);
    }

    let height_km = if latitude_rad.cos().abs() > 1e-9 {
        r / latitude_rad.cos() - EARTH_EQUATORIAL_RADIUS_KM * c
    } else {
        // over a pole the horizontal distance vanishes
        eci.z.abs() - EARTH_POLAR_RADIUS_KM
    };

    Geodetic {
        latitude_rad,
        longitude_rad,
        height_km,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    #[test]
    fn ecf_round_trip_through_rotation() {
        let ecf = Vec3::new(1234.0, -5678.0, 910.0);
        let back = eci_to_ecf(ecf_to_eci(ecf, 1.1), 1.1);
        assert_relative_eq!(back.x, ecf.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, ecf.y, epsilon = 1e-9);
        assert_relative_eq!(back.z, ecf.z, epsilon = 1e-9);
    }

    #[test]
    fn gmst_is_within_one_turn() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();
        let theta = gmst(instant).rem_euclid(TAU);
        assert!((0.0..TAU).contains(&theta));
    }

    #[test]
    fn equator_site_sits_on_semi_major_axis() {
        let site = geodetic_to_ecf(0.0, 0.0, 0.0);
        assert_relative_eq!(site.x, EARTH_EQUATORIAL_RADIUS_KM, epsilon = 1e-9);
        assert_relative_eq!(site.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn zenith_and_east_horizon() {
        let site = geodetic_to_ecf(0.0, 0.0, 0.0);

        let overhead = ecf_to_look(0.0, 0.0, site, Vec3::new(site.x + 500.0, 0.0, 0.0));
        assert_relative_eq!(overhead.elevation_deg, 90.0, epsilon = 1e-9);
        assert_relative_eq!(overhead.range_km, 500.0, epsilon = 1e-9);

        let east = ecf_to_look(0.0, 0.0, site, Vec3::new(site.x, 2000.0, 0.0));
        assert_relative_eq!(east.azimuth_deg, 90.0, epsilon = 1e-9);
        assert_relative_eq!(east.elevation_deg, 0.0, epsilon = 1e-9);

        let north = ecf_to_look(0.0, 0.0, site, Vec3::new(site.x, 0.0, 1500.0));
        assert!(north.azimuth_deg < 1e-9);
    }

    #[test]
    fn geodetic_height_on_equator_and_pole() {
        let equator = eci_to_geodetic(Vec3::new(EARTH_EQUATORIAL_RADIUS_KM + 500.0, 0.0, 0.0), 0.0);
        assert_relative_eq!(equator.height_km, 500.0, epsilon = 1e-6);
        assert_relative_eq!(equator.latitude_rad, 0.0, epsilon = 1e-12);

        let pole = eci_to_geodetic(Vec3::new(0.0, 0.0, EARTH_POLAR_RADIUS_KM + 800.0), 0.0);
        assert_relative_eq!(pole.height_km, 800.0, epsilon = 1e-6);
    }

    #[test]
    fn geodetic_longitude_accounts_for_rotation() {
        let geo = eci_to_geodetic(Vec3::new(0.0, 7000.0, 0.0), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(geo.longitude_rad, 0.0, epsilon = 1e-12);
    }
}

mod cities;

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::propagate::{geodetic_to_ecf, Vec3};

pub use cities::{nearest_city, NearestCity};

pub const FALLBACK_LATITUDE_DEG: f64 = 42.3601;
pub const FALLBACK_LONGITUDE_DEG: f64 = -71.0589;
pub const FALLBACK_LABEL: &str = "Boston, MA (fallback)";

#[derive(Debug, Error, PartialEq)]
pub enum ObserverError {
    #[error("expected \"lat, lon\", got {0:?}")]
    InvalidFormat(String),
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("altitude {0} km is negative")]
    NegativeAltitude(f64),
}

/// Ground site the sky is viewed from.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Observer {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
    pub label: String,
}

impl Default for Observer {
    fn default() -> Self {
        Self::fallback()
    }
}

impl Observer {
    pub fn new(
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_km: f64,
        label: impl Into<String>,
    ) -> Result<Self, ObserverError> {
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(ObserverError::LatitudeOutOfRange(latitude_deg));
        }
        if !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(ObserverError::LongitudeOutOfRange(longitude_deg));
        }
        if !(altitude_km >= 0.0) {
            return Err(ObserverError::NegativeAltitude(altitude_km));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
            altitude_km,
            label: label.into(),
        })
    }

    pub fn fallback() -> Self {
        Self {
            latitude_deg: FALLBACK_LATITUDE_DEG,
            longitude_deg: FALLBACK_LONGITUDE_DEG,
            altitude_km: 0.0,
            label: FALLBACK_LABEL.to_string(),
        }
    }

    /// Parses `"lat, lon"`. Without a label the coordinates themselves are
    /// used, to four decimals.
    pub fn from_coordinates(
        coordinates: &str,
        altitude_km: Option<f64>,
        label: Option<String>,
    ) -> Result<Self, ObserverError> {
        let invalid = || ObserverError::InvalidFormat(coordinates.to_string());
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return Err(invalid());
        }
        let lat: f64 = parts[0].parse().map_err(|_| invalid())?;
        let lon: f64 = parts[1].parse().map_err(|_| invalid())?;
        let label = label.unwrap_or_else(|| format!("{:.4}, {:.4}", lat, lon));
        Self::new(lat, lon, altitude_km.unwrap_or(0.0), label)
    }

    /// Like [`Observer::from_coordinates`], falling back to the default
    /// site when the coordinates are missing or unusable.
    pub fn from_coordinates_or_fallback(
        coordinates: Option<&str>,
        altitude_km: Option<f64>,
        label: Option<String>,
    ) -> Self {
        let Some(coordinates) = coordinates else {
            log::warn!("No observer coordinates configured, using {}", FALLBACK_LABEL);
            return Self::fallback();
        };
        match Self::from_coordinates(coordinates, altitude_km, label) {
            Ok(observer) => observer,
            Err(e) => {
                log::warn!("Invalid observer location ({}), using {}", e, FALLBACK_LABEL);
                Self::fallback()
            }
        }
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn position_ecf(&self) -> Vec3 {
        geodetic_to_ecf(self.lat_rad(), self.lon_rad(), self.altitude_km)
    }

    pub fn nearest_city(&self) -> Option<NearestCity> {
        nearest_city(self.latitude_deg, self.longitude_deg)
    }
}

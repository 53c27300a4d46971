use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::propagate::{LookAngle, Vec3};

/// A visible object for one tick: its look angles plus angular rate.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TrackedItem {
    pub name: String,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
    pub altitude_km: f64,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(skip)]
    pub position_ecf: Vec3,
    pub speed_deg_s: f64,
}

impl TrackedItem {
    pub fn from_look(look: LookAngle, speed_deg_s: f64) -> Self {
        Self {
            name: look.name,
            azimuth_deg: look.azimuth_deg,
            elevation_deg: look.elevation_deg,
            range_km: look.range_km,
            altitude_km: look.altitude_km,
            latitude_deg: look.latitude_deg,
            longitude_deg: look.longitude_deg,
            position_ecf: look.position_ecf,
            speed_deg_s,
        }
    }
}

/// Visibility thresholds, both inclusive on the visible side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cutoffs {
    #[serde(default)]
    pub elevation_deg: f64,
    #[serde(default = "default_altitude_cutoff")]
    pub altitude_km: f64,
}

fn default_altitude_cutoff() -> f64 {
    1000.0
}

impl Default for Cutoffs {
    fn default() -> Self {
        Self {
            elevation_deg: 0.0,
            altitude_km: default_altitude_cutoff(),
        }
    }
}

impl Cutoffs {
    pub fn admits(&self, look: &LookAngle) -> bool {
        look.elevation_deg >= self.elevation_deg && look.altitude_km <= self.altitude_km
    }
}

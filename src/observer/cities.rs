use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;
const KM_PER_MILE: f64 = 1.60934;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

struct City {
    name: &'static str,
    lat: f64,
    lon: f64,
}

const fn city(name: &'static str, lat: f64, lon: f64) -> City {
    City { name, lat, lon }
}

const MAJOR_CITIES: &[City] = &[
    city("Tokyo", 35.6762, 139.6503),
    city("Delhi", 28.7041, 77.1025),
    city("Shanghai", 31.2304, 121.4737),
    city("São Paulo", -23.5505, -46.6333),
    city("Mexico City", 19.4326, -99.1332),
    city("Cairo", 30.0444, 31.2357),
    city("Mumbai", 19.0760, 72.8777),
    city("Beijing", 39.9042, 116.4074),
    city("Dhaka", 23.8103, 90.4125),
    city("Osaka", 34.6937, 135.5023),
    city("New York", 40.7128, -74.0060),
    city("Karachi", 24.8607, 67.0011),
    city("Buenos Aires", -34.6037, -58.3816),
    city("Kolkata", 22.5726, 88.3639),
    city("Los Angeles", 34.0522, -118.2437),
    city("Jakarta", -6.2088, 106.8456),
    city("London", 51.5074, -0.1278),
    city("Paris", 48.8566, 2.3522),
    city("Moscow", 55.7558, 37.6173),
    city("Sydney", -33.8688, 151.2093),
    city("Toronto", 43.6532, -79.3832),
    city("Istanbul", 41.0082, 28.9784),
    city("Dubai", 25.2048, 55.2708),
    city("Singapore", 1.3521, 103.8198),
    city("Hong Kong", 22.3193, 114.1694),
    city("Bangkok", 13.7563, 100.5018),
    city("Boston", 42.3601, -71.0589),
    city("San Francisco", 37.7749, -122.4194),
    city("Chicago", 41.8781, -87.6298),
];

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NearestCity {
    pub name: String,
    pub distance_km: f64,
    pub bearing_deg: f64,
    pub direction: String,
}

impl NearestCity {
    pub fn distance_miles(&self) -> f64 {
        (self.distance_km / KM_PER_MILE).round()
    }
}

impl fmt::Display for NearestCity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Nearest Big City: {}, {} miles {}",
            self.name,
            self.distance_miles(),
            self.direction
        )
    }
}

/// Great-circle distance on a spherical Earth.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_MEAN_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Initial bearing from the first point to the second, 0 = north, clockwise.
pub fn initial_bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let d_lon = (lon2 - lon1).to_radians();
    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

pub fn compass_point(bearing_deg: f64) -> &'static str {
    let index = (bearing_deg / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

pub fn nearest_city(lat: f64, lon: f64) -> Option<NearestCity> {
    let (city, distance_km) = MAJOR_CITIES
        .iter()
        .map(|c| (c, haversine_km(lat, lon, c.lat, c.lon)))
        .min_by(|a, b| a.1.total_cmp(&b.1))?;

    let bearing_deg = initial_bearing_deg(lat, lon, city.lat, city.lon);
    Some(NearestCity {
        name: city.name.to_string(),
        distance_km,
        bearing_deg,
        direction: compass_point(bearing_deg).to_string(),
    })
}

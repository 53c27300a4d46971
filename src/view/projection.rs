use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which side of the plot east is drawn on. Looking up at the sky from
/// below, east sits on the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Mirror {
    #[default]
    EastRight,
    EastLeft,
}

impl Mirror {
    pub fn from_east_left(east_left: bool) -> Self {
        if east_left {
            Mirror::EastLeft
        } else {
            Mirror::EastRight
        }
    }

    fn sign(self) -> f64 {
        match self {
            Mirror::EastRight => 1.0,
            Mirror::EastLeft => -1.0,
        }
    }
}

/// Point on the polar plot, relative to its center. `y` grows downwards, so
/// north is negative `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct PlanePoint {
    pub x: f64,
    pub y: f64,
}

/// Maps azimuth/elevation onto a disc of `radius`: the zenith at the center,
/// the horizon on the rim.
pub fn project(azimuth_deg: f64, elevation_deg: f64, radius: f64, mirror: Mirror) -> PlanePoint {
    let el = elevation_deg.clamp(0.0, 90.0);
    let r = radius * (1.0 - el / 90.0);
    let az = azimuth_deg.to_radians();
    PlanePoint {
        x: mirror.sign() * r * az.sin(),
        y: -r * az.cos(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct GridRing {
    pub elevation_deg: f64,
    /// Ring radius as a fraction of the plot radius.
    pub relative_radius: f64,
    pub highlighted: bool,
}

/// Elevation rings for the plot: horizon, 30°, 60°, zenith and the cutoff.
pub fn grid_rings(elevation_cutoff_deg: f64) -> Vec<GridRing> {
    let cutoff = elevation_cutoff_deg.clamp(0.0, 90.0);
    let mut elevations = vec![0.0, cutoff, 30.0, 60.0, 90.0];
    elevations.sort_by(f64::total_cmp);
    elevations.dedup();

    elevations
        .into_iter()
        .map(|el| GridRing {
            elevation_deg: el,
            relative_radius: 1.0 - el / 90.0,
            highlighted: cutoff > 0.0 && el == cutoff,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CardinalPoint {
    pub label: String,
    pub anchor: PlanePoint,
}

pub fn cardinal_points(radius: f64, mirror: Mirror) -> [CardinalPoint; 4] {
    [("N", 0.0), ("E", 90.0), ("S", 180.0), ("W", 270.0)].map(|(label, az)| CardinalPoint {
        label: label.to_string(),
        anchor: project(az, 0.0, radius, mirror),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zenith_is_center() {
        for az in [0.0, 45.0, 200.0, 359.0] {
            let p = project(az, 90.0, 100.0, Mirror::EastRight);
            assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn horizon_is_rim() {
        let north = project(0.0, 0.0, 100.0, Mirror::EastRight);
        assert_abs_diff_eq!(north.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(north.y, -100.0, epsilon = 1e-9);

        let p = project(137.0, 0.0, 100.0, Mirror::EastRight);
        assert_abs_diff_eq!(p.x.hypot(p.y), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn below_horizon_clamps_to_rim() {
        let clamped = project(90.0, -12.0, 50.0, Mirror::EastRight);
        let rim = project(90.0, 0.0, 50.0, Mirror::EastRight);
        assert_eq!(clamped, rim);
    }

    #[test]
    fn mirror_flips_only_x() {
        let right = project(70.0, 30.0, 100.0, Mirror::EastRight);
        let left = project(70.0, 30.0, 100.0, Mirror::EastLeft);
        assert!(right.x > 0.0);
        assert_eq!(left.x, -right.x);
        assert_eq!(left.y, right.y);
    }

    #[test]
    fn rings_include_cutoff() {
        let rings = grid_rings(10.0);
        let elevations: Vec<f64> = rings.iter().map(|r| r.elevation_deg).collect();
        assert_eq!(elevations, vec![0.0, 10.0, 30.0, 60.0, 90.0]);
        assert_eq!(
            rings.iter().filter(|r| r.highlighted).count(),
            1,
            "only the cutoff ring is highlighted"
        );
        assert!(rings[1].highlighted);
        assert_eq!(rings[4].relative_radius, 0.0);
    }

    #[test]
    fn rings_dedupe_cutoff() {
        assert_eq!(grid_rings(30.0).len(), 4);
        let horizon = grid_rings(0.0);
        assert_eq!(horizon.len(), 4);
        assert!(horizon.iter().all(|r| !r.highlighted));
    }

    #[test]
    fn cardinal_points_follow_mirror() {
        let [n, e, s, w] = cardinal_points(100.0, Mirror::EastLeft);
        let labels = [&n, &e, &s, &w].map(|p| p.label.as_str());
        assert_eq!(labels, ["N", "E", "S", "W"]);
        assert_abs_diff_eq!(e.anchor.x, -100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(w.anchor.x, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.anchor.y, 100.0, epsilon = 1e-9);
    }
}

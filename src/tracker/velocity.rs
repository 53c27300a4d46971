use chrono::{DateTime, Utc};

use super::history::HistorySample;
use crate::propagate::Vec3;

/// Angle between two vectors in degrees; 0 when either has zero length.
pub fn angle_between_deg(a: Vec3, b: Vec3) -> f64 {
    let magnitudes = a.norm() * b.norm();
    if magnitudes == 0.0 {
        return 0.0;
    }
    // rounding can push the cosine slightly past +-1
    let cos_angle = (a.dot(&b) / magnitudes).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Observer-relative angular rate between a previous sample and the current
/// position, in degrees per second. Zero when time has not advanced.
pub fn angular_speed_deg_s(
    observer_ecf: Vec3,
    previous: &HistorySample,
    current_ecf: Vec3,
    now: DateTime<Utc>,
) -> f64 {
    let elapsed_s = (now - previous.at).num_microseconds().unwrap_or(i64::MAX) as f64 / 1e6;
    if elapsed_s <= 0.0 {
        return 0.0;
    }
    let before = previous.position_ecf - observer_ecf;
    let after = current_ecf - observer_ecf;
    angle_between_deg(after, before) / elapsed_s
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    fn sample(position_ecf: Vec3, at: DateTime<Utc>) -> HistorySample {
        HistorySample { position_ecf, at }
    }

    #[test]
    fn right_angle() {
        assert_relative_eq!(
            angle_between_deg(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0)),
            90.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn parallel_vectors_do_not_produce_nan() {
        let v = Vec3::new(0.1, 0.2, 0.3);
        let scaled = Vec3::new(0.1 * 7.0, 0.2 * 7.0, 0.3 * 7.0);
        let angle = angle_between_deg(v, scaled);
        assert!(angle.is_finite());
        assert!(angle < 1e-6);
    }

    #[test]
    fn zero_vector_gives_zero() {
        assert_eq!(angle_between_deg(Vec3::default(), Vec3::new(1.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn known_separation_one_second_apart() {
        let observer = Vec3::new(6378.137, 0.0, 0.0);
        let theta = 0.75_f64;
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0).unwrap();
        let t1 = t0 + Duration::seconds(1);

        let r = 1000.0;
        let previous = Vec3::new(observer.x + r, 0.0, 0.0);
        let current = Vec3::new(
            observer.x + r * theta.to_radians().cos(),
            r * theta.to_radians().sin(),
            0.0,
        );

        let speed = angular_speed_deg_s(observer, &sample(previous, t0), current, t1);
        assert_relative_eq!(speed, theta, epsilon = 1e-9);
    }

    #[test]
    fn rate_scales_with_elapsed_time() {
        let observer = Vec3::default();
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0).unwrap();
        let speed = angular_speed_deg_s(
            observer,
            &sample(Vec3::new(1.0, 0.0, 0.0), t0),
            Vec3::new(0.0, 1.0, 0.0),
            t0 + Duration::milliseconds(500),
        );
        assert_relative_eq!(speed, 180.0, epsilon = 1e-9);
    }

    #[test]
    fn identical_positions_or_no_elapsed_time_give_zero() {
        let observer = Vec3::new(6378.137, 0.0, 0.0);
        let p = Vec3::new(7000.0, 100.0, 50.0);
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0).unwrap();

        let still = angular_speed_deg_s(observer, &sample(p, t0), p, t0 + Duration::seconds(1));
        assert_relative_eq!(still, 0.0, epsilon = 1e-5);

        let moved = Vec3::new(0.0, 7000.0, 0.0);
        assert_eq!(angular_speed_deg_s(observer, &sample(p, t0), moved, t0), 0.0);
        assert_eq!(
            angular_speed_deg_s(observer, &sample(p, t0), moved, t0 - Duration::seconds(1)),
            0.0
        );
    }
}

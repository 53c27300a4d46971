use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum_macros::Display;
use utoipa::ToSchema;

use crate::tracker::TrackedItem;

/// Ordering of the visible list. Also selects the color mode.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
    Name,
    Altitude,
    Speed,
    Distance,
    #[default]
    Elevation,
}

impl SortKey {
    fn compare(self, a: &TrackedItem, b: &TrackedItem) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Altitude => b.altitude_km.total_cmp(&a.altitude_km),
            SortKey::Speed => b.speed_deg_s.total_cmp(&a.speed_deg_s),
            SortKey::Distance => a.range_km.total_cmp(&b.range_km),
            SortKey::Elevation => b.elevation_deg.total_cmp(&a.elevation_deg),
        }
    }
}

/// Sorts in place. Equal keys keep their incoming order.
pub fn rank(items: &mut [TrackedItem], key: SortKey) {
    items.sort_by(|a, b| key.compare(a, b));
}

pub fn matches_name(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(&needle.to_lowercase())
}

/// Keeps items whose name contains `text`, ignoring case.
pub fn filter_by_name(items: Vec<TrackedItem>, text: &str) -> Vec<TrackedItem> {
    let needle = text.trim();
    if needle.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|i| matches_name(&i.name, needle))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_items::item;
    use super::*;

    fn names(items: &[TrackedItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn altitude_is_descending() {
        let mut items = vec![item("A", 500.0, 10.0), item("B", 800.0, 10.0), item("C", 200.0, 10.0)];
        rank(&mut items, SortKey::Altitude);
        let altitudes: Vec<f64> = items.iter().map(|i| i.altitude_km).collect();
        assert_eq!(altitudes, vec![800.0, 500.0, 200.0]);
    }

    #[test]
    fn name_is_lexicographic() {
        let mut items = vec![item("NOAA 19", 850.0, 5.0), item("ISS", 420.0, 40.0), item("AQUA", 700.0, 20.0)];
        rank(&mut items, SortKey::Name);
        assert_eq!(names(&items), vec!["AQUA", "ISS", "NOAA 19"]);
    }

    #[test]
    fn distance_ascending_elevation_descending() {
        let mut items = vec![item("FAR", 900.0, 20.0), item("NEAR", 300.0, 70.0), item("MID", 600.0, 45.0)];
        rank(&mut items, SortKey::Distance);
        assert_eq!(names(&items), vec!["NEAR", "MID", "FAR"]);

        rank(&mut items, SortKey::Elevation);
        assert_eq!(names(&items), vec!["NEAR", "MID", "FAR"]);
    }

    #[test]
    fn speed_descending_and_stable() {
        let mut items = vec![item("A", 1.0, 1.0), item("B", 1.0, 1.0), item("C", 1.0, 1.0)];
        items[1].speed_deg_s = 0.9;
        rank(&mut items, SortKey::Speed);
        assert_eq!(names(&items), vec!["B", "A", "C"]);
    }

    #[test]
    fn name_filter_ignores_case() {
        let items = vec![item("STARLINK-1007", 550.0, 10.0), item("ISS (ZARYA)", 420.0, 30.0)];
        assert_eq!(names(&filter_by_name(items.clone(), "zarya")), vec!["ISS (ZARYA)"]);
        assert_eq!(filter_by_name(items.clone(), "  ").len(), 2);
        assert!(filter_by_name(items, "hubble").is_empty());
    }

    #[test]
    fn default_and_display() {
        assert_eq!(SortKey::default(), SortKey::Elevation);
        assert_eq!(SortKey::Distance.to_string(), "distance");
    }
}

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

use crate::propagate::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySample {
    pub position_ecf: Vec3,
    pub at: DateTime<Utc>,
}

/// Previous fixed-frame position per object name, carried from one tick to
/// the next.
#[derive(Debug, Default)]
pub struct VelocityHistory {
    samples: HashMap<String, HistorySample>,
}

impl VelocityHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&HistorySample> {
        self.samples.get(name)
    }

    pub fn upsert(&mut self, name: &str, position_ecf: Vec3, at: DateTime<Utc>) {
        let sample = HistorySample { position_ecf, at };
        match self.samples.get_mut(name) {
            Some(existing) => *existing = sample,
            None => {
                self.samples.insert(name.to_string(), sample);
            }
        }
    }

    /// Drops every sample whose name is not in `names`.
    pub fn retain_names(&mut self, names: &HashSet<&str>) {
        self.samples.retain(|name, _| names.contains(name.as_str()));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn upsert_overwrites() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut history = VelocityHistory::new();
        history.upsert("ISS", Vec3::new(1.0, 2.0, 3.0), t0);
        history.upsert("ISS", Vec3::new(4.0, 5.0, 6.0), t0 + Duration::seconds(1));

        assert_eq!(history.len(), 1);
        let sample = history.get("ISS").unwrap();
        assert_eq!(sample.position_ecf, Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(sample.at, t0 + Duration::seconds(1));
    }

    #[test]
    fn retain_drops_unlisted_names() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut history = VelocityHistory::new();
        history.upsert("A", Vec3::default(), t0);
        history.upsert("B", Vec3::default(), t0);

        history.retain_names(&HashSet::from(["B"]));
        assert!(history.get("A").is_none());
        assert!(history.get("B").is_some());

        history.retain_names(&HashSet::new());
        assert!(history.is_empty());
    }
}

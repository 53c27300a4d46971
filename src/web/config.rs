use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::observer::Observer;
use crate::tracker::Cutoffs;
use crate::view::ViewOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub observer: ObserverConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub view: ViewOptions,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObserverConfig {
    /// `"lat, lon"` in degrees.
    pub coordinates: Option<String>,
    #[serde(default)]
    pub altitude_km: f64,
    pub label: Option<String>,
}

impl ObserverConfig {
    pub fn observer(&self) -> Observer {
        Observer::from_coordinates_or_fallback(
            self.coordinates.as_deref(),
            Some(self.altitude_km),
            self.label.clone(),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub path: PathBuf,
    #[serde(default, deserialize_with = "optional_duration")]
    pub reload_interval: Option<Duration>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackingConfig {
    #[serde(default)]
    pub elevation_cutoff_deg: f64,
    #[serde(default = "default_altitude_cutoff")]
    pub altitude_cutoff_km: f64,
    #[serde(default = "default_interval", deserialize_with = "duration")]
    pub interval: Duration,
}

fn default_altitude_cutoff() -> f64 {
    Cutoffs::default().altitude_km
}

fn default_interval() -> Duration {
    Duration::from_secs(1)
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            elevation_cutoff_deg: 0.0,
            altitude_cutoff_km: default_altitude_cutoff(),
            interval: default_interval(),
        }
    }
}

impl TrackingConfig {
    pub fn cutoffs(&self) -> Cutoffs {
        Cutoffs {
            elevation_deg: self.elevation_cutoff_deg,
            altitude_km: self.altitude_cutoff_km,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

fn optional_duration<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Duration>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(s) => humantime::parse_duration(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Interval timers cannot run with a zero period.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.tracking.interval.is_zero() {
            return Err(ConfigError::Invalid("tracking.interval must be non-zero".into()));
        }
        if self.catalog.reload_interval.is_some_and(|d| d.is_zero()) {
            return Err(ConfigError::Invalid(
                "catalog.reload_interval must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::FALLBACK_LABEL;
    use crate::view::SortKey;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = Config::from_yaml("catalog:\n  path: tle_latest.txt\n").unwrap();
        assert_eq!(config.catalog.path, PathBuf::from("tle_latest.txt"));
        assert_eq!(config.catalog.reload_interval, None);
        assert_eq!(config.tracking.interval, Duration::from_secs(1));
        assert_eq!(config.tracking.cutoffs(), Cutoffs::default());
        assert_eq!(config.view, ViewOptions::default());
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.observer.observer().label, FALLBACK_LABEL);
    }

    #[test]
    fn full_config() {
        let yaml = r#"
observer:
  coordinates: "52.2297, 21.0122"
  altitude_km: 0.1
  label: Warsaw rooftop
catalog:
  path: /var/lib/tle/tle_latest.txt
  reload_interval: 6h
tracking:
  elevation_cutoff_deg: 10
  altitude_cutoff_km: 2000
  interval: 500ms
view:
  sort: speed
  colorize: true
  east_left: true
web:
  bind: 127.0.0.1:3000
"#;
        let config = Config::from_yaml(yaml).unwrap();
        let observer = config.observer.observer();
        assert_eq!(observer.label, "Warsaw rooftop");
        assert_eq!(observer.latitude_deg, 52.2297);
        assert_eq!(config.catalog.reload_interval, Some(Duration::from_secs(6 * 3600)));
        assert_eq!(config.tracking.interval, Duration::from_millis(500));
        assert_eq!(
            config.tracking.cutoffs(),
            Cutoffs {
                elevation_deg: 10.0,
                altitude_km: 2000.0
            }
        );
        assert_eq!(config.view.sort, SortKey::Speed);
        assert!(config.view.colorize);
        assert_eq!(config.view.radius, 100.0);
        assert_eq!(config.web.bind, "127.0.0.1:3000");
    }

    #[test]
    fn rejects_bad_duration_and_missing_catalog() {
        let bad = "catalog:\n  path: x\ntracking:\n  interval: soon\n";
        assert!(matches!(Config::from_yaml(bad), Err(ConfigError::Yaml(_))));
        assert!(matches!(Config::from_yaml("web:\n  bind: x\n"), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn rejects_zero_intervals() {
        let tick = "catalog:\n  path: x\ntracking:\n  interval: 0s\n";
        assert!(matches!(Config::from_yaml(tick), Err(ConfigError::Invalid(_))));

        let reload = "catalog:\n  path: x\n  reload_interval: 0ms\n";
        assert!(matches!(Config::from_yaml(reload), Err(ConfigError::Invalid(_))));

        let fine = "catalog:\n  path: x\n  reload_interval: 1m\ntracking:\n  interval: 250ms\n";
        assert!(Config::from_yaml(fine).is_ok());
    }

    #[test]
    fn invalid_coordinates_fall_back() {
        let config = Config::from_yaml("observer:\n  coordinates: \"95, 10\"\ncatalog:\n  path: x\n").unwrap();
        assert_eq!(config.observer.observer(), Observer::fallback());
    }
}

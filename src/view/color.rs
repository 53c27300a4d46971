use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

use super::ranking::SortKey;
use crate::tracker::TrackedItem;

const NAME_SATURATION: u8 = 70;
const METRIC_SATURATION: u8 = 85;
const LIGHTNESS: u8 = 60;
const METRIC_HUE_SPAN: f64 = 220.0;
const NAME_LEGEND_STOPS: u16 = 6;
const METRIC_LEGEND_STOPS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl Hsl {
    pub const NEUTRAL: Hsl = Hsl {
        hue: 200,
        saturation: 80,
        lightness: 60,
    };
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({} {}% {}%)", self.hue, self.saturation, self.lightness)
    }
}

/// Hue derived from the name: a 31-multiplier rolling hash over UTF-16
/// code units. The shift wraps at 32 bits but the running sum does not,
/// which is what browsers compute for `(h << 5) - h + c`.
pub fn name_hue(name: &str) -> u16 {
    let mut h: i64 = 0;
    for unit in name.encode_utf16() {
        h = i64::from((h as i32).wrapping_shl(5)) - h + i64::from(unit);
    }
    (h.unsigned_abs() % 360) as u16
}

pub fn name_color(name: &str) -> Hsl {
    Hsl {
        hue: name_hue(name),
        saturation: NAME_SATURATION,
        lightness: LIGHTNESS,
    }
}

/// Blue at `min` through red at `max`.
pub fn metric_color(min: f64, max: f64, value: f64) -> Hsl {
    if min == max {
        return Hsl::NEUTRAL;
    }
    let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
    Hsl {
        hue: (METRIC_HUE_SPAN - METRIC_HUE_SPAN * t).round() as u16,
        saturation: METRIC_SATURATION,
        lightness: LIGHTNESS,
    }
}

fn metric_value(key: SortKey, item: &TrackedItem) -> Option<f64> {
    match key {
        SortKey::Altitude => Some(item.altitude_km),
        SortKey::Speed => Some(item.speed_deg_s),
        SortKey::Distance => Some(item.range_km),
        SortKey::Name | SortKey::Elevation => None,
    }
}

fn metric_unit(key: SortKey) -> &'static str {
    match key {
        SortKey::Speed => "°/s",
        _ => "km",
    }
}

/// Color classification for one rendered set of items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorScale {
    Name,
    Metric { key: SortKey, min: f64, max: f64 },
}

impl ColorScale {
    /// Scale for `key` over `items`. Elevation has no color class, and an
    /// empty set has nothing to classify.
    pub fn for_items(key: SortKey, items: &[TrackedItem]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        match key {
            SortKey::Name => Some(ColorScale::Name),
            SortKey::Elevation => None,
            SortKey::Altitude | SortKey::Speed | SortKey::Distance => {
                let values = items.iter().filter_map(|i| metric_value(key, i));
                let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
                Some(ColorScale::Metric { key, min, max })
            }
        }
    }

    pub fn color_of(&self, item: &TrackedItem) -> Hsl {
        match *self {
            ColorScale::Name => name_color(&item.name),
            ColorScale::Metric { key, min, max } => {
                metric_color(min, max, metric_value(key, item).unwrap_or(min))
            }
        }
    }

    pub fn legend(&self) -> Legend {
        match *self {
            ColorScale::Name => Legend {
                stops: (0..=NAME_LEGEND_STOPS)
                    .map(|i| LegendStop {
                        color: Hsl {
                            hue: i * 60,
                            saturation: NAME_SATURATION,
                            lightness: LIGHTNESS,
                        },
                        offset_pct: percent(f64::from(i) / f64::from(NAME_LEGEND_STOPS)),
                    })
                    .collect(),
                min_label: None,
                max_label: None,
            },
            ColorScale::Metric { key, min, max } => {
                let unit = metric_unit(key);
                Legend {
                    stops: (0..=METRIC_LEGEND_STOPS)
                        .map(|i| {
                            let t = f64::from(i) / f64::from(METRIC_LEGEND_STOPS);
                            LegendStop {
                                color: metric_color(min, max, min + (max - min) * t),
                                offset_pct: percent(t),
                            }
                        })
                        .collect(),
                    min_label: Some(format!("{:.0} {}", min, unit)),
                    max_label: Some(format!("{:.0} {}", max, unit)),
                }
            }
        }
    }
}

fn percent(t: f64) -> u8 {
    (t * 100.0).round() as u8
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LegendStop {
    pub color: Hsl,
    pub offset_pct: u8,
}

/// Gradient stops and end labels for the active color scale.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Legend {
    pub stops: Vec<LegendStop>,
    pub min_label: Option<String>,
    pub max_label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ranking::test_items::item;

    #[test]
    fn name_hue_matches_browser_hash() {
        assert_eq!(name_hue(""), 0);
        assert_eq!(name_hue("a"), 97);
        assert_eq!(name_hue("ab"), 225);
        // sums past 2^31 are not folded back into 32 bits
        assert_eq!(name_hue("ISS (ZARYA)"), 199);
        assert_eq!(name_hue("STARLINK-1007"), 215);
        assert_eq!(name_color("NOAA 19").to_string(), "hsl(199 70% 60%)");
    }

    #[test]
    fn metric_runs_blue_to_red() {
        assert_eq!(metric_color(200.0, 800.0, 200.0).hue, 220);
        assert_eq!(metric_color(200.0, 800.0, 800.0).hue, 0);
        assert_eq!(metric_color(200.0, 800.0, 500.0).hue, 110);
        assert_eq!(metric_color(0.0, 1.0, 0.5).to_string(), "hsl(110 85% 60%)");
    }

    #[test]
    fn equal_bounds_are_neutral() {
        assert_eq!(metric_color(5.0, 5.0, 5.0), Hsl::NEUTRAL);
        assert_eq!(Hsl::NEUTRAL.to_string(), "hsl(200 80% 60%)");

        let items = vec![item("A", 550.0, 10.0), item("B", 550.0, 40.0)];
        let scale = ColorScale::for_items(SortKey::Altitude, &items).unwrap();
        assert!(items.iter().all(|i| scale.color_of(i) == Hsl::NEUTRAL));
    }

    #[test]
    fn scale_follows_sort_key() {
        let items = vec![item("LOW", 400.0, 10.0), item("HIGH", 900.0, 40.0)];
        assert_eq!(ColorScale::for_items(SortKey::Elevation, &items), None);
        assert_eq!(ColorScale::for_items(SortKey::Name, &[]), None);
        assert_eq!(
            ColorScale::for_items(SortKey::Altitude, &items),
            Some(ColorScale::Metric {
                key: SortKey::Altitude,
                min: 400.0,
                max: 900.0
            })
        );

        let scale = ColorScale::for_items(SortKey::Name, &items).unwrap();
        assert_eq!(scale.color_of(&items[0]), name_color("LOW"));
    }

    #[test]
    fn legends() {
        let name = ColorScale::Name.legend();
        assert_eq!(name.stops.len(), 7);
        assert_eq!(name.stops[6].color.hue, 360);
        assert_eq!(name.stops[3].offset_pct, 50);
        assert!(name.min_label.is_none());

        let speed = ColorScale::Metric {
            key: SortKey::Speed,
            min: 0.1,
            max: 2.6,
        }
        .legend();
        assert_eq!(speed.stops.len(), 11);
        assert_eq!(speed.stops[0].color.hue, 220);
        assert_eq!(speed.stops[10].color.hue, 0);
        assert_eq!(speed.min_label.as_deref(), Some("0 °/s"));
        assert_eq!(speed.max_label.as_deref(), Some("3 °/s"));

        let distance = ColorScale::Metric {
            key: SortKey::Distance,
            min: 512.4,
            max: 2100.0,
        }
        .legend();
        assert_eq!(distance.max_label.as_deref(), Some("2100 km"));
    }
}

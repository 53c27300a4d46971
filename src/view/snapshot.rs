use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::color::{ColorScale, Legend};
use super::projection::{
    cardinal_points, grid_rings, project, CardinalPoint, GridRing, Mirror, PlanePoint,
};
use super::ranking::{filter_by_name, rank, SortKey};
use crate::tracker::{SelectionSet, TrackedItem};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ViewOptions {
    pub sort: SortKey,
    pub colorize: bool,
    pub east_left: bool,
    /// Plot radius in output units.
    pub radius: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            sort: SortKey::default(),
            colorize: false,
            east_left: false,
            radius: 100.0,
        }
    }
}

impl ViewOptions {
    pub fn mirror(&self) -> Mirror {
        Mirror::from_east_left(self.east_left)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SkyEntry {
    #[serde(flatten)]
    pub item: TrackedItem,
    pub selected: bool,
    /// CSS color when colorizing by a key that has a color class.
    pub color: Option<String>,
    pub point: PlanePoint,
    pub meta: String,
}

/// One tick's visible set, ready to render or list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SkySnapshot {
    pub generated_at: DateTime<Utc>,
    pub sort: SortKey,
    pub visible: usize,
    pub entries: Vec<SkyEntry>,
    pub legend: Option<Legend>,
    pub rings: Vec<GridRing>,
    pub cardinals: Vec<CardinalPoint>,
}

impl SkySnapshot {
    pub fn build(
        items: &[TrackedItem],
        selection: &SelectionSet,
        options: &ViewOptions,
        filter: &str,
        elevation_cutoff_deg: f64,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let mut items = filter_by_name(items.to_vec(), filter);
        rank(&mut items, options.sort);

        let scale = if options.colorize {
            ColorScale::for_items(options.sort, &items)
        } else {
            None
        };
        let mirror = options.mirror();

        let entries: Vec<SkyEntry> = items
            .into_iter()
            .map(|item| SkyEntry {
                selected: selection.contains(&item.name),
                color: scale.map(|s| s.color_of(&item).to_string()),
                point: project(item.azimuth_deg, item.elevation_deg, options.radius, mirror),
                meta: format_entry_meta(&item),
                item,
            })
            .collect();

        Self {
            generated_at,
            sort: options.sort,
            visible: entries.len(),
            entries,
            legend: scale.map(|s| s.legend()),
            rings: grid_rings(elevation_cutoff_deg),
            cardinals: cardinal_points(options.radius, mirror).to_vec(),
        }
    }
}

/// `Az 123° · El 45° · Alt 550 km · Range 800 km · Speed 0.52°/s`
pub fn format_entry_meta(item: &TrackedItem) -> String {
    format!(
        "Az {:.0}° · El {:.0}° · Alt {:.0} km · Range {:.0} km · Speed {:.2}°/s",
        item.azimuth_deg, item.elevation_deg, item.altitude_km, item.range_km, item.speed_deg_s
    )
}

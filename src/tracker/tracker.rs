use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use utoipa::ToSchema;

use super::error::TrackerError;
use super::history::VelocityHistory;
use super::selection::SelectionSet;
use super::types::{Cutoffs, TrackedItem};
use super::velocity::angular_speed_deg_s;
use crate::catalog::{Catalog, CatalogHandle};
use crate::observer::Observer;
use crate::propagate::{gmst, look_angles_from, LookAngle};

struct TickOutcome {
    items: Vec<TrackedItem>,
    propagated: usize,
}

/// Runs one tick over `catalog` at `instant`.
///
/// Returns the visible items in catalog order. `history` ends up holding
/// exactly this tick's positions, and `selection` loses every name that is
/// not visible.
pub fn tick(
    catalog: &Catalog,
    instant: DateTime<Utc>,
    observer: &Observer,
    cutoffs: &Cutoffs,
    history: &mut VelocityHistory,
    selection: &mut SelectionSet,
) -> Vec<TrackedItem> {
    run_tick(catalog, instant, observer, cutoffs, history, selection).items
}

fn run_tick(
    catalog: &Catalog,
    instant: DateTime<Utc>,
    observer: &Observer,
    cutoffs: &Cutoffs,
    history: &mut VelocityHistory,
    selection: &mut SelectionSet,
) -> TickOutcome {
    let gmst = gmst(instant);
    let observer_ecf = observer.position_ecf();

    let mut propagated = 0;
    let visible: Vec<LookAngle> = catalog
        .records()
        .iter()
        .filter_map(|record| look_angles_from(record, instant, gmst, observer, observer_ecf))
        .inspect(|_| propagated += 1)
        .filter(|look| cutoffs.admits(look))
        .collect();

    let items: Vec<TrackedItem> = visible
        .into_iter()
        .map(|look| {
            let speed = history
                .get(&look.name)
                .map(|previous| {
                    angular_speed_deg_s(observer_ecf, previous, look.position_ecf, instant)
                })
                .unwrap_or(0.0);
            history.upsert(&look.name, look.position_ecf, instant);
            TrackedItem::from_look(look, speed)
        })
        .collect();

    let names: HashSet<&str> = items.iter().map(|i| i.name.as_str()).collect();
    history.retain_names(&names);
    let evicted = selection.retain_visible(&names);
    if !evicted.is_empty() {
        log::debug!("Deselected {} objects that left view: {:?}", evicted.len(), evicted);
    }

    TickOutcome { items, propagated }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TrackingStatus {
    pub running: bool,
    pub last_tick: Option<DateTime<Utc>>,
    pub catalog_records: usize,
    pub propagated: usize,
    pub visible: usize,
    pub selected: Vec<String>,
    pub cutoffs: Cutoffs,
}

/// Tracking state carried between ticks.
pub struct Tracker {
    catalog: CatalogHandle,
    observer: Observer,
    cutoffs: Cutoffs,
    history: VelocityHistory,
    selection: SelectionSet,
    running: bool,
    items: Vec<TrackedItem>,
    propagated: usize,
    last_tick: Option<DateTime<Utc>>,
}

impl Tracker {
    pub fn new(catalog: CatalogHandle, observer: Observer, cutoffs: Cutoffs) -> Self {
        Self {
            catalog,
            observer,
            cutoffs,
            history: VelocityHistory::new(),
            selection: SelectionSet::new(),
            running: true,
            items: Vec::new(),
            propagated: 0,
            last_tick: None,
        }
    }

    /// Ticks at `instant` unless paused. A paused tracker returns the
    /// previous tick's items and leaves its history alone.
    pub fn tick_at(&mut self, instant: DateTime<Utc>) -> &[TrackedItem] {
        if !self.running {
            return &self.items;
        }

        let outcome = match self.catalog.snapshot() {
            Some(catalog) => run_tick(
                &catalog,
                instant,
                &self.observer,
                &self.cutoffs,
                &mut self.history,
                &mut self.selection,
            ),
            None => {
                log::warn!("Tick at {} without a loaded catalog", instant);
                self.history.retain_names(&HashSet::new());
                self.selection.retain_visible(&HashSet::new());
                TickOutcome {
                    items: Vec::new(),
                    propagated: 0,
                }
            }
        };

        log::debug!(
            "Tick {}: {} propagated, {} visible, {} tracked",
            instant,
            outcome.propagated,
            outcome.items.len(),
            self.history.len()
        );

        self.items = outcome.items;
        self.propagated = outcome.propagated;
        self.last_tick = Some(instant);
        &self.items
    }

    pub fn items(&self) -> &[TrackedItem] {
        &self.items
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Selects or deselects a currently visible object.
    pub fn toggle_selection(&mut self, name: &str) -> Result<bool, TrackerError> {
        if !self.items.iter().any(|i| i.name == name) {
            return Err(TrackerError::NotVisible(name.to_string()));
        }
        Ok(self.selection.toggle(name))
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pause(&mut self) {
        if self.running {
            log::info!("Tracking paused");
        }
        self.running = false;
    }

    pub fn resume(&mut self) {
        if !self.running {
            log::info!("Tracking resumed");
        }
        self.running = true;
    }

    pub fn toggle_running(&mut self) -> bool {
        if self.running {
            self.pause();
        } else {
            self.resume();
        }
        self.running
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn set_observer(&mut self, observer: Observer) {
        log::info!(
            "Observer set to {} ({:.4}, {:.4})",
            observer.label,
            observer.latitude_deg,
            observer.longitude_deg
        );
        self.observer = observer;
    }

    pub fn cutoffs(&self) -> Cutoffs {
        self.cutoffs
    }

    pub fn set_cutoffs(&mut self, cutoffs: Cutoffs) {
        log::info!(
            "Cutoffs set to elevation >= {}°, altitude <= {} km",
            cutoffs.elevation_deg,
            cutoffs.altitude_km
        );
        self.cutoffs = cutoffs;
    }

    /// Propagated and visible counts of the last tick.
    pub fn totals(&self) -> (usize, usize) {
        (self.propagated, self.items.len())
    }

    pub fn catalog(&self) -> &CatalogHandle {
        &self.catalog
    }

    pub fn status(&self) -> TrackingStatus {
        let (propagated, visible) = self.totals();
        TrackingStatus {
            running: self.running,
            last_tick: self.last_tick,
            catalog_records: self.catalog.snapshot().map(|c| c.len()).unwrap_or(0),
            propagated,
            visible,
            selected: self.selection.iter().map(String::from).collect(),
            cutoffs: self.cutoffs,
        }
    }
}

mod error;
mod history;
mod selection;
mod tracker;
mod types;
mod velocity;

pub use error::TrackerError;
pub use history::VelocityHistory;
pub use selection::SelectionSet;
pub use tracker::{tick, Tracker, TrackingStatus};
pub use types::{Cutoffs, TrackedItem};

mod color;
mod projection;
mod ranking;
mod snapshot;

pub use color::Legend;
pub use ranking::SortKey;
pub use snapshot::{SkyEntry, SkySnapshot, ViewOptions};

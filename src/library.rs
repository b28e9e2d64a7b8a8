//! Directory loading and tag lookup for playlist entries.

mod scan;
mod tags;

pub use scan::scan;
pub use tags::{TrackTags, display_name, read_tags};

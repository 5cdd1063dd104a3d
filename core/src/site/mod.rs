pub mod registry;
pub mod signal;

pub use registry::{ActiveSiteSelection, SiteRegistry};
pub use signal::{Coordinate, SignalSite, SiteId};

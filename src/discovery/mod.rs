//! Проба адресов из внешнего discovery и дедупликация найденных принтеров.

pub mod probe;
pub mod registry;

pub use probe::{DISCOVERY_FIELDS, DiscoveredPrinter, DiscoveryError, DiscoveryProbe, GENERATIONS};
pub use registry::{DiscoveryOutcome, DiscoveryRegistry, DiscoveryService};

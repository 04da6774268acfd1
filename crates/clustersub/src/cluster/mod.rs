pub mod accelerator;
pub mod profile;

pub use accelerator::{ResourceDescriptor, map_accelerator};
pub use profile::{ClusterProfile, ConfigLookup, JobKind};

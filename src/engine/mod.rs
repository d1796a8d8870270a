mod company;
mod cycles;
mod structure;
mod traversal;
pub(crate) mod walk;

pub use company::extract_by_organization;
pub use cycles::{CycleGroup, cycle_groups, strong_components};
pub use structure::{DepthMap, depths, descendants, path_to_root};
pub use traversal::extract;

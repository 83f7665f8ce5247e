pub mod partition;
pub mod strips;

pub use partition::partition;
pub use strips::{Strip, slice_strips};

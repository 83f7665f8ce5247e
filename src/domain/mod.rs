pub mod boundary;
pub mod point;
pub mod section;

pub use boundary::BoundaryPolygon;
pub use point::{GeoPoint, centroid};
pub use section::{COLOR_CYCLE, SampledPoint, Section};

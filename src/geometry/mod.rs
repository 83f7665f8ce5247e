pub mod primitives;
pub mod projection;
pub mod region;
pub mod scaling;

pub use primitives::{EARTH_RADIUS_M, haversine_distance_meters, is_point_in_polygon};
pub use projection::{Projector, area_hectares};
pub use region::MapRegion;
pub use scaling::{Bounds, CanvasProjection, NormalizedMap, NormalizedPoint, normalize};

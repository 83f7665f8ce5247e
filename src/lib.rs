//! harvestmap - Partition farm boundaries into inspection sections and sample observation points

pub mod capture;
pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod observation;
pub mod render;
pub mod sampling;
pub mod sections;
pub mod store;

pub use domain::{BoundaryPolygon, GeoPoint, SampledPoint, Section};
pub use error::GeometryError;
pub use geometry::{haversine_distance_meters, is_point_in_polygon, normalize};
pub use sampling::sample_one_per_section;
pub use sections::partition;

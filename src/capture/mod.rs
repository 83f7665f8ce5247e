pub mod parser;

pub use parser::{
    BoundaryRecord, CaptureError, CaptureReport, load_boundary, parse_boundary_json,
    sort_around_centroid,
};

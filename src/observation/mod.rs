pub mod generate;
pub mod point;

pub use generate::{
    DEFAULT_SECTIONS, ObservationError, SamplingPlan, SectionStrategy, generate_points,
    get_or_generate, sections_for_points,
};
pub use point::{ObservationPoint, ObservationStatus, dedupe};

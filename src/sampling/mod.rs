pub mod sampler;

pub use sampler::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_MIN_SEPARATION_M, SectionSampler, draw_in_section,
    sample_one_per_section,
};

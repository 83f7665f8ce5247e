use rand::Rng;
use tracing::debug;

use crate::domain::{GeoPoint, SampledPoint, Section};
use crate::geometry::haversine_distance_meters;

pub const DEFAULT_MIN_SEPARATION_M: f64 = 100.0;
pub const DEFAULT_MAX_ATTEMPTS: usize = 50;

/// Draws one observation point inside each section
///
/// Candidates closer than `min_separation_m` to an already accepted point
/// (from any earlier section) are redrawn, up to `max_attempts` draws per
/// section. When every draw is rejected the last one is kept anyway, so a
/// call always yields exactly one point per section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSampler {
    pub min_separation_m: f64,
    pub max_attempts: usize,
}

impl Default for SectionSampler {
    fn default() -> Self {
        Self {
            min_separation_m: DEFAULT_MIN_SEPARATION_M,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl SectionSampler {
    pub fn new(min_separation_m: f64, max_attempts: usize) -> Self {
        Self {
            min_separation_m,
            max_attempts,
        }
    }

    /// Sample with the caller's random source, in section order
    pub fn sample<R: Rng + ?Sized>(&self, sections: &[Section], rng: &mut R) -> Vec<SampledPoint> {
        let attempts = self.max_attempts.max(1);
        let mut accepted: Vec<SampledPoint> = Vec::with_capacity(sections.len());

        for section in sections {
            let mut candidate = draw_in_section(section, rng);
            let mut tries = 1;

            while !self.is_separated(&candidate, &accepted) {
                if tries >= attempts {
                    debug!(
                        section = section.index,
                        attempts, "no candidate met the separation, keeping the last draw"
                    );
                    break;
                }
                candidate = draw_in_section(section, rng);
                tries += 1;
            }

            accepted.push(SampledPoint::new(candidate, section.index));
        }

        accepted
    }

    fn is_separated(&self, candidate: &GeoPoint, accepted: &[SampledPoint]) -> bool {
        accepted
            .iter()
            .all(|p| haversine_distance_meters(candidate, &p.position()) >= self.min_separation_m)
    }
}

/// One point per section with the default separation and attempt budget,
/// using the thread-local generator
pub fn sample_one_per_section(sections: &[Section]) -> Vec<SampledPoint> {
    SectionSampler::default().sample(sections, &mut rand::rng())
}

/// Uniform draw inside the triangle (centroid, vertex_a, vertex_b)
///
/// Draws two uniforms and folds pairs with `r1 + r2 > 1` back into the
/// triangle, which keeps the distribution uniform over its area.
pub fn draw_in_section<R: Rng + ?Sized>(section: &Section, rng: &mut R) -> GeoPoint {
    let mut r1: f64 = rng.random();
    let mut r2: f64 = rng.random();
    if r1 + r2 > 1.0 {
        r1 = 1.0 - r1;
        r2 = 1.0 - r2;
    }
    let r3 = 1.0 - r1 - r2;

    let [c, a, b] = section.corners();
    GeoPoint::new(
        r1 * c.latitude + r2 * a.latitude + r3 * b.latitude,
        r1 * c.longitude + r2 * a.longitude + r3 * b.longitude,
    )
}

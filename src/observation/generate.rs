use rand::Rng;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use super::point::{ObservationPoint, dedupe};
use crate::domain::{BoundaryPolygon, Section};
use crate::error::GeometryError;
use crate::sampling::SectionSampler;
use crate::sections::{partition, slice_strips};
use crate::store::{ObservationStore, StoreError};

pub const DEFAULT_SECTIONS: usize = 6;

/// How a boundary is split into sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SectionStrategy {
    /// Triangular wedges around the centroid, one random point each
    #[default]
    Wedge,
    /// Equal-width north-south strips, one central point each
    Strip,
}

/// Everything needed to turn a boundary into observation points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingPlan {
    pub strategy: SectionStrategy,
    pub sections: usize,
    pub sampler: SectionSampler,
}

impl Default for SamplingPlan {
    fn default() -> Self {
        Self {
            strategy: SectionStrategy::Wedge,
            sections: DEFAULT_SECTIONS,
            sampler: SectionSampler::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ObservationError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Build fresh observation points for a boundary
pub fn generate_points<R: Rng + ?Sized>(
    farm_id: u64,
    boundary: &BoundaryPolygon,
    plan: &SamplingPlan,
    rng: &mut R,
) -> Result<Vec<ObservationPoint>, GeometryError> {
    let points = match plan.strategy {
        SectionStrategy::Wedge => {
            let sections = partition(boundary, plan.sections)?;
            plan.sampler
                .sample(&sections, rng)
                .iter()
                .map(|sampled| ObservationPoint::from_sampled(farm_id, sampled))
                .collect()
        }
        SectionStrategy::Strip => slice_strips(boundary, plan.sections)?
            .iter()
            .filter_map(|strip| ObservationPoint::from_strip(farm_id, strip))
            .collect(),
    };

    Ok(points)
}

/// Wedges matching a set of observation points, for drawing them together
///
/// Stored points may come from a run with a different section count, so the
/// boundary is partitioned once per point. Strip points get no wedges.
pub fn sections_for_points(
    boundary: &BoundaryPolygon,
    strategy: SectionStrategy,
    points: &[ObservationPoint],
) -> Result<Vec<Section>, GeometryError> {
    match strategy {
        SectionStrategy::Wedge => partition(boundary, points.len()),
        SectionStrategy::Strip => Ok(Vec::new()),
    }
}

/// Return the farm's stored points, generating and saving them on first use
///
/// Stored duplicates (several points for one segment) are collapsed and
/// written back before anything else happens.
pub fn get_or_generate<S, R>(
    store: &mut S,
    farm_id: u64,
    boundary: &BoundaryPolygon,
    plan: &SamplingPlan,
    rng: &mut R,
) -> Result<Vec<ObservationPoint>, ObservationError>
where
    S: ObservationStore + ?Sized,
    R: Rng + ?Sized,
{
    let existing = store.load(farm_id)?;
    let stored_count = existing.len();
    let existing = dedupe(existing);
    if existing.len() != stored_count {
        debug!(
            farm_id,
            removed = stored_count - existing.len(),
            "removing duplicate observation points"
        );
        store.write(farm_id, &existing)?;
    }

    if !existing.is_empty() {
        info!(farm_id, count = existing.len(), "using stored observation points");
        return Ok(existing);
    }

    let generated = generate_points(farm_id, boundary, plan, rng)?;
    info!(farm_id, count = generated.len(), "generated observation points");
    Ok(store.save(farm_id, &generated)?)
}

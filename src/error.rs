use thiserror::Error;

/// Hard failures of the geometry core.
///
/// Everything else in the core degrades through output shape (empty map,
/// closer-than-requested sample) instead of erroring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("boundary needs at least 3 points, found {found}")]
    InsufficientPoints { found: usize },
}

impl GeometryError {
    pub fn insufficient(found: usize) -> Self {
        GeometryError::InsufficientPoints { found }
    }
}

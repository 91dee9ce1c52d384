//! Geographic bounding box used to scope building queries.

use thiserror::Error;

/// Validation failures for [`BoundingBox`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundingBoxValidationError {
    /// One of the bounds was NaN or infinite.
    #[error("bound `{bound}` must be a finite number")]
    NonFinite {
        /// Name of the offending bound.
        bound: &'static str,
    },
}

/// Rectangle in EPSG:4326 degrees, stored as south/west/north/east.
///
/// Only finiteness is enforced. Inverted or zero-area boxes are accepted and
/// simply match nothing upstream.
///
/// # Examples
/// ```
/// use solar_backend::domain::BoundingBox;
///
/// let bounds = BoundingBox::try_new(40.99, 29.00, 41.01, 29.02).expect("finite bounds");
/// assert!(!bounds.is_degenerate());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

impl BoundingBox {
    /// Build a bounding box, rejecting non-finite bounds.
    pub fn try_new(
        south: f64,
        west: f64,
        north: f64,
        east: f64,
    ) -> Result<Self, BoundingBoxValidationError> {
        for (bound, value) in [
            ("south", south),
            ("west", west),
            ("north", north),
            ("east", east),
        ] {
            if !value.is_finite() {
                return Err(BoundingBoxValidationError::NonFinite { bound });
            }
        }
        Ok(Self {
            south,
            west,
            north,
            east,
        })
    }

    /// Southern latitude bound.
    pub fn south(&self) -> f64 {
        self.south
    }

    /// Western longitude bound.
    pub fn west(&self) -> f64 {
        self.west
    }

    /// Northern latitude bound.
    pub fn north(&self) -> f64 {
        self.north
    }

    /// Eastern longitude bound.
    pub fn east(&self) -> f64 {
        self.east
    }

    /// Whether the box encloses no area (`south >= north` or `west >= east`).
    pub fn is_degenerate(&self) -> bool {
        self.south >= self.north || self.west >= self.east
    }
}

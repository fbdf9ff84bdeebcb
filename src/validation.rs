//! Validation for spaces, planes, and query regions.
//!
//! Everything here runs eagerly at build or query entry so that an index
//! is never constructed, or walked, in an inconsistent state.

use crate::error::{Result, SkylioError};
use crate::geometry::HyperBox;
use crate::plane::HyperPlane;

/// Validates the index space: dimensionality, finite bounds, and a
/// strictly positive extent on every axis.
pub fn validate_space(space: &HyperBox, dims: usize) -> Result<()> {
    if space.dims() != dims {
        return Err(SkylioError::DimensionMismatch {
            expected: dims,
            found: space.dims(),
        });
    }
    for axis in 0..dims {
        let (lo, hi) = (space.min(axis), space.max(axis));
        if !lo.is_finite() || !hi.is_finite() {
            return Err(SkylioError::InvalidInput(format!(
                "space bounds must be finite, axis {} is [{}, {}]",
                axis, lo, hi
            )));
        }
        if hi <= lo {
            return Err(SkylioError::EmptySpace(format!(
                "axis {} has extent {}",
                axis,
                hi - lo
            )));
        }
    }
    Ok(())
}

/// Validates every plane: dimensionality, finite coefficients, and a
/// non-zero weight.
pub fn validate_planes(planes: &[HyperPlane], dims: usize) -> Result<()> {
    for (idx, plane) in planes.iter().enumerate() {
        if plane.dims() != dims {
            return Err(SkylioError::DimensionMismatch {
                expected: dims,
                found: plane.dims(),
            });
        }
        if plane.weight == 0 {
            return Err(SkylioError::InvalidInput(format!(
                "plane at index {} has zero weight",
                idx
            )));
        }
        if !plane.offset.is_finite() || plane.slopes.iter().any(|s| !s.is_finite()) {
            return Err(SkylioError::InvalidInput(format!(
                "plane at index {} has non-finite coefficients",
                idx
            )));
        }
    }
    Ok(())
}

/// Validates a query region: dimensionality, finite bounds, and
/// non-inverted extents. A degenerate (zero-extent) query region is
/// allowed; an inverted one is not.
pub fn validate_query_region(region: &HyperBox, dims: usize) -> Result<()> {
    if region.dims() != dims {
        return Err(SkylioError::DimensionMismatch {
            expected: dims,
            found: region.dims(),
        });
    }
    for axis in 0..dims {
        let (lo, hi) = (region.min(axis), region.max(axis));
        if !lo.is_finite() || !hi.is_finite() {
            return Err(SkylioError::InvalidInput(format!(
                "query region bounds must be finite, axis {} is [{}, {}]",
                axis, lo, hi
            )));
        }
        if hi < lo {
            return Err(SkylioError::InvalidInput(format!(
                "query region is inverted on axis {}",
                axis
            )));
        }
    }
    Ok(())
}

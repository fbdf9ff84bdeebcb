//! Dual-space boundaries and their dominance predicates.
//!
//! Each uncertain-object instance is represented by the hyperplane
//! `z = offset + Σ slope_d · x_d` over the first `D-1` axes of the dual
//! space. Dominance between instances reduces to one plane lying above
//! another over a region, which for affine surfaces can be decided at
//! region corners alone.

use crate::geometry::{HyperBox, Point};
use crate::types::{InstanceId, ObjectId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One mutually exclusive instance of an uncertain object, in dual form.
///
/// `weight` doubles as the instance ordinal and the probability-mass
/// denominator of the inclusion-exclusion recurrence; the index takes it
/// pre-scaled and never normalizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HyperPlane {
    /// Owning object.
    pub object_id: ObjectId,
    /// This instance, unique across the plane set.
    pub instance_id: InstanceId,
    /// Instance ordinal / probability denominator, at least 1.
    pub weight: u32,
    /// Slope per slope-domain axis; length is `dims - 1`.
    pub slopes: Vec<f64>,
    /// Value-axis intercept.
    pub offset: f64,
}

impl HyperPlane {
    pub fn new(
        object_id: ObjectId,
        instance_id: InstanceId,
        weight: u32,
        slopes: Vec<f64>,
        offset: f64,
    ) -> Self {
        Self {
            object_id,
            instance_id,
            weight,
            slopes,
            offset,
        }
    }

    /// Dimensionality of the dual space this plane lives in.
    pub fn dims(&self) -> usize {
        self.slopes.len() + 1
    }

    /// Plane value at a slope-domain position (`coords.len() == dims - 1`).
    pub fn eval(&self, coords: &[f64]) -> f64 {
        debug_assert_eq!(coords.len(), self.slopes.len());
        self.offset
            + self
                .slopes
                .iter()
                .zip(coords)
                .map(|(s, x)| s * x)
                .sum::<f64>()
    }

    /// Minimum and maximum plane value over a region's slope domain.
    /// Affine in every axis, so each axis contributes its own extreme.
    pub fn value_range(&self, region: &HyperBox) -> (f64, f64) {
        let mut lo = self.offset;
        let mut hi = self.offset;
        for (d, s) in self.slopes.iter().enumerate() {
            let a = s * region.min(d);
            let b = s * region.max(d);
            lo += a.min(b);
            hi += a.max(b);
        }
        (lo, hi)
    }

    /// Whether the plane lies strictly above the whole region. A plane
    /// touching the region's top face classifies as crossing instead.
    pub fn is_above(&self, region: &HyperBox) -> bool {
        let value_axis = region.dims() - 1;
        self.value_range(region).0 > region.max(value_axis)
    }

    /// Whether the plane's surface intersects the region's value extent.
    pub fn crosses(&self, region: &HyperBox) -> bool {
        let value_axis = region.dims() - 1;
        let (lo, hi) = self.value_range(region);
        lo <= region.max(value_axis) && hi >= region.min(value_axis)
    }

    /// Whether this plane dominates `other` everywhere over the query
    /// region's slope domain: at least as high at every slope corner and
    /// strictly higher at one. Coincident planes dominate nothing.
    pub fn restricted_dominates(&self, other: &HyperPlane, query: &HyperBox) -> bool {
        let corners = 1usize << (query.dims() - 1);
        let mut strict = false;
        let mut corner: Point = SmallVec::new();
        for mask in 0..corners {
            slope_corner(query, mask, &mut corner);
            let mine = self.eval(&corner);
            let theirs = other.eval(&corner);
            if mine < theirs {
                return false;
            }
            if mine > theirs {
                strict = true;
            }
        }
        strict
    }

    /// The plane's witness points for a query region: its own value at
    /// each of the region's `2^(D-1)` slope corners, in corner-mask
    /// order. The query walk consumes one per index level.
    pub fn witness_points(&self, query: &HyperBox) -> SmallVec<[Point; 4]> {
        let corners = 1usize << (query.dims() - 1);
        let mut points = SmallVec::with_capacity(corners);
        let mut corner: Point = SmallVec::new();
        for mask in 0..corners {
            slope_corner(query, mask, &mut corner);
            let mut point = corner.clone();
            point.push(self.eval(&corner));
            points.push(point);
        }
        points
    }
}

/// Fill `buf` with the `mask`-th corner of the region's slope domain
/// (bit `d` selects the maximum on axis `d`).
fn slope_corner(region: &HyperBox, mask: usize, buf: &mut Point) {
    buf.clear();
    for d in 0..region.dims() - 1 {
        if mask & (1 << d) != 0 {
            buf.push(region.max(d));
        } else {
            buf.push(region.min(d));
        }
    }
}

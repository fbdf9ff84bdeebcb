//! Axis-aligned regions of the dual space.
//!
//! A [`HyperBox`] is the unit of spatial recursion: the index repeatedly
//! splits a box into `2^D` equal children and locates query points inside
//! them. The first `D-1` axes form the slope domain over which planes are
//! affine; the last axis is the value axis.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A point in the dual space, kept inline for the common low dimensions.
pub type Point = SmallVec<[f64; 4]>;

/// An axis-aligned hyper-rectangle of fixed dimensionality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HyperBox {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl HyperBox {
    /// Create a box from per-axis minima and maxima.
    ///
    /// # Panics
    ///
    /// Panics if `min` and `max` differ in length or are empty. Value
    /// validity (finiteness, positive extent) is checked at index build
    /// time, not here.
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> Self {
        assert_eq!(
            min.len(),
            max.len(),
            "min and max must have the same dimensionality"
        );
        assert!(!min.is_empty(), "a box must have at least one axis");
        Self { min, max }
    }

    /// Create a cube spanning `[lo, hi]` on every axis.
    pub fn cube(dims: usize, lo: f64, hi: f64) -> Self {
        Self::new(vec![lo; dims], vec![hi; dims])
    }

    /// Dimensionality of the box.
    pub fn dims(&self) -> usize {
        self.min.len()
    }

    /// Minimum coordinate on `axis`.
    pub fn min(&self, axis: usize) -> f64 {
        self.min[axis]
    }

    /// Maximum coordinate on `axis`.
    pub fn max(&self, axis: usize) -> f64 {
        self.max[axis]
    }

    /// Extent of the box on `axis`.
    pub fn extent(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    /// Midpoint of the box on `axis`.
    pub fn center(&self, axis: usize) -> f64 {
        (self.min[axis] + self.max[axis]) / 2.0
    }

    /// Check whether `point` lies inside the box (boundary inclusive).
    pub fn contains_point(&self, point: &[f64]) -> bool {
        point.len() == self.dims()
            && (0..self.dims()).all(|d| point[d] >= self.min[d] && point[d] <= self.max[d])
    }

    /// The `index`-th child of an even `2^D` split. Bit `d` of `index`
    /// selects the upper half of axis `d`.
    pub fn child(&self, index: usize) -> HyperBox {
        debug_assert!(index < (1 << self.dims()));
        let mut min = self.min.clone();
        let mut max = self.max.clone();
        for d in 0..self.dims() {
            let mid = self.center(d);
            if index & (1 << d) != 0 {
                min[d] = mid;
            } else {
                max[d] = mid;
            }
        }
        HyperBox { min, max }
    }

    /// All `2^D` children in child-index order.
    pub fn subdivide(&self) -> Vec<HyperBox> {
        (0..1usize << self.dims()).map(|i| self.child(i)).collect()
    }

    /// Locate the child containing `point`, returning its index and box.
    /// Coordinates on the center split (or outside the box) resolve to
    /// the nearer half, so every point maps to exactly one child.
    pub fn locate(&self, point: &[f64]) -> (usize, HyperBox) {
        debug_assert_eq!(point.len(), self.dims());
        let mut index = 0;
        for d in 0..self.dims() {
            if point[d] >= self.center(d) {
                index |= 1 << d;
            }
        }
        (index, self.child(index))
    }
}

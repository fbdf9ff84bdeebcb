//! The recursive skyline index powering probabilistic dominance queries.
//!
//! The index partitions the dual space into a hierarchical grid, keeping
//! for every region the planes that cross it and, accumulated from its
//! ancestors, the planes that lie fully above it. Outer recursion levels
//! own a nested index apiece (one per witness point beyond the first);
//! the innermost level folds its above set into a per-leaf probability
//! aggregate. A query walks one root-to-summary path per witness point
//! chain and finishes with an inclusion-exclusion evaluation over the
//! crossing planes it collected on the way down.

use crate::error::{Result, SkylioError};
use crate::geometry::{HyperBox, Point};
use crate::plane::HyperPlane;
use crate::types::{Config, InstanceId, ObjectId};
use crate::validation;
use rustc_hash::FxHashMap;

/// A node of the spatial recursion.
enum Node {
    /// Subdivided region; exactly `2^D` children in subdivision order.
    Internal { children: Vec<Node> },
    /// Terminal region holding the planes that cross it, plus either the
    /// next-level nested index or the innermost probability aggregate.
    Leaf {
        through: Vec<usize>,
        payload: LeafPayload,
    },
}

enum LeafPayload {
    /// Innermost level: the folded above-set aggregate.
    Summary(LeafSummary),
    /// Outer level: a nested index over the full space, one level down.
    Nested(Box<Node>),
}

/// Per-leaf aggregate of the planes lying fully above the leaf's region.
struct LeafSummary {
    /// Instances folded in so far, per object.
    counts: FxHashMap<ObjectId, u32>,
    /// Running probability-mass multiplier (beta).
    factor: f64,
    /// Objects whose fold hit the exact-saturation case (xi).
    saturated: u32,
}

/// Probabilistic skyline index over a set of weighted dual-space planes.
///
/// Built once from an immutable plane list and the full space, then
/// queried any number of times; the tree is read-only after
/// construction. Rebuilding means building a new index and dropping the
/// old one.
///
/// # Example
///
/// ```rust
/// use skylio::{Config, HyperBox, HyperPlane, SkylineIndex};
///
/// let space = HyperBox::cube(2, 0.0, 1.0);
/// let planes = vec![
///     HyperPlane::new(0, 0, 1, vec![0.0], 0.3),
///     HyperPlane::new(1, 1, 1, vec![0.0], 0.6),
/// ];
/// let index = SkylineIndex::build(planes, space.clone(), &Config::default())?;
///
/// let probabilities = index.query(&space)?;
/// assert_eq!(probabilities[&0], 0.0); // dominated everywhere
/// assert_eq!(probabilities[&1], 1.0);
/// # Ok::<(), skylio::SkylioError>(())
/// ```
pub struct SkylineIndex {
    planes: Vec<HyperPlane>,
    space: HyperBox,
    root: Node,
    levels: usize,
}

impl SkylineIndex {
    /// Build the index from a plane set and the full dual space.
    ///
    /// Input is validated eagerly: a dimensionality mismatch, an empty
    /// space, a zero weight, or non-finite coefficients fail the build
    /// before any tree exists.
    pub fn build(planes: Vec<HyperPlane>, space: HyperBox, config: &Config) -> Result<Self> {
        config.validate()?;
        validation::validate_space(&space, config.dims)?;
        validation::validate_planes(&planes, config.dims)?;

        let mut above = Vec::new();
        let mut through = Vec::new();
        for (i, plane) in planes.iter().enumerate() {
            if plane.is_above(&space) {
                above.push(i);
            } else if plane.crosses(&space) {
                through.push(i);
            }
        }

        let levels = config.levels();
        let builder = TreeBuilder {
            planes: &planes,
            space: &space,
            leaf_capacity: config.leaf_capacity,
            max_depth: config.max_depth,
        };
        let root = builder.build_node(&space, &mut above, through, 1, levels)?;

        log::debug!(
            "built skyline index over {} planes, {} nested levels, fanout {}",
            planes.len(),
            levels,
            config.fanout()
        );

        Ok(Self {
            planes,
            space,
            root,
            levels,
        })
    }

    /// The plane set the index was built over, in input order.
    pub fn planes(&self) -> &[HyperPlane] {
        &self.planes
    }

    /// The full dual space the index covers.
    pub fn space(&self) -> &HyperBox {
        &self.space
    }

    /// Evaluate the skyline probability of every instance within a query
    /// region.
    ///
    /// # Arguments
    ///
    /// * `region` - The query region, same dimensionality as the space
    ///
    /// # Returns
    ///
    /// A map from instance id to the probability, in `[0, 1]`, that the
    /// instance is not dominated by any instance of another object
    /// inside the region. Planes disjoint from the region score 0.
    pub fn query(&self, region: &HyperBox) -> Result<FxHashMap<InstanceId, f64>> {
        validation::validate_query_region(region, self.space.dims())?;

        let mut results = FxHashMap::default();
        let mut through_acc: Vec<usize> = Vec::new();
        for plane in &self.planes {
            let probability = if plane.crosses(region) || plane.is_above(region) {
                let points = plane.witness_points(region);
                through_acc.clear();
                self.query_node(
                    &self.root,
                    &self.space,
                    &mut through_acc,
                    &points,
                    self.levels,
                    region,
                    plane,
                )
            } else {
                0.0
            };
            results.insert(plane.instance_id, probability);
        }
        Ok(results)
    }

    /// Walk one level of the tree for `plane` and thread the terminal
    /// evaluation back up.
    fn query_node(
        &self,
        node: &Node,
        region: &HyperBox,
        through_acc: &mut Vec<usize>,
        points: &[Point],
        level: usize,
        query: &HyperBox,
        plane: &HyperPlane,
    ) -> f64 {
        match node {
            Node::Internal { children } => {
                let (child, subregion) = region.locate(&points[level]);
                self.query_node(
                    &children[child],
                    &subregion,
                    through_acc,
                    points,
                    level,
                    query,
                    plane,
                )
            }
            Node::Leaf {
                through,
                payload: LeafPayload::Nested(root),
            } => {
                through_acc.extend_from_slice(through);
                self.query_node(root, &self.space, through_acc, points, level - 1, query, plane)
            }
            Node::Leaf {
                through,
                payload: LeafPayload::Summary(summary),
            } => {
                through_acc.extend_from_slice(through);
                self.evaluate(summary, through_acc, query, plane)
            }
        }
    }

    /// Terminal evaluation: combine the leaf aggregate with individual
    /// dominance checks against every crossing plane collected during
    /// the walk.
    fn evaluate(
        &self,
        summary: &LeafSummary,
        through: &[usize],
        query: &HyperBox,
        plane: &HyperPlane,
    ) -> f64 {
        let own = summary.counts.get(&plane.object_id).copied().unwrap_or(0);

        // A second saturated object, or a saturated object that is not
        // this plane's own at full count, dominates with certainty.
        if summary.saturated > 1 || (summary.saturated == 1 && own != plane.weight) {
            return 0.0;
        }

        // object id -> (dominating occurrences, weight of first one seen)
        let mut tallies: FxHashMap<ObjectId, (u32, u32)> = FxHashMap::default();
        for &q in through {
            let other = &self.planes[q];
            if other.object_id == plane.object_id {
                continue;
            }
            if other.restricted_dominates(plane, query) {
                tallies
                    .entry(other.object_id)
                    .and_modify(|t| t.0 += 1)
                    .or_insert((1, other.weight));
            }
        }

        let mut beta = summary.factor;
        if own > 0 {
            beta *= f64::from(plane.weight) / f64::from(own);
        }
        for (object, (occurrences, weight)) in &tallies {
            let folded = summary.counts.get(object).copied().unwrap_or(0);
            if folded + occurrences >= *weight {
                return 0.0;
            }
            let delta = f64::from(*weight - folded);
            beta *= (delta - f64::from(*occurrences)) / delta;
        }
        beta / f64::from(plane.weight)
    }

    /// Structural statistics, counting nested indexes too.
    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            nodes: 0,
            leaves: 0,
            summaries: 0,
            nested_indexes: 0,
            planes: self.planes.len(),
            levels: self.levels,
        };
        count_nodes(&self.root, &mut stats);
        stats
    }
}

/// Statistics about a built index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStats {
    /// Total nodes across the outer tree and all nested indexes.
    pub nodes: usize,
    /// Leaf nodes among them.
    pub leaves: usize,
    /// Leaves carrying an innermost-level aggregate.
    pub summaries: usize,
    /// Leaves carrying a nested index.
    pub nested_indexes: usize,
    /// Planes the index was built over.
    pub planes: usize,
    /// Nested levels beyond the innermost.
    pub levels: usize,
}

fn count_nodes(node: &Node, stats: &mut IndexStats) {
    stats.nodes += 1;
    match node {
        Node::Internal { children } => {
            for child in children {
                count_nodes(child, stats);
            }
        }
        Node::Leaf { payload, .. } => {
            stats.leaves += 1;
            match payload {
                LeafPayload::Summary(_) => stats.summaries += 1,
                LeafPayload::Nested(root) => {
                    stats.nested_indexes += 1;
                    count_nodes(root, stats);
                }
            }
        }
    }
}

/// Shared parameters of one build pass.
struct TreeBuilder<'a> {
    planes: &'a [HyperPlane],
    space: &'a HyperBox,
    leaf_capacity: usize,
    max_depth: usize,
}

impl TreeBuilder<'_> {
    /// Recursive construction. `above` accumulates the planes fully
    /// dominating the current region; each sibling's contributions are
    /// pushed before its recursive call and truncated away after, so
    /// siblings never observe each other's state.
    fn build_node(
        &self,
        region: &HyperBox,
        above: &mut Vec<usize>,
        through: Vec<usize>,
        depth: usize,
        level: usize,
    ) -> Result<Node> {
        if through.len() <= self.leaf_capacity || depth >= self.max_depth {
            if through.len() > self.leaf_capacity {
                log::warn!(
                    "leaf at depth {} holds {} planes over capacity {}; input has coincident planes",
                    depth,
                    through.len(),
                    self.leaf_capacity
                );
            }
            let payload = if level == 0 {
                LeafPayload::Summary(fold_above(self.planes, above)?)
            } else {
                // The accumulated above set becomes the candidate set of
                // a fresh index over the full space, one level down.
                let candidates = above.clone();
                let mut nested_above = Vec::new();
                let root =
                    self.build_node(self.space, &mut nested_above, candidates, 1, level - 1)?;
                LeafPayload::Nested(Box::new(root))
            };
            return Ok(Node::Leaf { through, payload });
        }

        let mut children = Vec::with_capacity(1 << region.dims());
        for subregion in region.subdivide() {
            let mut sub_through = Vec::new();
            let mut pushed = 0;
            for &p in &through {
                if self.planes[p].is_above(&subregion) {
                    above.push(p);
                    pushed += 1;
                } else if self.planes[p].crosses(&subregion) {
                    sub_through.push(p);
                }
            }
            children.push(self.build_node(&subregion, above, sub_through, depth + 1, level)?);
            above.truncate(above.len() - pushed);
        }
        Ok(Node::Internal { children })
    }
}

/// Fold an above set into a leaf aggregate.
///
/// For each plane, in accumulation order: an exact hit on the instance
/// ordinal multiplies the factor by the weight and marks the object
/// saturated; otherwise the factor takes `(delta - 1) / delta` with
/// `delta` the remaining ordinal headroom. Folding an object past its
/// ordinal is a producer contract breach and fails the build.
fn fold_above(planes: &[HyperPlane], above: &[usize]) -> Result<LeafSummary> {
    let mut summary = LeafSummary {
        counts: FxHashMap::default(),
        factor: 1.0,
        saturated: 0,
    };
    for &p in above {
        let plane = &planes[p];
        let seen = summary.counts.entry(plane.object_id).or_insert(0);
        if *seen + 1 == plane.weight {
            summary.factor *= f64::from(plane.weight);
            summary.saturated += 1;
        } else {
            if *seen >= plane.weight {
                return Err(SkylioError::InvalidInput(format!(
                    "object {} folded past its instance ordinal {}",
                    plane.object_id, plane.weight
                )));
            }
            let delta = f64::from(plane.weight - *seen);
            summary.factor *= (delta - 1.0) / delta;
        }
        *seen += 1;
    }
    Ok(summary)
}

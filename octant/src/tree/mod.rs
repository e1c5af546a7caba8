/// Scalar and bounding box related traits and types.
pub mod partition;

use crate::{metric::Metric, position::Position};

pub use partition::*;

/// Sentinel stored in the successor list for slots that do not link to another point.
pub const NIL: usize = usize::MAX;

/// Returns the 3-bit code of the child cube `position` falls into relative to `center`.
///
/// Bit 0 is set if `x > center.x`, bit 1 for `y` and bit 2 for `z`.
#[inline]
pub fn octant_code<S: Float>(position: &[S; 3], center: &[S; 3]) -> usize {
    (0..3).fold(0, |code, i| code | (usize::from(position[i] > center[i]) << i))
}

/// Cube node of an [`Octree`](crate::Octree).
///
/// The points of an octant are not stored in the node but form a chain in the successor list of
/// the tree: starting at `start`, following `size - 1` successors ends at `end`. The chain of an
/// internal octant is the concatenation of the chains of its children, in ascending code order.
#[derive(Clone, Debug)]
pub struct Octant<S> {
    /// Center of the cube.
    pub center: [S; 3],
    /// Half of the side length of the cube.
    ///
    /// Every point of the chain is at most `extent` away from `center` along each axis. Children
    /// usually have half the extent of their parent, slightly more when rounding moved their center.
    pub extent: S,
    /// First point index of the chain.
    pub start: usize,
    /// Last point index of the chain.
    pub end: usize,
    /// Number of points in the chain.
    pub size: usize,
    /// Child octants, indexed by their [octant code](octant_code).
    pub children: [Option<Box<Octant<S>>>; 8],
}

impl<S: Float> Octant<S> {
    #[inline]
    fn leaf(center: [S; 3], extent: S, start: usize, end: usize, size: usize) -> Self {
        Self {
            center,
            extent,
            start,
            end,
            size,
            children: Default::default(),
        }
    }

    /// Returns `true` if this octant has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    /// Returns an iterator over the existing children of this octant, in ascending code order.
    #[inline]
    pub fn children(&self) -> impl Iterator<Item = &Octant<S>> + '_ {
        self.children.iter().flatten().map(Box::as_ref)
    }

    /// Returns an iterator over the point indices of this octant's chain.
    #[inline]
    pub fn chain<'a>(&self, successors: &'a [usize]) -> Chain<'a> {
        Chain {
            successors,
            next: self.start,
            remaining: self.size,
        }
    }

    /// Returns `true` if every point of the cube is closer to `query` than `radius`.
    ///
    /// By symmetry, the offset to the center is reflected into the positive octant, where the
    /// farthest corner of the cube is at `offset + extent` on every axis.
    #[inline]
    pub fn is_inside<M>(&self, query: &[S; 3], radius: S, metric: &M) -> bool
    where
        M: Metric<S> + ?Sized,
    {
        let [x, y, z] = self.reflected_offset(query).map(|d| d + self.extent);
        metric.compute(x, y, z) < radius
    }

    /// Returns `true` if the search ball of `radius` around `query` may intersect the cube.
    ///
    /// The reflected query is tested against the Minkowski sum of the cube and the ball: outside
    /// of it along any axis, inside the slabs spanned by the cube's faces, or else against the
    /// nearest corner.
    #[inline]
    pub fn overlaps<M>(&self, query: &[S; 3], radius: S, metric: &M) -> bool
    where
        M: Metric<S> + ?Sized,
    {
        let offset = self.reflected_offset(query);
        let max_offset = radius + self.extent;

        if offset.iter().any(|&d| d > max_offset) {
            return false;
        }

        if offset.iter().any(|&d| d < self.extent) {
            return true;
        }

        let [x, y, z] = offset.map(|d| d - self.extent);
        metric.compute(x, y, z) < radius
    }

    #[inline]
    fn reflected_offset(&self, query: &[S; 3]) -> [S; 3] {
        std::array::from_fn(|i| (query[i] - self.center[i]).abs())
    }
}

/// Iterator over the point indices of an [`Octant`]'s chain.
#[derive(Clone, Debug)]
pub struct Chain<'a> {
    successors: &'a [usize],
    next: usize,
    remaining: usize,
}

impl Iterator for Chain<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let current = self.next;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next = self.successors[current];
        }

        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Chain<'_> {}

/// Statistics gathered while building an [`Octree`](crate::Octree).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct OctreeStats {
    /// Number of indexed points.
    pub points: usize,
    /// Number of octants, including the root.
    pub octants: usize,
    /// Number of leaf octants.
    pub leaves: usize,
    /// Depth of the deepest octant, the root having a depth of 0.
    pub depth: u32,
    /// Number of leaves holding more than the bucket size because their points coincide or the
    /// maximum depth was reached.
    pub oversized_leaves: usize,
}

/// Recursive construction of the octants over the chains of a successor list.
pub(crate) struct Builder<'a, P> {
    pub points: &'a [P],
    pub successors: &'a mut [usize],
    pub bucket_size: usize,
    pub max_depth: u32,
    pub stats: OctreeStats,
}

impl<P: Position> Builder<'_, P> {
    /// Creates the octant of the cube `(center, extent)` over the chain going from `start` to
    /// `end` and made of `size` points, relinking the successors of the chain so that every child
    /// octant owns a contiguous part of it.
    pub fn create_octant(
        &mut self,
        center: [P::Scalar; 3],
        extent: P::Scalar,
        start: usize,
        end: usize,
        size: usize,
        depth: u32,
    ) -> Octant<P::Scalar> {
        debug_assert!(size > 0, "octants are never created over empty chains");

        self.stats.octants += 1;
        self.stats.depth = self.stats.depth.max(depth);

        let mut octant = Octant::leaf(center, extent, start, end, size);

        if size <= self.bucket_size {
            self.stats.leaves += 1;
            return octant;
        }

        if depth >= self.max_depth {
            log::warn!(
                "maximum depth {} reached with {size} points left around {center:?}",
                self.max_depth
            );
            self.stats.leaves += 1;
            self.stats.oversized_leaves += 1;
            return octant;
        }

        let mut heads = [NIL; 8];
        let mut tails = [NIL; 8];
        let mut counts = [0usize; 8];
        let mut bounds = [BoundingBox::<[P::Scalar; 3]>::default(); 8];

        let first = self.points[start].coordinates();
        let mut coincident = true;

        let mut index = start;
        for _ in 0..size {
            let position = self.points[index].coordinates();
            let next = self.successors[index];
            let code = octant_code(&position, &center);

            if counts[code] == 0 {
                heads[code] = index;
            } else {
                self.successors[tails[code]] = index;
            }
            tails[code] = index;
            counts[code] += 1;
            bounds[code].extend(&position);

            coincident &= position == first;
            index = next;
        }

        if coincident {
            // All points share one code, so the chain kept its order.
            log::trace!("{size} coincident points at {first:?} kept in a single leaf");
            self.stats.leaves += 1;
            self.stats.oversized_leaves += 1;
            return octant;
        }

        let half = extent.half();
        let mut previous_end = None;

        for code in 0..8 {
            if counts[code] == 0 {
                continue;
            }

            let child_center: [P::Scalar; 3] = std::array::from_fn(|i| match code & (1 << i) {
                0 => center[i] - half,
                _ => center[i] + half,
            });
            // Rounded child centers can drift away from their points, so the extent grows to
            // cover every point routed to the child.
            let child_extent = (0..3).fold(half, |e, i| {
                e.max(bounds[code].max[i] - child_center[i])
                    .max(child_center[i] - bounds[code].min[i])
            });
            let child = self.create_octant(
                child_center,
                child_extent,
                heads[code],
                tails[code],
                counts[code],
                depth + 1,
            );

            match previous_end {
                None => octant.start = child.start,
                Some(previous_end) => self.successors[previous_end] = child.start,
            }
            previous_end = Some(child.end);

            octant.children[code] = Some(Box::new(child));
        }

        if let Some(last_end) = previous_end {
            octant.end = last_end;
        }

        octant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{Chebyshev, Euclidean, Manhattan};

    fn cube(center: [f32; 3], extent: f32) -> Octant<f32> {
        Octant::leaf(center, extent, 0, 0, 1)
    }

    #[test]
    fn octant_codes() {
        let center = [0.0f32; 3];

        assert_eq!(octant_code(&[-1.0, -1.0, -1.0], &center), 0);
        assert_eq!(octant_code(&[1.0, -1.0, -1.0], &center), 1);
        assert_eq!(octant_code(&[-1.0, 1.0, -1.0], &center), 2);
        assert_eq!(octant_code(&[-1.0, -1.0, 1.0], &center), 4);
        assert_eq!(octant_code(&[1.0, 1.0, 1.0], &center), 7);
        // Points on the splitting planes belong to the lower side.
        assert_eq!(octant_code(&[0.0, 0.0, 0.0], &center), 0);
    }

    #[test]
    fn chain_follows_successors() {
        let successors = [2, NIL, 3, 1];
        let octant = Octant {
            start: 0,
            end: 1,
            size: 4,
            ..cube([0.0; 3], 1.0)
        };

        let chain = octant.chain(&successors);
        assert_eq!(chain.len(), 4);
        assert_eq!(chain.collect::<Vec<_>>(), vec![0, 2, 3, 1]);

        // The walk stops at the size even if the end links further.
        let partial = Octant {
            start: 2,
            end: 3,
            size: 2,
            ..cube([0.0; 3], 1.0)
        };
        assert_eq!(partial.chain(&successors).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn inside_test() {
        let octant = cube([0.0; 3], 1.0);

        // Farthest corner is at (2, 2, 2) from the query.
        let query = [1.0, 1.0, 1.0];
        assert!(octant.is_inside(&query, 2.0 * 3.0f32.sqrt() + 1e-3, &Euclidean));
        assert!(!octant.is_inside(&query, 2.0 * 3.0f32.sqrt() - 1e-3, &Euclidean));
        assert!(octant.is_inside(&query, 6.5, &Manhattan));
        assert!(!octant.is_inside(&query, 6.0, &Manhattan));
        assert!(octant.is_inside(&query, 2.5, &Chebyshev));
        assert!(!octant.is_inside(&query, 2.0, &Chebyshev));

        // Reflection: the opposite corner yields the same result.
        assert!(octant.is_inside(&[-1.0, -1.0, -1.0], 2.5, &Chebyshev));
    }

    #[test]
    fn overlap_test() {
        let octant = cube([0.0; 3], 1.0);

        // Too far along one axis.
        assert!(!octant.overlaps(&[3.5, 0.0, 0.0], 2.0, &Euclidean));
        // Facing a face of the cube.
        assert!(octant.overlaps(&[2.5, 0.0, 0.0], 2.0, &Euclidean));
        assert!(octant.overlaps(&[0.0, -2.9, 0.5], 2.0, &Manhattan));
        // Query inside the cube.
        assert!(octant.overlaps(&[0.5, 0.5, 0.5], 0.1, &Chebyshev));

        // Corner region: nearest corner at offset (1, 1, 1).
        let query = [2.0, 2.0, 2.0];
        assert!(octant.overlaps(&query, 1.8, &Euclidean));
        assert!(!octant.overlaps(&query, 1.7, &Euclidean));
        assert!(octant.overlaps(&query, 3.1, &Manhattan));
        assert!(!octant.overlaps(&query, 3.0, &Manhattan));
        assert!(octant.overlaps(&query, 1.1, &Chebyshev));
        assert!(!octant.overlaps(&query, 1.0, &Chebyshev));
    }

    #[test]
    fn partition_relinks_chain() {
        let points: Vec<[f32; 3]> = vec![
            [1.0, 1.0, 1.0],
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [-1.0, -1.0, -1.5],
            [1.0, 1.0, 1.5],
        ];
        let mut successors = vec![1, 2, 3, 4, NIL];

        let mut builder = Builder {
            points: &points,
            successors: &mut successors,
            bucket_size: 2,
            max_depth: 16,
            stats: OctreeStats::default(),
        };
        let root = builder.create_octant([0.0; 3], 2.0, 0, 4, 5, 0);
        let stats = builder.stats;

        assert_eq!(
            root.children().map(|c| c.size).collect::<Vec<_>>(),
            vec![2, 1, 2]
        );
        assert!(root.children.iter().enumerate().all(|(code, child)| {
            child.is_some() == [0, 1, 7].contains(&code)
        }));
        assert_eq!(
            root.chain(&successors).collect::<Vec<_>>(),
            vec![1, 3, 2, 0, 4]
        );
        assert_eq!((root.start, root.end), (1, 4));

        assert_eq!(stats.octants, 4);
        assert_eq!(stats.leaves, 3);
        assert_eq!(stats.depth, 1);
        assert_eq!(stats.oversized_leaves, 0);
    }

    #[test]
    fn children_cover_rounded_centers() {
        let points: Vec<[f32; 3]> = vec![[0.0; 3], [1e6 + 0.4375, 1e6, 1e6], [1e6, 1e6, 1e6]];
        let mut successors = vec![1, 2, NIL];

        let (center, extent) = BoundingBox::with(points.iter().copied()).cube();
        let mut builder = Builder {
            points: &points,
            successors: &mut successors,
            bucket_size: 1,
            max_depth: 64,
            stats: OctreeStats::default(),
        };
        let root = builder.create_octant(center, extent, 0, 2, 3, 0);

        let mut stack = vec![&root];
        while let Some(octant) = stack.pop() {
            for index in octant.chain(&successors) {
                for axis in 0..3 {
                    let offset = (points[index][axis] - octant.center[axis]).abs();
                    assert!(offset <= octant.extent);
                }
            }
            stack.extend(octant.children());
        }
    }

    #[test]
    fn coincident_points_stay_in_one_leaf() {
        let points = vec![[0.5f64, 0.5, 0.5]; 10];
        let mut successors: Vec<usize> = (1..10).chain([NIL]).collect();

        let mut builder = Builder {
            points: &points,
            successors: &mut successors,
            bucket_size: 4,
            max_depth: 64,
            stats: OctreeStats::default(),
        };
        let root = builder.create_octant([0.0; 3], 1.0, 0, 9, 10, 0);

        assert!(root.is_leaf());
        assert_eq!(builder.stats.oversized_leaves, 1);
        assert_eq!(
            root.chain(&successors).collect::<Vec<_>>(),
            (0..10).collect::<Vec<_>>()
        );
    }
}

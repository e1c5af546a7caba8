use std::collections::VecDeque;

use crate::{
    config::{ConfigError, OctreeConfig},
    metric::Metric,
    position::Position,
    search::{debug_check_indices, NeighborSearch, RadiusSearch},
    tree::{BoundingBox, Builder, Octant, OctreeStats, NIL},
};

/// Bucketed octree answering fixed-radius neighbor searches over a borrowed buffer of points.
///
/// Building never moves nor copies the points: the octree only stores indices into the buffer,
/// linked into one chain per octant through a successor list parallel to the buffer. Octants are
/// split into up to 8 children until they hold at most [`bucket_size`] points.
///
/// [`bucket_size`]: OctreeConfig::bucket_size
///
/// # Example
///
/// ```
/// use octant::prelude::*;
///
/// let points = vec![[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 3.0, 0.0], [2.0, 2.0, 2.0]];
///
/// let mut octree = Octree::with_bucket_size(1).unwrap();
/// octree.build(&points);
///
/// let mut neighbors = octree.radius_neighbors(&[0.5, 0.0, 0.0], 1.0, &Euclidean);
/// neighbors.sort_unstable();
/// assert_eq!(neighbors, vec![0, 1]);
///
/// // Only the points at the given indices are searched.
/// octree.build_with(&points, &[2, 3]);
/// assert!(octree.radius_neighbors(&[0.5, 0.0, 0.0], 1.0, &Euclidean).is_empty());
/// assert_eq!(octree.radius_neighbors(&[0.0, 2.5, 0.0], 1.0, &Chebyshev), vec![2]);
/// ```
#[derive(Clone, Debug)]
pub struct Octree<'p, P: Position> {
    points: &'p [P],
    root: Option<Box<Octant<P::Scalar>>>,
    successors: Vec<usize>,
    config: OctreeConfig,
    stats: OctreeStats,
}

impl<P: Position> Octree<'_, P> {
    /// Creates a new empty [`Octree`] with the default [`OctreeConfig`].
    #[inline]
    pub fn new() -> Self {
        Self::with_valid_config(OctreeConfig::default())
    }

    /// Creates a new empty [`Octree`] with the given configuration.
    #[inline]
    pub fn with_config(config: OctreeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    /// Creates a new empty [`Octree`] whose leaves hold at most `bucket_size` points.
    #[inline]
    pub fn with_bucket_size(bucket_size: usize) -> Result<Self, ConfigError> {
        Self::with_config(OctreeConfig::new(bucket_size))
    }

    #[inline]
    fn with_valid_config(config: OctreeConfig) -> Self {
        Self {
            points: &[],
            root: None,
            successors: Vec::new(),
            config,
            stats: OctreeStats::default(),
        }
    }

    /// Returns the configuration of this [`Octree`].
    #[inline]
    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// Returns the statistics of the last build.
    #[inline]
    pub fn stats(&self) -> &OctreeStats {
        &self.stats
    }

    /// Returns the root octant, or `None` if the octree is empty.
    #[inline]
    pub fn root(&self) -> Option<&Octant<P::Scalar>> {
        self.root.as_deref()
    }

    /// Returns the successor list linking the chains of the octants.
    ///
    /// It has one slot per point of the buffer; slots of points that are not indexed, as well as
    /// the slot of the last point of the root chain, hold [`NIL`].
    #[inline]
    pub fn successors(&self) -> &[usize] {
        &self.successors
    }

    /// Returns the number of indexed points.
    #[inline]
    pub fn len(&self) -> usize {
        self.stats.points
    }

    /// Returns `true` if no point is indexed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Releases the octants and the successor list. Searches return no neighbors until the next
    /// build.
    #[inline]
    pub fn clear(&mut self) {
        self.points = &[];
        self.root = None;
        self.successors = Vec::new();
        self.stats = OctreeStats::default();
    }
}

impl<'p, P: Position> Octree<'p, P> {
    /// Returns the point buffer this [`Octree`] was built over.
    #[inline]
    pub fn points(&self) -> &'p [P] {
        self.points
    }

    /// Builds the octree over every point of `points`, replacing any previous build.
    ///
    /// Coordinates must be finite; this is checked in debug builds only.
    pub fn build(&mut self, points: &'p [P]) {
        debug_check_indices(points, 0..points.len());
        self.build_from(points, 0..points.len());
    }

    /// Builds the octree over the points of `points` whose indices are in `indices`, replacing any
    /// previous build.
    ///
    /// `indices` must not contain duplicates and must only contain valid indices of `points`
    /// located at finite coordinates; this is checked in debug builds only.
    pub fn build_with(&mut self, points: &'p [P], indices: &[usize]) {
        debug_check_indices(points, indices.iter().copied());
        self.build_from(points, indices.iter().copied());
    }

    fn build_from<I>(&mut self, points: &'p [P], indices: I)
    where
        I: IntoIterator<Item = usize>,
    {
        self.clear();
        self.points = points;
        self.successors = vec![NIL; points.len()];

        let mut bbox = BoundingBox::default();
        let mut start = NIL;
        let mut end = NIL;
        let mut size = 0;

        for index in indices {
            bbox.extend(&points[index].coordinates());

            match end {
                NIL => start = index,
                previous => self.successors[previous] = index,
            }
            end = index;
            size += 1;
        }

        if size == 0 {
            log::debug!("built empty octree");
            return;
        }

        let (center, extent) = bbox.cube();
        let mut builder = Builder {
            points,
            successors: &mut self.successors,
            bucket_size: self.config.bucket_size,
            max_depth: self.config.max_depth,
            stats: OctreeStats {
                points: size,
                ..OctreeStats::default()
            },
        };
        let root = builder.create_octant(center, extent, start, end, size, 0);
        self.stats = builder.stats;

        self.successors[root.end] = NIL;
        self.root = Some(Box::new(root));

        log::debug!(
            "built octree over {} points: {} octants, {} leaves, depth {}",
            self.stats.points,
            self.stats.octants,
            self.stats.leaves,
            self.stats.depth
        );
    }
}

impl<P: Position> Default for Octree<'_, P> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Position> RadiusSearch<P::Scalar> for Octree<'_, P> {
    fn radius_neighbors_into<Q, M>(
        &self,
        query: &Q,
        radius: P::Scalar,
        metric: &M,
        neighbors: &mut Vec<usize>,
    ) where
        Q: Position<Scalar = P::Scalar> + ?Sized,
        M: Metric<P::Scalar> + ?Sized,
    {
        neighbors.clear();

        let Some(root) = self.root.as_deref() else {
            return;
        };

        let query = query.coordinates();
        let mut queue = VecDeque::from([root]);
        let mut visited = 0;

        while let Some(octant) = queue.pop_front() {
            visited += 1;

            if octant.is_inside(&query, radius, metric) {
                neighbors.extend(octant.chain(&self.successors));
            } else if octant.is_leaf() {
                neighbors.extend(octant.chain(&self.successors).filter(|&index| {
                    metric.distance(query, self.points[index].coordinates()) < radius
                }));
            } else {
                queue.extend(
                    octant
                        .children()
                        .filter(|child| child.overlaps(&query, radius, metric)),
                );
            }
        }

        log::trace!(
            "{} neighbors of {query:?} found visiting {visited} octants",
            neighbors.len()
        );
    }
}

impl<'p, P: Position> NeighborSearch<'p, P> for Octree<'p, P> {
    #[inline]
    fn build_with(&mut self, points: &'p [P], indices: &[usize]) {
        Octree::build_with(self, points, indices)
    }

    #[inline]
    fn build(&mut self, points: &'p [P]) {
        Octree::build(self, points)
    }

    #[inline]
    fn clear(&mut self) {
        Octree::clear(self)
    }

    #[inline]
    fn len(&self) -> usize {
        Octree::len(self)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        Octree::is_empty(self)
    }
}

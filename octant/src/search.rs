use crate::{metric::Metric, position::Position, tree::partition::Float};

/// Trait for structures answering "all points closer to `query` than `radius`" searches.
///
/// The radius is exclusive: a point exactly at `radius` from the query is not a neighbor. The
/// returned indices refer to the point buffer the structure was built from and are in no
/// particular order.
pub trait RadiusSearch<S> {
    /// Clears `neighbors` and fills it with the indices of the points closer to `query` than
    /// `radius` according to `metric`.
    ///
    /// Reusing the same vector over many queries avoids reallocating it for every search.
    fn radius_neighbors_into<Q, M>(&self, query: &Q, radius: S, metric: &M, neighbors: &mut Vec<usize>)
    where
        Q: Position<Scalar = S> + ?Sized,
        M: Metric<S> + ?Sized;

    /// Returns the indices of the points closer to `query` than `radius` according to `metric`.
    #[inline]
    fn radius_neighbors<Q, M>(&self, query: &Q, radius: S, metric: &M) -> Vec<usize>
    where
        Q: Position<Scalar = S> + ?Sized,
        M: Metric<S> + ?Sized,
    {
        let mut neighbors = Vec::new();
        self.radius_neighbors_into(query, radius, metric, &mut neighbors);
        neighbors
    }

    /// Returns an iterator over the neighbors of every query, in the order of the queries.
    ///
    /// Refer to [`radius_neighbors`](RadiusSearch::radius_neighbors) for more information.
    #[inline]
    fn neighborhoods<'s, I, M>(
        &'s self,
        queries: I,
        radius: S,
        metric: &'s M,
    ) -> Neighborhoods<'s, Self, I::IntoIter, M, S>
    where
        I: IntoIterator,
        I::Item: Position<Scalar = S>,
        M: Metric<S> + ?Sized,
    {
        Neighborhoods {
            search: self,
            queries: queries.into_iter(),
            radius,
            metric,
        }
    }
}

/// Trait for radius search structures built over a borrowed buffer of points.
///
/// Building again replaces everything previously built; the structure never owns nor copies the
/// points, so the buffer is borrowed for as long as the structure is built from it.
pub trait NeighborSearch<'p, P: Position>: RadiusSearch<P::Scalar> {
    /// Builds the structure over the points of `points` whose indices are in `indices`.
    ///
    /// `indices` must not contain duplicates and must only contain valid indices of `points`.
    /// This is checked in debug builds only.
    fn build_with(&mut self, points: &'p [P], indices: &[usize]);

    /// Builds the structure over every point of `points`.
    #[inline]
    fn build(&mut self, points: &'p [P]) {
        let indices = (0..points.len()).collect::<Vec<_>>();
        self.build_with(points, &indices);
    }

    /// Releases everything built. Searches return no neighbors until the next build.
    fn clear(&mut self);

    /// Returns the number of points the structure was built over.
    fn len(&self) -> usize;

    /// Returns `true` if the structure holds no points.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An iterator that computes the neighbors of each query of an iterator using a given search
/// structure.
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone, Debug)]
pub struct Neighborhoods<'s, N: ?Sized, I, M: ?Sized, S> {
    search: &'s N,
    queries: I,
    radius: S,
    metric: &'s M,
}

impl<N, I, M, S> Iterator for Neighborhoods<'_, N, I, M, S>
where
    N: RadiusSearch<S> + ?Sized,
    I: Iterator,
    I::Item: Position<Scalar = S>,
    M: Metric<S> + ?Sized,
    S: Copy,
{
    type Item = Vec<usize>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.queries
            .next()
            .map(|query| self.search.radius_neighbors(&query, self.radius, self.metric))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.queries.size_hint()
    }
}

impl<N, I, M, S> ExactSizeIterator for Neighborhoods<'_, N, I, M, S>
where
    Self: Iterator,
    I: ExactSizeIterator,
{
    #[inline]
    fn len(&self) -> usize {
        self.queries.len()
    }
}

/// Naive radius search comparing the query with every point.
///
/// Used as the reference the accelerated structures are checked and benchmarked against.
#[derive(Clone, Debug)]
pub struct BruteForce<'p, P> {
    points: &'p [P],
    indices: Vec<usize>,
}

impl<P> BruteForce<'_, P> {
    /// Creates a new empty [`BruteForce`] search.
    #[inline]
    pub const fn new() -> Self {
        Self {
            points: &[],
            indices: Vec::new(),
        }
    }
}

impl<P> Default for BruteForce<'_, P> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Position> RadiusSearch<P::Scalar> for BruteForce<'_, P> {
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

        let query = query.coordinates();
        neighbors.extend(self.indices.iter().copied().filter(|&index| {
            metric.distance(query, self.points[index].coordinates()) < radius
        }));
    }
}

impl<'p, P: Position> NeighborSearch<'p, P> for BruteForce<'p, P> {
    fn build_with(&mut self, points: &'p [P], indices: &[usize]) {
        debug_check_indices(points, indices.iter().copied());

        self.points = points;
        self.indices.clear();
        self.indices.extend_from_slice(indices);
    }

    #[inline]
    fn build(&mut self, points: &'p [P]) {
        debug_check_indices(points, 0..points.len());

        self.points = points;
        self.indices.clear();
        self.indices.extend(0..points.len());
    }

    #[inline]
    fn clear(&mut self) {
        self.points = &[];
        self.indices = Vec::new();
    }

    #[inline]
    fn len(&self) -> usize {
        self.indices.len()
    }
}

/// Asserts, in debug builds only, that `indices` are unique valid indices of `points` located at
/// finite coordinates.
pub(crate) fn debug_check_indices<P, I>(points: &[P], indices: I)
where
    P: Position,
    I: IntoIterator<Item = usize>,
{
    if !cfg!(debug_assertions) {
        return;
    }

    let mut seen = vec![false; points.len()];
    for index in indices {
        assert!(
            index < points.len(),
            "index {index} out of range for {} points",
            points.len()
        );
        assert!(!seen[index], "index {index} is given more than once");
        seen[index] = true;

        let coordinates = points[index].coordinates();
        assert!(
            coordinates.iter().all(|c| Float::is_finite(*c)),
            "point {index} has non-finite coordinates {coordinates:?}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{Chebyshev, Euclidean, Manhattan};

    fn points() -> Vec<[f64; 3]> {
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
            [1.0, 1.0, 1.0],
            [-3.0, 0.5, 0.0],
        ]
    }

    #[test]
    fn brute_force_search() {
        let points = points();
        let mut search = BruteForce::<[f64; 3]>::new();
        assert!(search.is_empty());
        assert!(search.radius_neighbors(&[0.0; 3], 10.0, &Euclidean).is_empty());

        search.build(&points);
        assert_eq!(search.len(), 5);

        let origin = [0.0, 0.0, 0.0];
        assert_eq!(search.radius_neighbors(&origin, 1.5, &Euclidean), vec![0, 1]);
        assert_eq!(search.radius_neighbors(&origin, 2.0, &Euclidean), vec![0, 1, 3]);
        assert_eq!(search.radius_neighbors(&origin, 3.0, &Manhattan), vec![0, 1, 2]);
        assert_eq!(search.radius_neighbors(&origin, 1.5, &Chebyshev), vec![0, 1, 3]);

        // Exclusive radius.
        assert_eq!(search.radius_neighbors(&origin, 1.0, &Euclidean), vec![0]);
        assert!(search.radius_neighbors(&origin, 0.0, &Euclidean).is_empty());

        search.clear();
        assert!(search.is_empty());
        assert!(search.radius_neighbors(&origin, 10.0, &Euclidean).is_empty());
    }

    #[test]
    fn brute_force_subset() {
        let points = points();
        let mut search = BruteForce::<[f64; 3]>::new();
        search.build_with(&points, &[4, 2, 0]);

        assert_eq!(search.len(), 3);
        assert_eq!(
            search.radius_neighbors(&[0.0, 0.0, 0.0], 100.0, &Euclidean),
            vec![4, 2, 0]
        );
    }

    #[test]
    fn neighborhoods_follow_queries() {
        let points = points();
        let mut search = BruteForce::<[f64; 3]>::new();
        search.build(&points);

        let queries = [[0.0, 0.0, 0.0], [-3.0, 0.0, 0.0], [10.0, 10.0, 10.0]];
        let neighborhoods = search.neighborhoods(queries, 1.0, &Euclidean);
        assert_eq!(neighborhoods.len(), 3);
        assert_eq!(
            neighborhoods.collect::<Vec<_>>(),
            vec![vec![0], vec![4], vec![]]
        );
    }

    #[test]
    fn reused_buffer_is_cleared() {
        let points = points();
        let mut search = BruteForce::<[f64; 3]>::new();
        search.build(&points);

        let mut neighbors = vec![42, 43];
        search.radius_neighbors_into(&[1.0, 1.0, 1.0], 0.5, &Euclidean, &mut neighbors);
        assert_eq!(neighbors, vec![3]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "more than once")]
    fn duplicate_indices_panic() {
        let points = points();
        BruteForce::<[f64; 3]>::new().build_with(&points, &[1, 2, 1]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn out_of_range_indices_panic() {
        let points = points();
        BruteForce::<[f64; 3]>::new().build_with(&points, &[1, 5]);
    }
}

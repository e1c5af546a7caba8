use crate::{metric::Metric, position::Position, search::RadiusSearch};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// Trait to search the neighbors of many queries using multiple CPU threads.
pub trait ParallelRadiusSearch<S>: RadiusSearch<S> + Sync {
    /// Returns the neighbors of every query of `queries`, in the order of the queries.
    ///
    /// The results are the same as calling
    /// [`radius_neighbors`](RadiusSearch::radius_neighbors) for every query sequentially.
    #[inline]
    fn par_radius_neighbors<Q, M>(&self, queries: &[Q], radius: S, metric: &M) -> Vec<Vec<usize>>
    where
        Q: Position<Scalar = S> + Sync,
        M: Metric<S> + Sync + ?Sized,
        S: Copy + Send + Sync,
    {
        queries
            .par_iter()
            .map(|query| self.radius_neighbors(query, radius, metric))
            .collect()
    }
}

impl<S, T: RadiusSearch<S> + Sync + ?Sized> ParallelRadiusSearch<S> for T {}

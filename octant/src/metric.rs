use crate::tree::partition::Float;

/// Trait for the distance functions radius searches are performed with.
///
/// A metric measures the offset `(dx, dy, dz)` between two points. The [`Octree`] prunes whole
/// cubes of points by only measuring their nearest and farthest corners, which is sound only if
/// every implementation upholds the following contract:
///
/// - `compute` is monotonically non-decreasing in each of `|dx|`, `|dy|` and `|dz|`, i.e. moving
///   a point further away along any axis never brings it closer;
/// - an offset along a single axis, e.g. `(d, 0, 0)`, measures at least `|d|`.
///
/// Every p-norm (and in particular [`Euclidean`], [`Manhattan`] and [`Chebyshev`]) satisfies both.
/// The contract is not verified at runtime: a metric violating it silently makes searches miss
/// points.
///
/// [`Octree`]: crate::Octree
///
/// # Example
///
/// ```
/// use octant::metric::{Chebyshev, Euclidean, Manhattan, Metric};
///
/// let (a, b) = ([0.0, 0.0, 0.0], [1.0, -2.0, 2.0]);
///
/// assert_eq!(Euclidean.distance(a, b), 3.0);
/// assert_eq!(Manhattan.distance(a, b), 5.0);
/// assert_eq!(Chebyshev.distance(a, b), 2.0);
/// ```
pub trait Metric<S> {
    /// Returns the length of the offset `(dx, dy, dz)`.
    fn compute(&self, dx: S, dy: S, dz: S) -> S;

    /// Returns the distance between two points.
    #[inline]
    fn distance(&self, a: [S; 3], b: [S; 3]) -> S
    where
        S: Float,
    {
        self.compute(a[0] - b[0], a[1] - b[1], a[2] - b[2])
    }
}

/// Euclidean (L2) metric, the square root of the sum of squared offsets.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct Euclidean;

impl<S: Float> Metric<S> for Euclidean {
    #[inline]
    fn compute(&self, dx: S, dy: S, dz: S) -> S {
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Manhattan (L1) metric, the sum of absolute offsets.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct Manhattan;

impl<S: Float> Metric<S> for Manhattan {
    #[inline]
    fn compute(&self, dx: S, dy: S, dz: S) -> S {
        dx.abs() + dy.abs() + dz.abs()
    }
}

/// Chebyshev (maximum, L∞) metric, the largest absolute offset.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct Chebyshev;

impl<S: Float> Metric<S> for Chebyshev {
    #[inline]
    fn compute(&self, dx: S, dy: S, dz: S) -> S {
        dx.abs().max(dy.abs()).max(dz.abs())
    }
}

/// One of the built-in metrics, chosen at runtime.
///
/// Parses from and displays as `euclidean`, `manhattan` or `chebyshev` (`maximum` is accepted as
/// an alias of the latter).
///
/// ```
/// use octant::metric::{Metric, MetricKind};
///
/// let metric: MetricKind = "manhattan".parse().unwrap();
/// assert_eq!(metric, MetricKind::Manhattan);
/// assert_eq!(metric.compute(1.0, -1.0, 0.5), 2.5);
/// assert!("hamming".parse::<MetricKind>().is_err());
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// See [`Euclidean`].
    #[default]
    Euclidean,
    /// See [`Manhattan`].
    Manhattan,
    /// See [`Chebyshev`].
    Chebyshev,
}

impl MetricKind {
    /// All the built-in metrics.
    pub const ALL: [Self; 3] = [Self::Euclidean, Self::Manhattan, Self::Chebyshev];

    /// Returns the name this metric parses from.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
            Self::Chebyshev => "chebyshev",
        }
    }
}

impl<S: Float> Metric<S> for MetricKind {
    #[inline]
    fn compute(&self, dx: S, dy: S, dz: S) -> S {
        match self {
            Self::Euclidean => Euclidean.compute(dx, dy, dz),
            Self::Manhattan => Manhattan.compute(dx, dy, dz),
            Self::Chebyshev => Chebyshev.compute(dx, dy, dz),
        }
    }
}

impl std::fmt::Display for MetricKind {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown metric name.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("unknown metric `{0}`, expected one of `euclidean`, `manhattan` or `chebyshev`")]
pub struct ParseMetricError(pub String);

impl std::str::FromStr for MetricKind {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(Self::Euclidean),
            "manhattan" | "l1" => Ok(Self::Manhattan),
            "chebyshev" | "maximum" | "linf" => Ok(Self::Chebyshev),
            _ => Err(ParseMetricError(s.to_owned())),
        }
    }
}

impl<S, M> Metric<S> for &M
where
    M: Metric<S> + ?Sized,
{
    #[inline]
    fn compute(&self, dx: S, dy: S, dz: S) -> S {
        (**self).compute(dx, dy, dz)
    }
}

impl<S, M> Metric<S> for Box<M>
where
    M: Metric<S> + ?Sized,
{
    #[inline]
    fn compute(&self, dx: S, dy: S, dz: S) -> S {
        (**self).compute(dx, dy, dz)
    }
}

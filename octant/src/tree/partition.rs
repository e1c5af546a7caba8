use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Trait for the floating-point scalars coordinates are expressed in.
pub trait Float:
    Copy
    + PartialOrd
    + Default
    + Debug
    + Send
    + Sync
    + 'static
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// `zero` value of the type.
    const ZERO: Self;

    /// `infinity` (∞) value of the type.
    const INFINITY: Self;

    /// Returns the absolute value of a float.
    fn abs(self) -> Self;

    /// Returns the square root of a float.
    fn sqrt(self) -> Self;

    /// Returns the minimum between two floats.
    fn min(self, rhs: Self) -> Self;

    /// Returns the maximum between two floats.
    fn max(self, rhs: Self) -> Self;

    /// Returns `true` if this float is neither infinite nor NaN.
    fn is_finite(self) -> bool;

    /// Returns half of a float.
    fn half(self) -> Self;

    /// Returns the middle point of `self` and `rhs`.
    #[inline]
    fn midpoint(self, rhs: Self) -> Self {
        (self + rhs).half()
    }
}

macro_rules! impl_floats {
    ($s: ty) => {
        impl Float for $s {
            const ZERO: Self = 0.0;

            const INFINITY: Self = <$s>::INFINITY;

            #[inline]
            fn abs(self) -> Self {
                self.abs()
            }

            #[inline]
            fn sqrt(self) -> Self {
                self.sqrt()
            }

            #[inline]
            fn min(self, rhs: Self) -> Self {
                self.min(rhs)
            }

            #[inline]
            fn max(self, rhs: Self) -> Self {
                self.max(rhs)
            }

            #[inline]
            fn is_finite(self) -> bool {
                self.is_finite()
            }

            #[inline]
            fn half(self) -> Self {
                self * 0.5
            }
        }
    };
}

impl_floats!(f32);
impl_floats!(f64);

/// An axis-aligned bounding box using arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox<A> {
    /// Minimum corner of the box.
    pub min: A,
    /// Maximum corner of the box.
    pub max: A,
}

impl<A> BoundingBox<A> {
    /// Creates a new [`BoundingBox`] with the given min and max values.
    #[inline]
    pub const fn new(min: A, max: A) -> Self {
        Self { min, max }
    }
}

impl<const D: usize, S: Float> Default for BoundingBox<[S; D]> {
    #[inline]
    fn default() -> Self {
        Self::new([S::INFINITY; D], [-S::INFINITY; D])
    }
}

#[allow(clippy::needless_range_loop)]
impl<const D: usize, S: Float> BoundingBox<[S; D]> {
    /// Extends the [`BoundingBox`] so that it contains the given position.
    #[inline]
    pub fn extend(&mut self, position: &[S; D]) {
        for i in 0..D {
            self.min[i] = self.min[i].min(position[i]);
            self.max[i] = self.max[i].max(position[i]);
        }
    }

    /// Creates a new [`BoundingBox`] that contains the given positions.
    #[inline]
    pub fn with<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = [S; D]>,
    {
        let mut result = Self::default();
        for position in positions {
            result.extend(&position);
        }
        result
    }

    /// Returns `true` if no position was ever added to the [`BoundingBox`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        (0..D).any(|i| self.min[i] > self.max[i])
    }

    /// Returns the center of the [`BoundingBox`].
    #[inline]
    pub fn center(&self) -> [S; D] {
        let mut r = [S::ZERO; D];
        for i in 0..D {
            r[i] = self.min[i].midpoint(self.max[i]);
        }
        r
    }

    /// Returns the size of the [`BoundingBox`].
    #[inline]
    pub fn size(&self) -> [S; D] {
        let mut r = [S::ZERO; D];
        for i in 0..D {
            r[i] = self.max[i] - self.min[i];
        }
        r
    }

    /// Returns the center and half side length of the smallest cube sharing the center of this
    /// [`BoundingBox`] and containing it.
    ///
    /// The half side length is measured from the rounded center on both sides of every axis, so
    /// every position the box was built from lies inside the cube.
    #[inline]
    pub fn cube(&self) -> ([S; D], S) {
        let center = self.center();
        let mut extent = S::ZERO;
        for i in 0..D {
            extent = extent
                .max(self.max[i] - center[i])
                .max(center[i] - self.min[i]);
        }
        (center, extent)
    }
}

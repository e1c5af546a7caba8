mod impls;

use crate::tree::partition::Float;

/// Trait for types that can be located in 3D space.
///
/// The point buffers indexed by an [`Octree`](crate::Octree) are slices of values implementing
/// this trait. It is implemented for arrays and tuples of three floats, references to types
/// implementing it and, with the corresponding features enabled, for the 3D vector and point
/// types of `glam`, `ultraviolet` and `nalgebra`.
///
/// You can derive this trait if your type has a field named `position` whose type implements it.
///
/// # Example
///
/// ```
/// use octant::prelude::*;
///
/// #[derive(Position)]
/// struct LaserPoint {
///     position: [f32; 3],
///     remission: f32,
/// }
///
/// let point = LaserPoint { position: [1.0, 2.0, 3.0], remission: 0.4 };
/// assert_eq!(point.coordinates(), [1.0, 2.0, 3.0]);
/// assert_eq!((1.0, 2.0, 3.0).coordinates(), point.coordinates());
/// ```
pub trait Position {
    /// The scalar type the coordinates are expressed in.
    type Scalar: Float;

    /// Returns the `x`, `y` and `z` coordinates.
    fn coordinates(&self) -> [Self::Scalar; 3];
}

impl<S: Float> Position for [S; 3] {
    type Scalar = S;

    #[inline]
    fn coordinates(&self) -> [S; 3] {
        *self
    }
}

impl<S: Float> Position for (S, S, S) {
    type Scalar = S;

    #[inline]
    fn coordinates(&self) -> [S; 3] {
        [self.0, self.1, self.2]
    }
}

impl<P: Position + ?Sized> Position for &P {
    type Scalar = P::Scalar;

    #[inline]
    fn coordinates(&self) -> [Self::Scalar; 3] {
        (**self).coordinates()
    }
}

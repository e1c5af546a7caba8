use crate::{position::Position, tree::partition::Float};
use nalgebra::{Point3, Vector3};

impl<S: Float + nalgebra::Scalar> Position for Vector3<S> {
    type Scalar = S;

    #[inline]
    fn coordinates(&self) -> [S; 3] {
        [self.x, self.y, self.z]
    }
}

impl<S: Float + nalgebra::Scalar> Position for Point3<S> {
    type Scalar = S;

    #[inline]
    fn coordinates(&self) -> [S; 3] {
        [self.x, self.y, self.z]
    }
}

use glam::{DVec3, Vec3, Vec3A};

crate::impl_position!(f32, Vec3, |v: &Vec3| v.to_array());
crate::impl_position!(f32, Vec3A, |v: &Vec3A| v.to_array());
crate::impl_position!(f64, DVec3, |v: &DVec3| v.to_array());

#[cfg(test)]
mod tests {
    use crate::position::Position;

    #[test]
    fn glam_positions() {
        assert_eq!(glam::Vec3::new(1.0, 2.0, 3.0).coordinates(), [1.0, 2.0, 3.0]);
        assert_eq!(glam::Vec3A::new(1.0, 2.0, 3.0).coordinates(), [1.0, 2.0, 3.0]);
        assert_eq!(glam::DVec3::new(-1.0, 0.0, 1.0).coordinates(), [-1.0, 0.0, 1.0]);
    }
}

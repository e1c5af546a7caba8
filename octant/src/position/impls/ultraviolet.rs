use ultraviolet::{DVec3, Vec3};

crate::impl_position!(f32, Vec3, |v: &Vec3| [v.x, v.y, v.z]);
crate::impl_position!(f64, DVec3, |v: &DVec3| [v.x, v.y, v.z]);

#[cfg(test)]
mod tests {
    use crate::position::Position;

    #[test]
    fn ultraviolet_positions() {
        assert_eq!(ultraviolet::Vec3::new(1.0, 2.0, 3.0).coordinates(), [1.0, 2.0, 3.0]);
        assert_eq!(ultraviolet::DVec3::new(-1.0, 0.0, 1.0).coordinates(), [-1.0, 0.0, 1.0]);
    }
}

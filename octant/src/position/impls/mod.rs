#[cfg(feature = "glam")]
mod glam;
#[cfg(feature = "nalgebra")]
mod nalgebra;
#[cfg(feature = "ultraviolet")]
mod ultraviolet;

#[doc(hidden)]
#[macro_export]
macro_rules! impl_position {
    ($scalar: ty, $vector: ty, $coordinates_fn: expr) => {
        impl $crate::position::Position for $vector {
            type Scalar = $scalar;

            #[inline]
            fn coordinates(&self) -> [$scalar; 3] {
                $coordinates_fn(self)
            }
        }
    };
}

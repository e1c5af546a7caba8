/// Construction parameters of an [`Octree`](crate::Octree), fixed for its whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OctreeConfig {
    /// Maximum number of points a leaf octant holds before it is split into children.
    pub bucket_size: usize,
    /// Depth at which octants stop being split, whatever their number of points.
    ///
    /// Only reached for points closer to each other than the floating-point resolution of their
    /// coordinates.
    pub max_depth: u32,
}

impl OctreeConfig {
    /// Bucket size used by [`OctreeConfig::default`].
    pub const DEFAULT_BUCKET_SIZE: usize = 32;

    /// Maximum depth used by [`OctreeConfig::default`].
    pub const DEFAULT_MAX_DEPTH: u32 = 64;

    /// Creates a new [`OctreeConfig`] with the given bucket size and the default maximum depth.
    #[inline]
    pub const fn new(bucket_size: usize) -> Self {
        Self {
            bucket_size,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Returns this [`OctreeConfig`] with the given maximum depth.
    #[inline]
    pub const fn with_max_depth(self, max_depth: u32) -> Self {
        Self { max_depth, ..self }
    }

    /// Checks that the parameters can be used to build an [`Octree`](crate::Octree).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket_size == 0 {
            return Err(ConfigError::ZeroBucketSize);
        }

        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }

        Ok(())
    }
}

impl Default for OctreeConfig {
    #[inline]
    fn default() -> Self {
        Self::new(Self::DEFAULT_BUCKET_SIZE)
    }
}

/// Error returned when creating an [`Octree`](crate::Octree) from invalid parameters.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Leaves must be able to hold at least one point.
    #[error("bucket size must be at least 1")]
    ZeroBucketSize,
    /// The root must be allowed to split.
    #[error("maximum depth must be at least 1")]
    ZeroMaxDepth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = OctreeConfig::default();
        assert_eq!(config.bucket_size, 32);
        assert_eq!(config.max_depth, 64);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn invalid_config() {
        assert_eq!(
            OctreeConfig::new(0).validate(),
            Err(ConfigError::ZeroBucketSize)
        );
        assert_eq!(
            OctreeConfig::new(8).with_max_depth(0).validate(),
            Err(ConfigError::ZeroMaxDepth)
        );
        assert_eq!(
            ConfigError::ZeroBucketSize.to_string(),
            "bucket size must be at least 1"
        );
    }
}

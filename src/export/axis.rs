//! Coordinate system conversion.

use cgmath::Vector3;

use crate::ExportConfig;

/// Up axis of the written file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpAxis {
    /// Z is up; coordinates are written as they are.
    Z,
    /// Y is up; the Y and Z components are swapped.
    Y,
}

impl UpAxis {
    /// Returns the up axis selected by the configuration.
    pub fn from_config(config: &ExportConfig) -> Self {
        if config.use_y_is_up {
            UpAxis::Y
        } else {
            UpAxis::Z
        }
    }

    /// Converts a position.
    pub fn position(self, p: Vector3<f32>) -> Vector3<f32> {
        self.swap(p)
    }

    /// Converts a normal.
    pub fn normal(self, n: Vector3<f32>) -> Vector3<f32> {
        self.swap(n)
    }

    /// Reorders triangle indices.
    ///
    /// Swapping two axes mirrors the mesh, so the winding is reversed to
    /// keep faces pointing outward.
    pub fn triangle<T>(self, [i0, i1, i2]: [T; 3]) -> [T; 3] {
        match self {
            UpAxis::Z => [i0, i1, i2],
            UpAxis::Y => [i0, i2, i1],
        }
    }

    /// Swaps Y and Z if needed.
    fn swap(self, v: Vector3<f32>) -> Vector3<f32> {
        match self {
            UpAxis::Z => v,
            UpAxis::Y => Vector3::new(v.x, v.z, v.y),
        }
    }
}

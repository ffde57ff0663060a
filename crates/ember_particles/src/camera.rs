//! Per-frame camera vectors for particle quads.

use glam::{Quat, Vec3};

/// Corner layout shared by quads and their UV words: right-bottom,
/// left-bottom, right-top, left-top.
const CORNERS: [(f32, f32); 4] = [(1.0, -1.0), (-1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

/// Camera-derived vectors refreshed once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// Quad corner offsets facing the camera.
    pub billboarded: [Vec3; 4],
    /// Quad corner offsets in the world XY plane.
    pub fixed: [Vec3; 4],
    /// Camera right, up and forward axes.
    pub side: [Vec3; 3],
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self::from_rotation(Quat::IDENTITY)
    }
}

impl CameraBasis {
    /// Builds the basis from the camera's world rotation.
    #[must_use]
    pub fn from_rotation(rotation: Quat) -> Self {
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        let forward = rotation * Vec3::NEG_Z;

        Self {
            billboarded: CORNERS.map(|(x, y)| right * x + up * y),
            fixed: CORNERS.map(|(x, y)| Vec3::new(x, y, 0.0)),
            side: [right, up, forward],
        }
    }

    #[inline]
    #[must_use]
    pub fn quad_vectors(&self, xy_quad: bool) -> &[Vec3; 4] {
        if xy_quad { &self.fixed } else { &self.billboarded }
    }

    #[inline]
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.side[0]
    }
}

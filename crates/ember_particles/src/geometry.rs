//! Quad geometry for head billboards and tail ribbons.

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

use ember_core::math::encode_float3;

use crate::camera::CameraBasis;
use crate::lifecycle::AtlasCell;

/// Everything needed to build one particle quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadInput {
    pub position: Vec3,
    /// World-space velocity, used by tails.
    pub velocity: Vec3,
    pub scale: f32,
    pub node_scale: Vec3,
    pub head: bool,
    pub xy_quad: bool,
    pub tail_length: f32,
    pub atlas: AtlasCell,
    /// Byte-range RGBA.
    pub color: Vec4,
}

/// Four vertices plus packed per-corner attributes.
///
/// Each corner word packs `(uv column, uv row, alpha)` with
/// [`encode_float3`]; `rgb` packs the color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParticleQuad {
    pub vertices: [f32; 12],
    /// Right-bottom corner.
    pub lta: f32,
    /// Left-bottom corner.
    pub lba: f32,
    /// Right-top corner.
    pub rta: f32,
    /// Left-top corner.
    pub rba: f32,
    pub rgb: f32,
}

/// Interleaved vertex layout for batch submission.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub uv_alpha: f32,
    pub rgb: f32,
}

impl ParticleQuad {
    #[must_use]
    pub fn corner(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.vertices[index * 3..index * 3 + 3])
    }

    /// Vertices in corner order, ready for a vertex buffer.
    #[must_use]
    pub fn to_vertices(&self) -> [ParticleVertex; 4] {
        let words = [self.lta, self.lba, self.rta, self.rba];
        std::array::from_fn(|i| ParticleVertex {
            position: self.corner(i).to_array(),
            uv_alpha: words[i],
            rgb: self.rgb,
        })
    }
}

/// Builds the quad for one particle.
#[must_use]
pub fn emit_quad(input: &QuadInput, camera: &CameraBasis) -> ParticleQuad {
    let extent = input.node_scale * input.scale;

    let corners = if input.head {
        camera
            .quad_vectors(input.xy_quad)
            .map(|offset| input.position + offset * extent)
    } else {
        let side = camera.right() * extent;
        let offset = input.velocity * input.tail_length;
        let lead = input.position + offset;
        let trail = input.position - offset;
        [lead - side, trail - side, trail + side, lead + side]
    };

    let mut vertices = [0.0; 12];
    for (chunk, corner) in vertices.chunks_exact_mut(3).zip(corners) {
        corner.write_to_slice(chunk);
    }

    let (left, top) = (input.atlas.column as f32, input.atlas.row as f32);
    let (right, bottom) = (left + 1.0, top + 1.0);
    let alpha = input.color.w;

    ParticleQuad {
        vertices,
        lta: encode_float3(right, bottom, alpha),
        lba: encode_float3(left, bottom, alpha),
        rta: encode_float3(right, top, alpha),
        rba: encode_float3(left, top, alpha),
        rgb: encode_float3(input.color.x, input.color.y, input.color.z),
    }
}

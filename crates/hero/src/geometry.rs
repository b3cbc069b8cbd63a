//! Procedural torus-knot mesh.
//!
//! The knot is swept along the curve
//!
//! ```text
//!   x = r (2 + cos(q/p·u)) cos(u) / 2
//!   y = r (2 + cos(q/p·u)) sin(u) / 2
//!   z = r  sin(q/p·u) / 2
//! ```
//!
//! with a circular cross-section of radius `tube` oriented by a local
//! tangent/normal/binormal frame. Rings are emitted with a duplicated seam
//! vertex so the index buffer stays a simple grid.

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub(crate) const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// CPU-side mesh ready to be uploaded.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Parameters of a (p, q) torus knot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusKnot {
    pub radius: f32,
    pub tube: f32,
    pub tubular_segments: u32,
    pub radial_segments: u32,
    pub p: u32,
    pub q: u32,
}

impl Default for TorusKnot {
    fn default() -> Self {
        Self {
            radius: 1.0,
            tube: 0.4,
            tubular_segments: 64,
            radial_segments: 8,
            p: 2,
            q: 3,
        }
    }
}

impl TorusKnot {
    /// The knot used by the landing-page hero.
    pub fn hero() -> Self {
        Self {
            radius: 1.0,
            tube: 0.28,
            tubular_segments: 220,
            radial_segments: 36,
            p: 2,
            q: 3,
        }
    }

    pub fn vertex_count(&self) -> usize {
        let (tubular, radial) = self.segments();
        (tubular as usize + 1) * (radial as usize + 1)
    }

    pub fn index_count(&self) -> usize {
        let (tubular, radial) = self.segments();
        tubular as usize * radial as usize * 6
    }

    pub fn build(&self) -> MeshData {
        let (tubular, radial) = self.segments();
        let p = self.p.max(1) as f32;
        let q = self.q as f32;

        let mut vertices = Vec::with_capacity(self.vertex_count());
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * p * TAU;
            let p1 = self.curve_point(u, p, q);
            let p2 = self.curve_point(u + 0.01, p, q);

            let tangent = p2 - p1;
            let mut normal = p2 + p1;
            let binormal = tangent.cross(normal).normalize_or_zero();
            normal = binormal.cross(tangent).normalize_or_zero();

            for j in 0..=radial {
                let v = j as f32 / radial as f32 * TAU;
                let cx = -self.tube * v.cos();
                let cy = self.tube * v.sin();
                let position = p1 + normal * cx + binormal * cy;
                let surface_normal = (position - p1).normalize_or_zero();
                vertices.push(Vertex {
                    position: position.to_array(),
                    normal: surface_normal.to_array(),
                });
            }
        }

        let stride = radial + 1;
        let mut indices = Vec::with_capacity(self.index_count());
        for j in 1..=tubular {
            for i in 1..=radial {
                let a = stride * (j - 1) + (i - 1);
                let b = stride * j + (i - 1);
                let c = stride * j + i;
                let d = stride * (j - 1) + i;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        MeshData { vertices, indices }
    }

    fn segments(&self) -> (u32, u32) {
        (self.tubular_segments.max(3), self.radial_segments.max(3))
    }

    fn curve_point(&self, u: f32, p: f32, q: f32) -> Vec3 {
        let q_over_p = q / p * u;
        let cs = q_over_p.cos();
        Vec3::new(
            self.radius * (2.0 + cs) * 0.5 * u.cos(),
            self.radius * (2.0 + cs) * 0.5 * u.sin(),
            self.radius * q_over_p.sin() * 0.5,
        )
    }
}

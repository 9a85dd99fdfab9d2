//! Lit triangle-mesh building blocks for the set pieces and actors.
//!
//! Everything the renderer draws is assembled CPU-side from these
//! primitives, transformed into place, and uploaded once (static set) or
//! per frame (water surface).

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Vertex data for all scene meshes (position + normal + color)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

/// A growable vertex/index soup that renders as one triangle list.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffer {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append another mesh, offsetting its indices.
    pub fn merge(&mut self, other: MeshBuffer) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.indices.extend(other.indices.into_iter().map(|i| i + base));
    }

    /// Bake a transform into the vertex data.
    ///
    /// Normals go through the inverse-transpose so non-uniform scales stay
    /// correct; a singular matrix leaves them untouched.
    pub fn transform(&mut self, m: Mat4) {
        let normal_matrix = if m.determinant().abs() < 1e-8 {
            Mat4::IDENTITY
        } else {
            m.inverse().transpose()
        };

        for v in &mut self.vertices {
            let p = m.transform_point3(Vec3::from_array(v.position));
            v.position = p.to_array();

            let n = normal_matrix
                .transform_vector3(Vec3::from_array(v.normal))
                .normalize_or_zero();
            v.normal = n.to_array();
        }
    }

    /// Builder-style transform for chaining at assembly sites.
    pub fn transformed(mut self, m: Mat4) -> Self {
        self.transform(m);
        self
    }
}

/// Axis-aligned box centered on the origin.
pub fn cuboid(size: Vec3, color: [f32; 3]) -> MeshBuffer {
    let h = size * 0.5;

    // (normal, tangent u, tangent v) per face, with u x v = normal so the
    // corner loop winds counter-clockwise seen from outside.
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    let mut mesh = MeshBuffer::new();
    for (n, u, v) in faces {
        let center = n * (n.abs().dot(h));
        let ue = u * u.abs().dot(h);
        let ve = v * v.abs().dot(h);

        let base = mesh.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = center + ue * su + ve * sv;
            mesh.vertices.push(Vertex {
                position: p.to_array(),
                normal: n.to_array(),
                color,
            });
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    mesh
}

/// UV sphere centered on the origin.
pub fn sphere(radius: f32, slices: usize, stacks: usize, color: [f32; 3]) -> MeshBuffer {
    let mut mesh = MeshBuffer::new();

    for stack in 0..=stacks {
        let theta = std::f32::consts::PI * stack as f32 / stacks as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        for slice in 0..=slices {
            let phi = 2.0 * std::f32::consts::PI * slice as f32 / slices as f32;
            let (sin_p, cos_p) = phi.sin_cos();

            let n = Vec3::new(sin_t * cos_p, cos_t, sin_t * sin_p);
            mesh.vertices.push(Vertex {
                position: (n * radius).to_array(),
                normal: n.to_array(),
                color,
            });
        }
    }

    let row = (slices + 1) as u32;
    for stack in 0..stacks as u32 {
        for slice in 0..slices as u32 {
            let a = stack * row + slice;
            let b = a + row;
            mesh.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    mesh
}

/// Cone with its base circle in the XY plane and apex on +Z.
pub fn cone(base_radius: f32, height: f32, slices: usize, color: [f32; 3]) -> MeshBuffer {
    let mut mesh = MeshBuffer::new();
    let slant = (height * height + base_radius * base_radius).sqrt();

    // side: one apex vertex per slice keeps the slant normals clean
    for slice in 0..slices {
        let phi0 = 2.0 * std::f32::consts::PI * slice as f32 / slices as f32;
        let phi1 = 2.0 * std::f32::consts::PI * (slice + 1) as f32 / slices as f32;

        let base = mesh.vertices.len() as u32;
        for phi in [phi0, phi1] {
            let (sin_p, cos_p) = phi.sin_cos();
            let n = Vec3::new(
                cos_p * height / slant,
                sin_p * height / slant,
                base_radius / slant,
            );
            mesh.vertices.push(Vertex {
                position: [base_radius * cos_p, base_radius * sin_p, 0.0],
                normal: n.to_array(),
                color,
            });
        }
        let mid = 0.5 * (phi0 + phi1);
        let apex_n = Vec3::new(
            mid.cos() * height / slant,
            mid.sin() * height / slant,
            base_radius / slant,
        );
        mesh.vertices.push(Vertex {
            position: [0.0, 0.0, height],
            normal: apex_n.to_array(),
            color,
        });
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    // base cap facing -Z
    let cap_base = mesh.vertices.len() as u32;
    for slice in 0..=slices {
        let phi = 2.0 * std::f32::consts::PI * slice as f32 / slices as f32;
        mesh.vertices.push(Vertex {
            position: [base_radius * phi.cos(), base_radius * phi.sin(), 0.0],
            normal: [0.0, 0.0, -1.0],
            color,
        });
    }
    let center = mesh.vertices.len() as u32;
    mesh.vertices.push(Vertex {
        position: [0.0, 0.0, 0.0],
        normal: [0.0, 0.0, -1.0],
        color,
    });
    for slice in 0..slices as u32 {
        mesh.indices
            .extend_from_slice(&[center, cap_base + slice + 1, cap_base + slice]);
    }
    mesh
}

/// Annulus in the XY plane facing +Z; `inner_radius` of zero fills the disk.
pub fn disk(inner_radius: f32, outer_radius: f32, slices: usize, color: [f32; 3]) -> MeshBuffer {
    let mut mesh = MeshBuffer::new();

    for slice in 0..=slices {
        let phi = 2.0 * std::f32::consts::PI * slice as f32 / slices as f32;
        let (sin_p, cos_p) = phi.sin_cos();
        for r in [inner_radius, outer_radius] {
            mesh.vertices.push(Vertex {
                position: [r * cos_p, r * sin_p, 0.0],
                normal: [0.0, 0.0, 1.0],
                color,
            });
        }
    }

    for slice in 0..slices as u32 {
        let a = slice * 2; // inner, then outer
        mesh.indices
            .extend_from_slice(&[a, a + 1, a + 3, a + 3, a + 2, a]);
    }
    mesh
}

/// Flat square grid in the XZ plane at y = 0, normal +Y, centered on the origin.
pub fn grid_plane(size: f32, cells: usize, color: [f32; 3]) -> MeshBuffer {
    let mut mesh = MeshBuffer::new();
    let step = size / cells as f32;
    let half = size * 0.5;

    for z in 0..=cells {
        for x in 0..=cells {
            mesh.vertices.push(Vertex {
                position: [x as f32 * step - half, 0.0, z as f32 * step - half],
                normal: [0.0, 1.0, 0.0],
                color,
            });
        }
    }

    let row = (cells + 1) as u32;
    for z in 0..cells as u32 {
        for x in 0..cells as u32 {
            let top_left = z * row + x;
            let bottom_left = top_left + row;
            mesh.indices.extend_from_slice(&[
                top_left,
                bottom_left,
                top_left + 1,
                top_left + 1,
                bottom_left,
                bottom_left + 1,
            ]);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

    #[test]
    fn cuboid_has_six_quad_faces() {
        let m = cuboid(Vec3::new(2.0, 4.0, 6.0), WHITE);
        assert_eq!(m.vertices.len(), 24);
        assert_eq!(m.indices.len(), 36);
    }

    #[test]
    fn cuboid_normals_are_axis_aligned_units() {
        let m = cuboid(Vec3::splat(1.0), WHITE);
        for v in &m.vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-6);
            assert_eq!(n.abs().max_element(), 1.0);
        }
    }

    #[test]
    fn sphere_normals_point_outward() {
        let m = sphere(2.0, 16, 8, WHITE);
        for v in &m.vertices {
            let p = Vec3::from_array(v.position);
            let n = Vec3::from_array(v.normal);
            assert!((p.length() - 2.0).abs() < 1e-4);
            assert!(p.normalize().dot(n) > 0.999);
        }
    }

    #[test]
    fn grid_plane_counts_match_resolution() {
        let m = grid_plane(60.0, 32, WHITE);
        assert_eq!(m.vertices.len(), 33 * 33);
        assert_eq!(m.indices.len(), 32 * 32 * 6);
    }

    #[test]
    fn merge_offsets_indices() {
        let mut a = cuboid(Vec3::ONE, WHITE);
        let b = cuboid(Vec3::ONE, WHITE);
        a.merge(b);
        assert_eq!(a.vertices.len(), 48);
        assert_eq!(a.indices.len(), 72);
        assert!(a.indices[36..].iter().all(|&i| i >= 24));
    }

    #[test]
    fn transform_rescales_normals_with_nonuniform_scale() {
        let mut m = sphere(1.0, 16, 8, WHITE);
        m.transform(Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0)));
        for v in &m.vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }
}

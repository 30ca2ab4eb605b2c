//! Procedural meshes: UV sphere, unit cube, and ground plane.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::PI;

/// Interleaved vertex: position, normal, texture coordinate.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3, uv: [f32; 2]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv,
        }
    }
}

/// CPU-side indexed triangle list.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles described by the index list.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Latitude/longitude sphere centred at the origin.
///
/// Produces `(rings + 1) * (segments + 1)` vertices; the seam column is
/// duplicated so `u` runs from 0 to 1. Normals point outward.
pub fn sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let stride = segments + 1;

    let mut vertices = Vec::with_capacity(((rings + 1) * stride) as usize);
    for ring in 0..=rings {
        let phi = PI * ring as f32 / rings as f32;
        for seg in 0..=segments {
            let theta = 2.0 * PI * seg as f32 / segments as f32;
            let position = Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            );
            let uv = [seg as f32 / segments as f32, ring as f32 / rings as f32];
            vertices.push(Vertex::new(position, position.normalize_or_zero(), uv));
        }
    }

    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
    for ring in 0..rings {
        for seg in 0..segments {
            let current = ring * stride + seg;
            let next = current + stride;
            indices.extend_from_slice(&[current, next, current + 1]);
            indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }

    MeshData { vertices, indices }
}

/// (normal, u axis, v axis) for each face of the cube.
const CUBE_FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
];

/// Unit cube centred at the origin with flat per-face normals (24 vertices, 36 indices).
pub fn cube() -> MeshData {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u_axis, v_axis) in CUBE_FACES {
        let base = vertices.len() as u32;
        let center = normal * 0.5;
        for (u, v) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            let position = center + u_axis * (u - 0.5) + v_axis * (v - 0.5);
            vertices.push(Vertex::new(position, normal, [u, v]));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    MeshData { vertices, indices }
}

/// Square of side `size` on the XZ plane, facing `+Y`.
pub fn plane(size: f32) -> MeshData {
    let h = size / 2.0;
    let corners = [
        (Vec3::new(-h, 0.0, -h), [0.0, 0.0]),
        (Vec3::new(h, 0.0, -h), [1.0, 0.0]),
        (Vec3::new(h, 0.0, h), [1.0, 1.0]),
        (Vec3::new(-h, 0.0, h), [0.0, 1.0]),
    ];
    MeshData {
        vertices: corners
            .into_iter()
            .map(|(p, uv)| Vertex::new(p, Vec3::Y, uv))
            .collect(),
        indices: vec![0, 1, 2, 2, 3, 0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_vertex_and_index_counts() {
        let mesh = sphere(1.5, 64, 32);
        assert_eq!(mesh.vertices.len(), 33 * 65);
        assert_eq!(mesh.indices.len(), 32 * 64 * 6);
        assert_eq!(mesh.triangle_count(), 32 * 64 * 2);
    }

    #[test]
    fn test_sphere_vertices_on_radius() {
        let mesh = sphere(50.0, 32, 16);
        for v in &mesh.vertices {
            let len = Vec3::from(v.position).length();
            assert!((len - 50.0).abs() < 1e-3, "vertex at {len}");
        }
    }

    #[test]
    fn test_sphere_normals_point_outward() {
        let mesh = sphere(0.3, 32, 16);
        for v in &mesh.vertices {
            let n = Vec3::from(v.normal);
            let p = Vec3::from(v.position);
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(n.dot(p.normalize()) > 0.999);
        }
    }

    #[test]
    fn test_sphere_poles_and_uvs() {
        let mesh = sphere(2.0, 8, 4);
        assert!(Vec3::from(mesh.vertices[0].position).abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-5));
        let last = mesh.vertices.last().unwrap();
        assert!((last.position[1] + 2.0).abs() < 1e-5);
        assert_eq!(last.uv, [1.0, 1.0]);
        for v in &mesh.vertices {
            assert!((0.0..=1.0).contains(&v.uv[0]) && (0.0..=1.0).contains(&v.uv[1]));
        }
    }

    #[test]
    fn test_sphere_indices_in_range() {
        let mesh = sphere(1.0, 16, 8);
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_cube_counts() {
        let mesh = cube();
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
    }

    #[test]
    fn test_cube_faces_lie_on_their_normals() {
        let mesh = cube();
        for v in &mesh.vertices {
            let n = Vec3::from(v.normal);
            let p = Vec3::from(v.position);
            assert!((p.dot(n) - 0.5).abs() < 1e-6);
            assert!(p.abs().max_element() <= 0.5 + 1e-6);
        }
    }

    #[test]
    fn test_cube_triangles_wind_outward() {
        let mesh = cube();
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(mesh.vertices[i as usize].position));
            let face_normal = (b - a).cross(c - a).normalize();
            let n = Vec3::from(mesh.vertices[tri[0] as usize].normal);
            assert!(face_normal.abs_diff_eq(n, 1e-5));
        }
    }

    #[test]
    fn test_plane_faces_up() {
        let mesh = plane(10.0);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 2, 3, 0]);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
        assert_eq!(mesh.vertices[2].position, [5.0, 0.0, 5.0]);
    }
}

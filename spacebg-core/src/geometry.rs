use glam::Vec3;

use crate::uniforms::MeshVertex;

/// Non-indexed, flat-shaded triangle mesh ready for upload.
pub struct MeshGeometry {
    pub vertices: Vec<MeshVertex>,
}

impl MeshGeometry {
    /// Regular dodecahedron (twelve pentagonal faces) inscribed in a sphere of `radius`.
    ///
    /// Each pentagon is fanned into three triangles, wound counter-clockwise seen
    /// from outside, and every vertex carries its face normal.
    pub fn dodecahedron(radius: f32) -> Self {
        let corners = dodecahedron_corners();
        let mut vertices = Vec::with_capacity(12 * 3 * 3);

        for normal in dodecahedron_face_normals() {
            let face = face_ring(&corners, normal);
            for i in 1..face.len() - 1 {
                for corner in [face[0], face[i], face[i + 1]] {
                    vertices.push(MeshVertex {
                        position: (corner * radius).to_array(),
                        normal: normal.to_array(),
                    });
                }
            }
        }

        Self { vertices }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }
}

/// The 20 corners, normalized onto the unit sphere.
fn dodecahedron_corners() -> Vec<Vec3> {
    let phi = (1.0 + 5f32.sqrt()) / 2.0;
    let inv = 1.0 / phi;
    let mut corners = Vec::with_capacity(20);

    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                corners.push(Vec3::new(x, y, z));
            }
        }
    }
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            corners.push(Vec3::new(0.0, a * inv, b * phi));
            corners.push(Vec3::new(a * inv, b * phi, 0.0));
            corners.push(Vec3::new(a * phi, 0.0, b * inv));
        }
    }

    corners.into_iter().map(Vec3::normalize).collect()
}

/// Face normals are the icosahedron's vertex directions (the dual solid).
fn dodecahedron_face_normals() -> Vec<Vec3> {
    let phi = (1.0 + 5f32.sqrt()) / 2.0;
    let mut normals = Vec::with_capacity(12);
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            normals.push(Vec3::new(0.0, a * phi, b));
            normals.push(Vec3::new(a * phi, b, 0.0));
            normals.push(Vec3::new(a, 0.0, b * phi));
        }
    }
    normals.into_iter().map(Vec3::normalize).collect()
}

/// The five corners closest to `normal`, ordered counter-clockwise around it.
fn face_ring(corners: &[Vec3], normal: Vec3) -> Vec<Vec3> {
    let mut by_alignment: Vec<Vec3> = corners.to_vec();
    by_alignment.sort_by(|a, b| {
        b.dot(normal)
            .partial_cmp(&a.dot(normal))
            .unwrap_or(core::cmp::Ordering::Equal)
    });
    let mut ring: Vec<Vec3> = by_alignment.into_iter().take(5).collect();

    let center = ring.iter().copied().sum::<Vec3>() / ring.len() as f32;
    let u = (ring[0] - center).normalize();
    let v = normal.cross(u);
    ring.sort_by(|a, b| {
        let angle = |p: &Vec3| {
            let d = *p - center;
            d.dot(v).atan2(d.dot(u))
        };
        angle(a)
            .partial_cmp(&angle(b))
            .unwrap_or(core::cmp::Ordering::Equal)
    });
    ring
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_dodecahedron_counts() {
        let mesh = MeshGeometry::dodecahedron(1.0);
        // 12 pentagons x 3 triangles x 3 vertices
        assert_eq!(mesh.vertex_count(), 108);
    }

    #[test]
    fn test_corners_unique_on_sphere() {
        let corners = dodecahedron_corners();
        assert_eq!(corners.len(), 20);
        for (i, a) in corners.iter().enumerate() {
            assert!((a.length() - 1.0).abs() < EPSILON);
            for b in &corners[i + 1..] {
                assert!(a.distance(*b) > 0.1, "duplicate corner {a:?}");
            }
        }
    }

    #[test]
    fn test_faces_are_regular_pentagons() {
        let corners = dodecahedron_corners();
        let mut edge = None;
        for normal in dodecahedron_face_normals() {
            let ring = face_ring(&corners, normal);
            for i in 0..5 {
                let len = ring[i].distance(ring[(i + 1) % 5]);
                let expected = *edge.get_or_insert(len);
                assert!((len - expected).abs() < EPSILON, "edge {len} != {expected}");
            }
        }
    }

    #[test]
    fn test_every_corner_shared_by_three_faces() {
        let corners = dodecahedron_corners();
        let mut uses = vec![0; corners.len()];
        for normal in dodecahedron_face_normals() {
            for p in face_ring(&corners, normal) {
                let idx = corners.iter().position(|c| c.distance(p) < EPSILON).unwrap();
                uses[idx] += 1;
            }
        }
        assert!(uses.iter().all(|&n| n == 3), "{uses:?}");
    }

    #[test]
    fn test_triangles_wind_outward() {
        let mesh = MeshGeometry::dodecahedron(1.0);
        for tri in mesh.vertices.chunks(3) {
            let a = Vec3::from(tri[0].position);
            let b = Vec3::from(tri[1].position);
            let c = Vec3::from(tri[2].position);
            let n = Vec3::from(tri[0].normal);
            assert!((n.length() - 1.0).abs() < EPSILON);
            let winding = (b - a).cross(c - a);
            assert!(winding.dot(n) > 0.0, "triangle wound inward");
            let centroid = (a + b + c) / 3.0;
            assert!(centroid.dot(n) > 0.0, "normal points inward");
        }
    }

    #[test]
    fn test_radius_scales_positions() {
        let mesh = MeshGeometry::dodecahedron(2.5);
        for v in &mesh.vertices {
            assert!((Vec3::from(v.position).length() - 2.5).abs() < EPSILON);
        }
    }
}

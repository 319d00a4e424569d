//! Triangle tessellation of polygon rings.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use facet_math::Vec3;

use super::ring::PolygonRing;
use crate::mesh::Mesh;

/// Tessellation density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tessellation {
    /// Subdivisions along each corner arc.
    pub arc_steps: u32,
    /// Subdivisions around the full tube cross-section.
    pub tube_steps: u32,
}

impl Default for Tessellation {
    fn default() -> Self {
        Self {
            arc_steps: 12,
            tube_steps: 16,
        }
    }
}

/// Accumulates parametric grids into one indexed mesh.
#[derive(Default)]
struct MeshBuilder {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

impl MeshBuilder {
    fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2]) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        index
    }

    /// Add a `rows x cols` quad grid sampled by `surface(u, v)` with `u`, `v`
    /// in `[0, 1]`. `∂v × ∂u` must point outward.
    fn push_grid<F>(&mut self, rows: u32, cols: u32, surface: F)
    where
        F: Fn(f32, f32) -> (Vec3, Vec3),
    {
        let base = self.positions.len() as u32;
        let stride = cols + 1;

        for i in 0..=rows {
            let u = i as f32 / rows as f32;
            for j in 0..=cols {
                let v = j as f32 / cols as f32;
                let (position, normal) = surface(u, v);
                self.push_vertex(position, normal, [u, v]);
            }
        }

        for i in 0..rows {
            for j in 0..cols {
                let p00 = base + i * stride + j;
                let p10 = p00 + stride;
                let p01 = p00 + 1;
                let p11 = p10 + 1;
                self.indices.extend_from_slice(&[p00, p10, p01, p10, p11, p01]);
            }
        }
    }

    /// Fan-triangulated flat cap over `outline`, facing `+Y` or `-Y`.
    fn push_cap(&mut self, outline: &[Vec3], height: f32, facing_up: bool) {
        let normal = if facing_up { Vec3::Y } else { Vec3::NEG_Y };
        let lift = Vec3::Y * height;
        let center = self.push_vertex(lift, normal, [0.5, 0.5]);

        let radius = outline
            .iter()
            .map(|p| p.length())
            .fold(f32::EPSILON, f32::max);
        let first = self.positions.len() as u32;
        for p in outline {
            let uv = [0.5 + 0.5 * p.x / radius, 0.5 + 0.5 * p.z / radius];
            self.push_vertex(*p + lift, normal, uv);
        }

        let count = outline.len() as u32;
        for k in 0..count {
            let a = first + k;
            let b = first + (k + 1) % count;
            if facing_up {
                self.indices.extend_from_slice(&[center, a, b]);
            } else {
                self.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }

    fn finish(self) -> Mesh {
        Mesh::new_with_uvs(self.positions, self.indices, Some(self.normals), Some(self.uvs))
    }
}

impl PolygonRing {
    /// Tessellate the ring into a triangle mesh with analytic normals.
    ///
    /// Open rings emit every tube in full. Filled rings emit only the outer
    /// half of each tube plus flat caps at `±tube_radius`, which together
    /// enclose the merged solid without any interior faces.
    pub fn tessellate(&self, quality: &Tessellation) -> Mesh {
        let arc_steps = quality.arc_steps.max(1);
        let filled = self.is_filled();

        // Tube cross-section: full circle, or the outward half when filled
        let (phi_start, phi_span, tube_steps) = if filled {
            (-FRAC_PI_2, PI, (quality.tube_steps / 2).max(2))
        } else {
            (0.0, TAU, quality.tube_steps.max(3))
        };

        let mut builder = MeshBuilder::default();

        for segment in &self.segments {
            if !filled && segment.major_radius < segment.minor_radius {
                // Spindle torus: keep the part where the sweep radius stays non-negative
                let phi_max = (-segment.major_radius / segment.minor_radius).acos();
                builder.push_grid(arc_steps, tube_steps, |u, v| {
                    segment.surface(u, -phi_max + v * 2.0 * phi_max)
                });
            } else {
                builder.push_grid(arc_steps, tube_steps, |u, v| {
                    segment.surface(u, phi_start + v * phi_span)
                });
            }
        }

        for edge in self.edges.iter().filter(|edge| !edge.is_degenerate()) {
            builder.push_grid(1, tube_steps, |u, v| edge.surface(u, phi_start + v * phi_span));
        }

        if let Some(fill) = &self.fill {
            let outline = self.outline(arc_steps);
            builder.push_cap(&outline, fill.half_thickness, true);
            builder.push_cap(&outline, -fill.half_thickness, false);
        }

        let mesh = builder.finish();
        log::debug!(
            "Tessellated {}-corner ring: {} vertices, {} triangles",
            self.segment_count(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::PolygonRingSpec;

    fn face_normal(mesh: &Mesh, face: &[u32]) -> Vec3 {
        let p0 = mesh.positions[face[0] as usize];
        let p1 = mesh.positions[face[1] as usize];
        let p2 = mesh.positions[face[2] as usize];
        (p2 - p0).cross(p1 - p0)
    }

    fn assert_outward_winding(mesh: &Mesh) {
        let normals = mesh.normals.as_ref().unwrap();
        let mut checked = 0;

        for face in mesh.indices.chunks_exact(3) {
            let n = face_normal(mesh, face);
            if n.length() < 1e-8 {
                continue;
            }
            let analytic: Vec3 = face.iter().map(|&i| normals[i as usize]).sum();
            assert!(n.dot(analytic) > 0.0, "inward-facing triangle {:?}", face);
            checked += 1;
        }

        assert!(checked > 0);
    }

    #[test]
    fn test_open_ring_counts() {
        let quality = Tessellation {
            arc_steps: 4,
            tube_steps: 8,
        };
        let ring = PolygonRingSpec::new(6, 0.1, 1.0)
            .with_segment_radius(0.2)
            .generate()
            .unwrap();
        let mesh = ring.tessellate(&quality);

        // 6 arcs of 5x9 vertices, 6 edges of 2x9 vertices
        assert_eq!(mesh.vertex_count(), 6 * 5 * 9 + 6 * 2 * 9);
        assert_eq!(mesh.triangle_count(), 6 * 4 * 8 * 2 + 6 * 8 * 2);
        assert!(mesh.has_normals());
        assert!(mesh.has_uvs());
    }

    #[test]
    fn test_open_ring_winding_is_outward() {
        let ring = PolygonRingSpec::new(5, 0.1, 1.0)
            .with_segment_radius(0.25)
            .generate()
            .unwrap();
        assert_outward_winding(&ring.tessellate(&Tessellation::default()));
    }

    #[test]
    fn test_sharp_corner_winding_is_outward() {
        let ring = PolygonRingSpec::new(4, 0.1, 1.0).generate().unwrap();
        assert_outward_winding(&ring.tessellate(&Tessellation::default()));
    }

    #[test]
    fn test_filled_ring_winding_is_outward() {
        let ring = PolygonRingSpec::new(6, 0.1, 1.0)
            .with_segment_radius(0.2)
            .with_filled(true)
            .generate()
            .unwrap();
        assert_outward_winding(&ring.tessellate(&Tessellation::default()));
    }

    #[test]
    fn test_computed_normals_agree_with_analytic() {
        let ring = PolygonRingSpec::new(8, 0.1, 2.0)
            .with_segment_radius(0.3)
            .generate()
            .unwrap();
        let mesh = ring.tessellate(&Tessellation::default());

        let mut recomputed = mesh.clone();
        recomputed.compute_normals();

        let analytic = mesh.normals.as_ref().unwrap();
        let computed = recomputed.normals.as_ref().unwrap();
        for (a, c) in analytic.iter().zip(computed) {
            assert!(a.dot(*c) > 0.0);
        }
    }

    #[test]
    fn test_filled_ring_stays_within_slab() {
        let ring = PolygonRingSpec::new(6, 0.1, 1.0)
            .with_segment_radius(0.2)
            .with_filled(true)
            .generate()
            .unwrap();
        let mesh = ring.tessellate(&Tessellation::default());

        assert!(mesh.bounds.max.y <= 0.1 + 1e-5);
        assert!(mesh.bounds.min.y >= -0.1 - 1e-5);

        // Top cap is a fan with one triangle per outline point
        let outline = ring.outline(Tessellation::default().arc_steps);
        let facing_up = mesh
            .indices
            .chunks_exact(3)
            .filter(|f| face_normal(&mesh, f).normalize_or_zero().y > 0.999)
            .count();
        assert!(facing_up >= outline.len());
    }

    #[test]
    fn test_mesh_within_ring_bounds() {
        let ring = PolygonRingSpec::new(3, 0.2, 1.5)
            .with_segment_radius(0.1)
            .generate()
            .unwrap();
        let mesh = ring.tessellate(&Tessellation::default());

        for p in &mesh.positions {
            assert!(ring.bounds.contains(*p, 1e-4));
        }
    }

    #[test]
    fn test_degenerate_edges_skipped() {
        let spec = PolygonRingSpec::new(4, 0.1, 1.0);
        let ring = spec.with_segment_radius(spec.apothem()).generate().unwrap();
        let quality = Tessellation {
            arc_steps: 2,
            tube_steps: 4,
        };
        let mesh = ring.tessellate(&quality);

        assert_eq!(mesh.vertex_count(), 4 * 3 * 5);
    }
}

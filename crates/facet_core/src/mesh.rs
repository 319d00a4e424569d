//! Triangle mesh representation for tessellated primitives.
//!
//! Meshes use clockwise winding: for a triangle `(p0, p1, p2)` the outward
//! normal is `(p2 - p0) × (p1 - p0)`. [`Mesh::write_obj`] flips faces to
//! the counter-clockwise order OBJ readers expect.

use std::io::{self, Write};

use facet_math::{Aabb, Vec3};

/// A mesh consisting of vertex positions, optional normals and UVs, and triangle indices.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Vertex normals (optional - will be computed if not provided)
    pub normals: Option<Vec<Vec3>>,

    /// UV coordinates (optional - one [u, v] per vertex)
    pub uvs: Option<Vec<[f32; 2]>>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    /// Axis-aligned bounding box
    pub bounds: Aabb,
}

impl Mesh {
    /// Create a new mesh from positions and indices, optionally with normals.
    ///
    /// Missing normals are NOT computed here; call `compute_normals()` or
    /// `ensure_normals()` when they are needed.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, normals: Option<Vec<Vec3>>) -> Self {
        Self::new_with_uvs(positions, indices, normals, None)
    }

    /// Create a new mesh with UV coordinates.
    pub fn new_with_uvs(
        positions: Vec<Vec3>,
        indices: Vec<u32>,
        normals: Option<Vec<Vec3>>,
        uvs: Option<Vec<[f32; 2]>>,
    ) -> Self {
        let bounds = Aabb::enclosing(positions.iter().copied());
        Self {
            positions,
            normals,
            uvs,
            indices,
            bounds,
        }
    }

    /// Compute smooth vertex normals by averaging face normals.
    ///
    /// Replaces existing normals. Vertices with no non-degenerate face get +Y.
    pub fn compute_normals(&mut self) {
        let vertex_count = self.positions.len();
        let mut normals = vec![Vec3::ZERO; vertex_count];

        for face in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (face[0] as usize, face[1] as usize, face[2] as usize);
            if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
                continue;
            }

            let p0 = self.positions[i0];
            let edge1 = self.positions[i1] - p0;
            let edge2 = self.positions[i2] - p0;
            let face_normal = edge2.cross(edge1); // clockwise winding

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for normal in &mut normals {
            *normal = normal.try_normalize().unwrap_or(Vec3::Y);
        }

        self.normals = Some(normals);
    }

    /// Check if the mesh has normals.
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Check if the mesh has UV coordinates.
    pub fn has_uvs(&self) -> bool {
        self.uvs.is_some()
    }

    /// Ensure the mesh has one normal per vertex, computing them if necessary.
    pub fn ensure_normals(&mut self) {
        let stale = match &self.normals {
            None => true,
            Some(normals) if normals.len() != self.positions.len() => {
                log::debug!(
                    "Normals array length ({}) doesn't match vertex count ({}), computing smooth normals",
                    normals.len(),
                    self.positions.len()
                );
                true
            }
            Some(_) => false,
        };

        if stale {
            self.compute_normals();
        }
    }

    /// Append another mesh, re-indexing its triangles.
    ///
    /// Normals and UVs are kept only if both meshes carry them.
    pub fn append(&mut self, other: &Mesh) {
        let base = self.positions.len() as u32;
        let was_empty = self.positions.is_empty();

        self.normals = match (self.normals.take(), &other.normals) {
            (Some(mut mine), Some(theirs)) => {
                mine.extend_from_slice(theirs);
                Some(mine)
            }
            (None, Some(theirs)) if was_empty => Some(theirs.clone()),
            _ => None,
        };
        self.uvs = match (self.uvs.take(), &other.uvs) {
            (Some(mut mine), Some(theirs)) => {
                mine.extend_from_slice(theirs);
                Some(mine)
            }
            (None, Some(theirs)) if was_empty => Some(theirs.clone()),
            _ => None,
        };

        self.positions.extend_from_slice(&other.positions);
        self.indices.extend(other.indices.iter().map(|i| i + base));
        self.bounds = Aabb::surrounding(&self.bounds, &other.bounds);
    }

    /// Get the mesh center (center of bounding box).
    pub fn center(&self) -> Vec3 {
        self.bounds.centroid()
    }

    /// Get the mesh size (diagonal length of bounding box).
    pub fn size(&self) -> f32 {
        self.bounds.extent().length()
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Write the mesh as a Wavefront OBJ object named `name`.
    pub fn write_obj<W: Write>(&self, out: &mut W, name: &str) -> io::Result<()> {
        writeln!(out, "o {}", name)?;

        for p in &self.positions {
            writeln!(out, "v {:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
        }
        if let Some(uvs) = &self.uvs {
            for uv in uvs {
                writeln!(out, "vt {:.6} {:.6}", uv[0], uv[1])?;
            }
        }
        if let Some(normals) = &self.normals {
            for n in normals {
                writeln!(out, "vn {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
            }
        }

        let has_uvs = self.uvs.as_ref().map_or(false, |uvs| uvs.len() == self.positions.len());
        let has_normals = self
            .normals
            .as_ref()
            .map_or(false, |normals| normals.len() == self.positions.len());

        for face in self.indices.chunks_exact(3) {
            write!(out, "f")?;
            // OBJ expects counter-clockwise faces
            for &i in &[face[0], face[2], face[1]] {
                let i = i + 1;
                match (has_uvs, has_normals) {
                    (true, true) => write!(out, " {}/{}/{}", i, i, i)?,
                    (true, false) => write!(out, " {}/{}", i, i)?,
                    (false, true) => write!(out, " {}//{}", i, i)?,
                    (false, false) => write!(out, " {}", i)?,
                }
            }
            writeln!(out)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        Mesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2],
            None,
        )
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = triangle();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.has_normals());
        assert!(!mesh.has_uvs());
    }

    #[test]
    fn test_compute_normals() {
        // Clockwise winding: 0,1,2 viewed from +Z produces normal pointing -Z
        let mut mesh = triangle();
        mesh.compute_normals();

        let normals = mesh.normals.as_ref().unwrap();
        for normal in normals {
            assert!((normal.z + 1.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_ensure_normals_replaces_mismatched() {
        let mut mesh = triangle();
        mesh.normals = Some(vec![Vec3::X]);
        mesh.ensure_normals();

        assert_eq!(mesh.normals.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn test_bounds_computation() {
        let mesh = Mesh::new(
            vec![
                Vec3::new(-1.0, -2.0, -3.0),
                Vec3::new(4.0, 5.0, 6.0),
                Vec3::new(0.0, 0.0, 0.0),
            ],
            vec![0, 1, 2],
            None,
        );

        assert_eq!(mesh.bounds.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(mesh.bounds.max, Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(mesh.center(), Vec3::new(1.5, 1.5, 1.5));
    }

    #[test]
    fn test_append_reindexes() {
        let mut mesh = triangle();
        let mut other = triangle();
        for p in &mut other.positions {
            *p += Vec3::Z;
        }
        other.bounds = other.bounds.translate(Vec3::Z);

        mesh.append(&other);

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.bounds.max.z, 1.0);
        assert!(!mesh.has_normals());
    }

    #[test]
    fn test_append_into_empty_keeps_attributes() {
        let mut other = triangle();
        other.compute_normals();

        let mut mesh = Mesh::default();
        mesh.append(&other);

        assert!(mesh.has_normals());
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_write_obj_flips_winding() {
        let mut mesh = triangle();
        mesh.compute_normals();

        let mut out = Vec::new();
        mesh.write_obj(&mut out, "tri").unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("o tri\n"));
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 3);
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 3);
        assert!(text.contains("f 1//1 3//3 2//2"));
    }
}

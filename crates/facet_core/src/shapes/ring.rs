//! Tube polygon generation.
//!
//! The ring lies in the XZ plane around the +Y axis. Corner `i` sits at
//! angle `i * 2π / n`, measured from +X toward +Z. Each corner is a torus
//! segment sweeping `2π / n`; consecutive segments are joined by straight
//! tubes tangent to both arcs, so the tube centerline is a regular polygon
//! with rounded corners.

use std::f32::consts::{PI, TAU};

use facet_math::{planar_direction, Aabb, Vec3};
use serde::{Deserialize, Serialize};

use super::{invalid, ShapeResult};

/// Parameters of a tube polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolygonRingSpec {
    /// Number of corners (≥ 3).
    pub corner_count: u32,

    /// Radius of the tube cross-section (torus minor radius).
    pub tube_radius: f32,

    /// Distance from the ring axis to each corner of the centerline polygon.
    pub base_width: f32,

    /// Rounding radius of each corner (torus major radius). Zero gives
    /// sharp corners joined by spherical wedges.
    #[serde(default)]
    pub segment_radius: f32,

    /// Merge into a solid disk silhouette instead of an open ring.
    #[serde(default)]
    pub filled: bool,
}

impl PolygonRingSpec {
    /// Create a spec with sharp corners in ring mode.
    pub fn new(corner_count: u32, tube_radius: f32, base_width: f32) -> Self {
        Self {
            corner_count,
            tube_radius,
            base_width,
            segment_radius: 0.0,
            filled: false,
        }
    }

    pub fn with_segment_radius(mut self, segment_radius: f32) -> Self {
        self.segment_radius = segment_radius;
        self
    }

    pub fn with_filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }

    /// Angle between consecutive corners (radians).
    pub fn corner_step(&self) -> f32 {
        TAU / self.corner_count.max(1) as f32
    }

    /// Distance from the axis to the middle of each polygon side.
    pub fn apothem(&self) -> f32 {
        self.base_width * (PI / self.corner_count.max(1) as f32).cos()
    }

    /// Check every invariant the generator relies on.
    pub fn validate(&self) -> ShapeResult<()> {
        if self.corner_count < 3 {
            return Err(invalid(
                "corner_count",
                format!("need at least 3 corners, got {}", self.corner_count),
            ));
        }

        for (name, value) in [
            ("tube_radius", self.tube_radius),
            ("base_width", self.base_width),
            ("segment_radius", self.segment_radius),
        ] {
            if !value.is_finite() {
                return Err(invalid(name, format!("must be finite, got {}", value)));
            }
        }

        if self.tube_radius <= 0.0 {
            return Err(invalid(
                "tube_radius",
                format!("must be positive, got {}", self.tube_radius),
            ));
        }

        if self.tube_radius >= self.base_width {
            return Err(invalid(
                "tube_radius",
                format!(
                    "{} must be smaller than base width {}",
                    self.tube_radius, self.base_width
                ),
            ));
        }

        if self.segment_radius < 0.0 {
            return Err(invalid(
                "segment_radius",
                format!("must not be negative, got {}", self.segment_radius),
            ));
        }

        let apothem = self.apothem();
        if self.segment_radius > apothem * (1.0 + 1e-5) {
            return Err(invalid(
                "segment_radius",
                format!(
                    "{} exceeds the polygon apothem {}",
                    self.segment_radius, apothem
                ),
            ));
        }

        Ok(())
    }

    /// Generate the ring described by this spec.
    pub fn generate(&self) -> ShapeResult<PolygonRing> {
        PolygonRing::new(*self)
    }
}

/// How the parts of a ring are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsgOp {
    /// Plain union; internal surfaces are kept.
    Union,
    /// Union without internal surfaces, needed for transparent materials.
    Merge,
}

/// A rounded corner: part of a torus around an axis parallel to +Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorusSegment {
    /// Center of the torus.
    pub center: Vec3,
    /// Direction of the corner (radians).
    pub angle: f32,
    /// Angular extent of the arc, centered on `angle` (radians).
    pub sweep: f32,
    pub major_radius: f32,
    pub minor_radius: f32,
}

impl TorusSegment {
    pub fn start_angle(&self) -> f32 {
        self.angle - self.sweep * 0.5
    }

    pub fn end_angle(&self) -> f32 {
        self.angle + self.sweep * 0.5
    }

    /// Point on the tube centerline, `t` in `[0, 1]` along the sweep.
    pub fn centerline_point(&self, t: f32) -> Vec3 {
        let psi = self.start_angle() + t * self.sweep;
        self.center + self.major_radius * planar_direction(psi)
    }

    /// Surface point and outward normal at sweep `t` and tube angle `phi`
    /// (`phi = 0` faces away from the torus center, `π/2` faces +Y).
    pub fn surface(&self, t: f32, phi: f32) -> (Vec3, Vec3) {
        let psi = self.start_angle() + t * self.sweep;
        let radial = planar_direction(psi);
        let normal = radial * phi.cos() + Vec3::Y * phi.sin();
        (
            self.center + radial * self.major_radius + normal * self.minor_radius,
            normal,
        )
    }

    /// Conservative bounds (the full torus).
    pub fn bounds(&self) -> Aabb {
        let reach = self.major_radius + self.minor_radius;
        Aabb::from_center(self.center, Vec3::new(reach, self.minor_radius, reach))
    }
}

/// Straight tube joining two consecutive corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TubeEdge {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
    /// Outward in-plane normal of the polygon side.
    pub normal: Vec3,
}

impl TubeEdge {
    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }

    /// True when the neighbouring arcs meet and the edge has no extent.
    pub fn is_degenerate(&self) -> bool {
        self.length() <= 1e-6
    }

    /// Surface point and outward normal at `s` in `[0, 1]` along the edge.
    pub fn surface(&self, s: f32, phi: f32) -> (Vec3, Vec3) {
        let normal = self.normal * phi.cos() + Vec3::Y * phi.sin();
        (
            self.start.lerp(self.end, s) + normal * self.radius,
            normal,
        )
    }

    pub fn bounds(&self) -> Aabb {
        let r = Vec3::splat(self.radius);
        let line = Aabb::from_points(self.start, self.end);
        Aabb::from_points(line.min - r, line.max + r)
    }
}

/// Interior slab of a filled ring: the region enclosed by the tube
/// centerline, `half_thickness` above and below the ring plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingFill {
    pub half_thickness: f32,
}

/// A generated tube polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonRing {
    pub spec: PolygonRingSpec,
    /// One rounded corner per polygon corner, in angular order.
    pub segments: Vec<TorusSegment>,
    /// `edges[i]` joins `segments[i]` to `segments[(i + 1) % n]`.
    pub edges: Vec<TubeEdge>,
    pub op: CsgOp,
    pub fill: Option<RingFill>,
    pub bounds: Aabb,
}

impl PolygonRing {
    /// Validate `spec` and lay out the ring.
    pub fn new(spec: PolygonRingSpec) -> ShapeResult<Self> {
        spec.validate()?;

        let n = spec.corner_count as usize;
        let step = spec.corner_step();
        // Corner torus centers sit inward so each arc is tangent to both sides
        let offset = (spec.base_width - spec.segment_radius / (step * 0.5).cos()).max(0.0);

        let segments: Vec<TorusSegment> = (0..n)
            .map(|i| {
                let angle = i as f32 * step;
                TorusSegment {
                    center: planar_direction(angle) * offset,
                    angle,
                    sweep: step,
                    major_radius: spec.segment_radius,
                    minor_radius: spec.tube_radius,
                }
            })
            .collect();

        let edges: Vec<TubeEdge> = (0..n)
            .map(|i| {
                let from = &segments[i];
                let to = &segments[(i + 1) % n];
                TubeEdge {
                    start: from.centerline_point(1.0),
                    end: to.centerline_point(0.0),
                    radius: spec.tube_radius,
                    normal: planar_direction(from.end_angle()),
                }
            })
            .collect();

        let bounds = segments
            .iter()
            .map(TorusSegment::bounds)
            .chain(edges.iter().map(TubeEdge::bounds))
            .fold(Aabb::EMPTY, |acc, b| Aabb::surrounding(&acc, &b));

        let (op, fill) = if spec.filled {
            (
                CsgOp::Merge,
                Some(RingFill {
                    half_thickness: spec.tube_radius,
                }),
            )
        } else {
            (CsgOp::Union, None)
        };

        log::debug!(
            "Generated {}-corner ring ({:?}), base width {}, tube radius {}",
            n,
            op,
            spec.base_width,
            spec.tube_radius
        );

        Ok(Self {
            spec,
            segments,
            edges,
            op,
            fill,
            bounds,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_filled(&self) -> bool {
        self.fill.is_some()
    }

    /// Tube centerline sampled with `arc_steps` intervals per corner arc,
    /// in angular order and without repeated points.
    pub fn outline(&self, arc_steps: u32) -> Vec<Vec3> {
        let steps = arc_steps.max(1);
        let mut points: Vec<Vec3> = Vec::with_capacity(self.segments.len() * (steps as usize + 1));

        for segment in &self.segments {
            for k in 0..=steps {
                let p = segment.centerline_point(k as f32 / steps as f32);
                if points.last().map_or(true, |last| last.distance(p) > 1e-6) {
                    points.push(p);
                }
            }
        }

        // Closing point may coincide with the first one
        if points.len() > 1 && points[0].distance(points[points.len() - 1]) <= 1e-6 {
            points.pop();
        }

        points
    }
}

//! Command implementations: ties together the material table, ring
//! generator and scene builder.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use facet_core::scene::{LightSource, Pigment, Scene, SceneObject, Shape, Texture, Transform};
use facet_core::{MaterialTable, PolygonRing, Tessellation};
use facet_math::{Camera, EulerRot, Quat, Vec3};

use crate::config::{SceneConfig, ShapeConfig};

/// One line per canonical material: name, index, dispersion and aliases.
pub fn material_listing(table: &MaterialTable) -> Result<Vec<String>> {
    let mut lines = Vec::with_capacity(table.len());
    for property in table.iter() {
        let dispersion = property
            .dispersion()
            .map_or_else(|| "-".to_string(), |d| format!("{d:.5}"));
        let aliases = table.aliases_of(property.name())?;

        let mut line = format!("{:<20} {:>7.4} {:>8}", property.name(), property.ior(), dispersion);
        if !aliases.is_empty() {
            line.push_str(&format!("  ({})", aliases.join(", ")));
        }
        lines.push(line);
    }
    Ok(lines)
}

/// Human-readable summary of a generated ring.
pub fn ring_summary(ring: &PolygonRing) -> Vec<String> {
    let mut lines = vec![format!(
        "{}-corner ring, {:?}, tube radius {}, base width {}, segment radius {}",
        ring.segment_count(),
        ring.op,
        ring.spec.tube_radius,
        ring.spec.base_width,
        ring.spec.segment_radius
    )];

    for (i, segment) in ring.segments.iter().enumerate() {
        lines.push(format!(
            "  corner {i}: {:6.1} deg, center ({:.4}, {:.4}, {:.4})",
            segment.angle.to_degrees(),
            segment.center.x,
            segment.center.y,
            segment.center.z
        ));
    }

    let extent = ring.bounds.extent();
    lines.push(format!(
        "  bounds {:.4} x {:.4} x {:.4}",
        extent.x, extent.y, extent.z
    ));
    lines
}

/// Tessellate `ring` and write it to `path` as Wavefront OBJ.
pub fn write_ring_obj(ring: &PolygonRing, quality: &Tessellation, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mesh = ring.tessellate(quality);
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    mesh.write_obj(&mut out, "ring")
        .and_then(|_| out.flush())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!(
        "Wrote {} triangles to {}",
        mesh.triangle_count(),
        path.display()
    );
    Ok(())
}

fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

/// Build a scene from a parsed configuration, resolving materials in `table`.
pub fn build_scene(config: &SceneConfig, table: &MaterialTable) -> Result<Scene> {
    let camera = Camera::new(
        vec3(config.camera.location),
        vec3(config.camera.look_at),
        config.camera.aspect,
    )
    .with_angle(config.camera.angle);
    let mut scene = Scene::new(config.name.clone(), camera);

    for light in &config.lights {
        scene.add_light(LightSource {
            position: vec3(light.position),
            color: vec3(light.color),
            shadowless: light.shadowless,
        });
    }

    for object in &config.objects {
        let texture = match &object.material {
            Some(material) => Texture::gem(&object.name, vec3(object.color), material, table)
                .with_context(|| format!("Object '{}'", object.name))?,
            None => Texture::opaque(&object.name, Pigment::solid(vec3(object.color))),
        };
        let texture = scene.add_texture(texture);

        let shape = match &object.shape {
            ShapeConfig::Ring(spec) => {
                Shape::ring(*spec).with_context(|| format!("Object '{}'", object.name))?
            }
            ShapeConfig::Sphere { radius } => Shape::Sphere {
                center: Vec3::ZERO,
                radius: *radius,
            },
            ShapeConfig::Plane { normal, offset } => Shape::Plane {
                normal: vec3(*normal).normalize_or_zero(),
                offset: *offset,
            },
        };

        let [rx, ry, rz] = object.rotate.map(f32::to_radians);
        let transform = Transform::from_translation(vec3(object.translate))
            .with_rotation(Quat::from_euler(EulerRot::XYZ, rx, ry, rz));
        scene.add_object(SceneObject::new(&object.name, shape, texture).with_transform(transform));
    }

    if scene.light_count() == 0 {
        log::warn!("Scene '{}' has no light sources", scene.name);
    }
    log::info!(
        "Built scene '{}': {} objects, {} lights",
        scene.name,
        scene.object_count(),
        scene.light_count()
    );
    Ok(scene)
}

/// Serialize `scene` as pretty JSON.
pub fn scene_json(scene: &Scene) -> Result<String> {
    serde_json::to_string_pretty(scene).context("JSON serialisation error")
}

/// Write `scene` as JSON to `path`.
pub fn write_scene_json(scene: &Scene, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let json = scene_json(scene)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Scene (JSON) written to: {}", path.display());
    Ok(())
}

//! Cross-module behavior of the material table, ring generator and scene.

use facet_core::optics::{ior_data_gdb, spread_from_dispersion};
use facet_core::{
    MaterialTable, OpticsError, PolygonRingSpec, Scene, ShapeError, Tessellation,
};

fn standard_table() -> MaterialTable {
    let _ = env_logger::builder().is_test(true).try_init();
    MaterialTable::standard().unwrap()
}

#[test]
fn dispersion_is_non_negative_for_all_materials() {
    let table = standard_table();

    for property in table.iter() {
        if let Some(dispersion) = property.dispersion() {
            assert!(dispersion >= 0.0, "{} has dispersion {}", property.name(), dispersion);
            assert!(property.spread().unwrap() >= 0.0);
        }
    }
}

#[test]
fn alias_resolution_is_idempotent() {
    let table = standard_table();

    for (alias, property) in table.aliases() {
        let once = table.get(alias).unwrap();
        let twice = table.get(once.name()).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once, property);
    }
}

#[test]
fn gdb_reproduces_diamond() {
    let table = standard_table();
    let (ior, dispersion) = table.ior("Diamond").unwrap();
    let dispersion = dispersion.unwrap();

    // G and B lines placed half the spread either side of D
    let (gdb_ior, gdb_dispersion) = ior_data_gdb(2.417 + 0.022, 2.417, 2.417 - 0.022).unwrap();

    assert!((gdb_ior - ior).abs() < 1e-12);
    assert!((gdb_dispersion - dispersion).abs() < 1e-12);
    assert!((spread_from_dispersion(gdb_ior, gdb_dispersion) - 0.044).abs() < 1e-12);
}

#[test]
fn unknown_material_is_not_found() {
    let table = standard_table();
    assert_eq!(
        table.get("Vibranium").unwrap_err(),
        OpticsError::NotFound("Vibranium".to_string())
    );
}

#[test]
fn octagon_has_eight_segments_at_45_degrees() {
    let ring = PolygonRingSpec::new(8, 0.1, 1.0).generate().unwrap();

    assert_eq!(ring.segment_count(), 8);
    for (i, segment) in ring.segments.iter().enumerate() {
        let expected = (i as f32 * 45.0).to_radians();
        assert!((segment.angle - expected).abs() < 1e-5);
    }
}

#[test]
fn two_corners_are_rejected() {
    let err = PolygonRingSpec::new(2, 0.1, 1.0).generate().unwrap_err();
    assert!(matches!(
        err,
        ShapeError::InvalidParameter {
            name: "corner_count",
            ..
        }
    ));
}

#[test]
fn tube_wider_than_base_is_rejected() {
    for tube_radius in [1.0, 1.5] {
        let err = PolygonRingSpec::new(6, tube_radius, 1.0)
            .generate()
            .unwrap_err();
        assert!(matches!(
            err,
            ShapeError::InvalidParameter {
                name: "tube_radius",
                ..
            }
        ));
    }
}

#[test]
fn sample_scene_rings_tessellate() {
    let table = standard_table();
    let scene = Scene::sample(&table).unwrap();

    let rings: Vec<_> = scene
        .objects
        .iter()
        .filter_map(|object| match &object.shape {
            facet_core::Shape::Ring(ring) => Some(ring),
            _ => None,
        })
        .collect();
    assert_eq!(rings.len(), 2);

    for ring in rings {
        let mesh = ring.tessellate(&Tessellation::default());
        assert!(mesh.triangle_count() > 0);
        assert!(mesh.bounds.max.y <= ring.spec.tube_radius + 1e-5);
        assert!(mesh.bounds.min.y >= -ring.spec.tube_radius - 1e-5);
    }
}

//! Built-in material catalog.
//!
//! Gem values are the usual gemological references: refractive index (or
//! its birefringent range) at the sodium D line and the B–G dispersion
//! spread. Glasses and liquids are given as indices at the Fraunhofer
//! G (430.8 nm), D (589.3 nm) and B (686.7 nm) lines.

use super::measurement::Measurement;
use super::table::MaterialTableBuilder;

/// `(name, ior, spread)`
const DIRECT: &[(&str, f64, Option<f64>)] = &[
    ("Diamond", 2.417, Some(0.044)),
    ("Strontium Titanate", 2.409, Some(0.190)),
    ("Spinel", 1.718, Some(0.020)),
    ("Fluorite", 1.434, Some(0.007)),
    ("Almandine", 1.790, Some(0.024)),
    ("Pyrope", 1.746, Some(0.022)),
    ("Grossular", 1.738, Some(0.028)),
    ("Andradite", 1.888, Some(0.057)),
    ("Amber", 1.540, None),
    ("Jet", 1.660, None),
];

/// `(name, ior range, spread range)`
const RANGED: &[(&str, (f64, f64), Option<(f64, f64)>)] = &[
    ("Cubic Zirconia", (2.150, 2.180), Some((0.058, 0.066))),
    ("Moissanite", (2.648, 2.691), Some((0.104, 0.104))),
    ("Rutile", (2.616, 2.903), Some((0.280, 0.330))),
    ("Zircon", (1.810, 2.024), Some((0.038, 0.039))),
    ("Titanite", (1.885, 2.050), Some((0.051, 0.051))),
    ("Corundum", (1.762, 1.770), Some((0.018, 0.018))),
    ("Chrysoberyl", (1.746, 1.755), Some((0.015, 0.015))),
    ("Zoisite", (1.691, 1.700), Some((0.030, 0.030))),
    ("Olivine", (1.654, 1.690), Some((0.020, 0.020))),
    ("Tourmaline", (1.624, 1.644), Some((0.017, 0.017))),
    ("Topaz", (1.609, 1.643), Some((0.014, 0.014))),
    ("Beryl", (1.577, 1.583), Some((0.014, 0.014))),
    ("Quartz", (1.544, 1.553), Some((0.013, 0.013))),
    ("Jadeite", (1.654, 1.667), None),
    ("Pearl", (1.520, 1.660), None),
    ("Opal", (1.370, 1.470), None),
];

/// `(name, nG, nD, nB)`
const FRAUNHOFER: &[(&str, f64, f64, f64)] = &[
    ("Crown Glass", 1.5267, 1.5168, 1.5139),
    ("Dense Flint Glass", 1.8216, 1.7847, 1.7745),
    ("Fused Silica", 1.4667, 1.4585, 1.4557),
    ("Acrylic", 1.5024, 1.4917, 1.4885),
    ("Water", 1.3404, 1.3330, 1.3312),
];

/// `(alias, canonical name)`
const ALIASES: &[(&str, &str)] = &[
    ("Ruby", "Corundum"),
    ("Sapphire", "Corundum"),
    ("Emerald", "Beryl"),
    ("Aquamarine", "Beryl"),
    ("Morganite", "Beryl"),
    ("Heliodor", "Beryl"),
    ("Amethyst", "Quartz"),
    ("Citrine", "Quartz"),
    ("Rock Crystal", "Quartz"),
    ("Alexandrite", "Chrysoberyl"),
    ("Peridot", "Olivine"),
    ("Tanzanite", "Zoisite"),
    ("Demantoid", "Andradite"),
    ("Sphene", "Titanite"),
    ("CZ", "Cubic Zirconia"),
    ("Glass", "Crown Glass"),
    ("PMMA", "Acrylic"),
];

pub(super) fn standard_builder() -> MaterialTableBuilder {
    let mut builder = MaterialTableBuilder::new();

    for &(name, ior, spread) in DIRECT {
        builder = builder.material(name, Measurement::Direct { ior, spread });
    }
    for &(name, ior, spread) in RANGED {
        builder = builder.material(name, Measurement::Ranged { ior, spread });
    }
    for &(name, n_g, n_d, n_b) in FRAUNHOFER {
        builder = builder.material(name, Measurement::Fraunhofer { n_g, n_d, n_b });
    }
    for &(alias, target) in ALIASES {
        builder = builder.alias(alias, target);
    }

    builder
}

#[cfg(test)]
mod tests {
    use super::super::MaterialTable;
    use super::*;

    #[test]
    fn test_standard_catalog_builds() {
        let table = MaterialTable::standard().unwrap();

        assert_eq!(table.len(), DIRECT.len() + RANGED.len() + FRAUNHOFER.len());
        assert_eq!(table.alias_count(), ALIASES.len());
    }

    #[test]
    fn test_every_alias_resolves_to_its_target() {
        let table = MaterialTable::standard().unwrap();

        for &(alias, target) in ALIASES {
            assert_eq!(table.canonical_name(alias).unwrap(), target);
        }
    }

    #[test]
    fn test_diamond_entry() {
        let table = MaterialTable::standard().unwrap();
        let diamond = table.get("Diamond").unwrap();

        assert_eq!(diamond.ior(), 2.417);
        assert!((diamond.spread().unwrap() - 0.044).abs() < 1e-9);
    }

    #[test]
    fn test_glasses_have_dispersion() {
        let table = MaterialTable::standard().unwrap();

        for &(name, ..) in FRAUNHOFER {
            assert!(table.get(name).unwrap().has_dispersion(), "{name}");
        }
    }
}

//! Immutable name → optical property table with alias resolution.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::measurement::{spread_from_dispersion, Measurement};
use super::{OpticsError, OpticsResult};

/// Index of refraction and dispersion of one named material.
///
/// Records are only created by [`MaterialTableBuilder::build`], which
/// guarantees a positive index and, when present, a dispersion ≥ 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpticalProperty {
    name: String,
    ior: f64,
    dispersion: Option<f64>,
}

impl OpticalProperty {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ior(&self) -> f64 {
        self.ior
    }

    /// Violet/red index ratio, if the material's dispersion is known.
    pub fn dispersion(&self) -> Option<f64> {
        self.dispersion
    }

    pub fn has_dispersion(&self) -> bool {
        self.dispersion.is_some()
    }

    /// The B–G spread the dispersion was derived from.
    pub fn spread(&self) -> Option<f64> {
        self.dispersion
            .map(|dispersion| spread_from_dispersion(self.ior, dispersion))
    }

    /// The `(ior, dispersion)` pair.
    pub fn pair(&self) -> (f64, Option<f64>) {
        (self.ior, self.dispersion)
    }
}

/// Collects measurements and aliases, then validates them into a table.
#[derive(Debug, Clone, Default)]
pub struct MaterialTableBuilder {
    materials: Vec<(String, Measurement)>,
    aliases: Vec<(String, String)>,
}

impl MaterialTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canonical material.
    pub fn material(mut self, name: impl Into<String>, measurement: Measurement) -> Self {
        self.materials.push((name.into(), measurement));
        self
    }

    /// Add an alias for a canonical material.
    pub fn alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.push((alias.into(), target.into()));
        self
    }

    /// Validate everything and freeze the table.
    ///
    /// Fails with [`OpticsError::InvalidParameter`] on bad measurements,
    /// duplicate names, or aliases that do not point at a canonical entry.
    pub fn build(self) -> OpticsResult<MaterialTable> {
        let mut entries = Vec::with_capacity(self.materials.len());
        let mut by_name = HashMap::with_capacity(self.materials.len());

        for (name, measurement) in self.materials {
            let key = lookup_key(&name);
            if key.is_empty() {
                return Err(OpticsError::InvalidParameter(
                    "material name must not be empty".to_string(),
                ));
            }
            if by_name.contains_key(&key) {
                return Err(OpticsError::InvalidParameter(format!(
                    "duplicate material name '{}'",
                    name
                )));
            }

            let (ior, dispersion) = measurement.derive().map_err(|e| match e {
                OpticsError::InvalidParameter(msg) => {
                    OpticsError::InvalidParameter(format!("{}: {}", name, msg))
                }
                other => other,
            })?;

            by_name.insert(key, entries.len());
            entries.push(OpticalProperty {
                name,
                ior,
                dispersion,
            });
        }

        let alias_keys: HashSet<String> =
            self.aliases.iter().map(|(alias, _)| lookup_key(alias)).collect();

        let mut aliases = HashMap::with_capacity(self.aliases.len());
        let mut alias_names = Vec::with_capacity(self.aliases.len());

        for (alias, target) in self.aliases {
            let key = lookup_key(&alias);
            if by_name.contains_key(&key) || aliases.contains_key(&key) {
                return Err(OpticsError::InvalidParameter(format!(
                    "alias '{}' collides with an existing name",
                    alias
                )));
            }

            let target_key = lookup_key(&target);
            let index = match by_name.get(&target_key) {
                Some(&index) => index,
                None if alias_keys.contains(&target_key) => {
                    return Err(OpticsError::InvalidParameter(format!(
                        "alias '{}' points at alias '{}'; aliases must name a material",
                        alias, target
                    )));
                }
                None => {
                    return Err(OpticsError::InvalidParameter(format!(
                        "alias '{}' points at unknown material '{}'",
                        alias, target
                    )));
                }
            };

            aliases.insert(key, index);
            alias_names.push((alias, index));
        }

        log::debug!(
            "Built material table: {} materials, {} aliases",
            entries.len(),
            alias_names.len()
        );

        Ok(MaterialTable {
            entries,
            by_name,
            aliases,
            alias_names,
        })
    }
}

/// Read-only material lookup.
///
/// Names are matched ignoring ASCII case, with `_`, `-` and runs of
/// whitespace treated as a single space. Canonical names are looked up
/// first; aliases are a second pass that lands on a canonical record.
#[derive(Debug, Clone)]
pub struct MaterialTable {
    entries: Vec<OpticalProperty>,
    by_name: HashMap<String, usize>,
    aliases: HashMap<String, usize>,
    alias_names: Vec<(String, usize)>,
}

impl MaterialTable {
    pub fn builder() -> MaterialTableBuilder {
        MaterialTableBuilder::new()
    }

    /// The built-in catalog of gems, glasses and liquids.
    pub fn standard() -> OpticsResult<Self> {
        super::catalog::standard_builder().build()
    }

    /// Look up a material by canonical name or alias.
    pub fn get(&self, name: &str) -> OpticsResult<&OpticalProperty> {
        self.index_of(name)
            .map(|index| &self.entries[index])
            .ok_or_else(|| OpticsError::NotFound(name.to_string()))
    }

    /// The `(ior, dispersion)` pair for a material.
    pub fn ior(&self, name: &str) -> OpticsResult<(f64, Option<f64>)> {
        self.get(name).map(OpticalProperty::pair)
    }

    /// The canonical name behind `name` (itself, if not an alias).
    pub fn canonical_name(&self, name: &str) -> OpticsResult<&str> {
        self.get(name).map(OpticalProperty::name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(&lookup_key(name))
    }

    /// All aliases that resolve to the same record as `name`.
    pub fn aliases_of(&self, name: &str) -> OpticsResult<Vec<&str>> {
        let index = self
            .index_of(name)
            .ok_or_else(|| OpticsError::NotFound(name.to_string()))?;

        Ok(self
            .alias_names
            .iter()
            .filter(|(_, target)| *target == index)
            .map(|(alias, _)| alias.as_str())
            .collect())
    }

    /// Canonical records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &OpticalProperty> {
        self.entries.iter()
    }

    /// `(alias, record)` pairs in insertion order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &OpticalProperty)> {
        self.alias_names
            .iter()
            .map(|(alias, index)| (alias.as_str(), &self.entries[*index]))
    }

    /// Number of canonical materials.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn alias_count(&self) -> usize {
        self.alias_names.len()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        let key = lookup_key(name);
        self.by_name
            .get(&key)
            .or_else(|| self.aliases.get(&key))
            .copied()
    }
}

fn lookup_key(name: &str) -> String {
    name.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> MaterialTable {
        MaterialTable::builder()
            .material(
                "Diamond",
                Measurement::Direct {
                    ior: 2.417,
                    spread: Some(0.044),
                },
            )
            .material(
                "Corundum",
                Measurement::Ranged {
                    ior: (1.762, 1.770),
                    spread: Some((0.018, 0.018)),
                },
            )
            .material(
                "Opal",
                Measurement::Ranged {
                    ior: (1.37, 1.47),
                    spread: None,
                },
            )
            .alias("Ruby", "Corundum")
            .alias("Sapphire", "Corundum")
            .build()
            .unwrap()
    }

    #[test]
    fn test_lookup_canonical() {
        let table = small_table();
        let diamond = table.get("Diamond").unwrap();

        assert_eq!(diamond.name(), "Diamond");
        assert_eq!(diamond.ior(), 2.417);
        assert!((diamond.spread().unwrap() - 0.044).abs() < 1e-12);
    }

    #[test]
    fn test_lookup_alias_lands_on_canonical() {
        let table = small_table();
        let ruby = table.get("Ruby").unwrap();

        assert_eq!(ruby.name(), "Corundum");
        assert_eq!(ruby, table.get("Corundum").unwrap());
        assert!(table.is_alias("Ruby"));
        assert!(!table.is_alias("Corundum"));
    }

    #[test]
    fn test_lookup_ignores_case_and_separators() {
        let table = MaterialTable::builder()
            .material("Cubic Zirconia", Measurement::Direct { ior: 2.16, spread: Some(0.06) })
            .build()
            .unwrap();

        assert!(table.contains("cubic zirconia"));
        assert!(table.contains("CUBIC_ZIRCONIA"));
        assert!(table.contains("  Cubic-Zirconia "));
        assert!(!table.contains("Cubic"));
    }

    #[test]
    fn test_not_found() {
        let table = small_table();
        assert_eq!(
            table.get("Unobtainium").unwrap_err(),
            OpticsError::NotFound("Unobtainium".to_string())
        );
        assert!(table.ior("Unobtainium").is_err());
        assert!(table.aliases_of("Unobtainium").is_err());
    }

    #[test]
    fn test_material_without_dispersion() {
        let table = small_table();
        let (ior, dispersion) = table.ior("Opal").unwrap();

        assert!((ior - 1.42).abs() < 1e-12);
        assert!(dispersion.is_none());
        assert!(table.get("Opal").unwrap().spread().is_none());
    }

    #[test]
    fn test_aliases_of() {
        let table = small_table();

        assert_eq!(table.aliases_of("Corundum").unwrap(), vec!["Ruby", "Sapphire"]);
        assert_eq!(table.aliases_of("Ruby").unwrap(), vec!["Ruby", "Sapphire"]);
        assert!(table.aliases_of("Diamond").unwrap().is_empty());
    }

    #[test]
    fn test_counts_and_iteration_order() {
        let table = small_table();
        let names: Vec<&str> = table.iter().map(OpticalProperty::name).collect();

        assert_eq!(names, vec!["Diamond", "Corundum", "Opal"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.alias_count(), 2);
        assert_eq!(table.aliases().count(), 2);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = MaterialTable::builder()
            .material("Quartz", Measurement::Direct { ior: 1.54, spread: None })
            .material("quartz", Measurement::Direct { ior: 1.55, spread: None })
            .build()
            .unwrap_err();

        assert!(matches!(err, OpticsError::InvalidParameter(_)));
    }

    #[test]
    fn test_alias_collision_rejected() {
        let err = MaterialTable::builder()
            .material("Quartz", Measurement::Direct { ior: 1.54, spread: None })
            .alias("quartz", "Quartz")
            .build()
            .unwrap_err();

        assert!(matches!(err, OpticsError::InvalidParameter(_)));
    }

    #[test]
    fn test_alias_chain_rejected() {
        let err = MaterialTable::builder()
            .material("Beryl", Measurement::Direct { ior: 1.58, spread: Some(0.014) })
            .alias("Emerald", "Beryl")
            .alias("Green Beryl", "Emerald")
            .build()
            .unwrap_err();

        match err {
            OpticsError::InvalidParameter(msg) => assert!(msg.contains("aliases must name a material")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_dangling_alias_rejected() {
        let err = MaterialTable::builder()
            .alias("Ruby", "Corundum")
            .build()
            .unwrap_err();

        assert!(matches!(err, OpticsError::InvalidParameter(_)));
    }

    #[test]
    fn test_bad_measurement_names_the_material() {
        let err = MaterialTable::builder()
            .material("Broken", Measurement::Direct { ior: -1.0, spread: None })
            .build()
            .unwrap_err();

        match err {
            OpticsError::InvalidParameter(msg) => assert!(msg.starts_with("Broken:")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_lookup_key_normalization() {
        assert_eq!(lookup_key("Rock_Crystal"), "rock crystal");
        assert_eq!(lookup_key("  rock   CRYSTAL "), "rock crystal");
        assert_eq!(lookup_key("___"), "");
    }
}

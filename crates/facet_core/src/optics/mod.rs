//! Optical constants for transparent materials.
//!
//! Materials are described by their index of refraction and, where it has
//! been measured, their dispersion. Source data comes in three shapes
//! (see [`Measurement`]); every shape is reduced to the same
//! [`OpticalProperty`] record when a [`MaterialTable`] is built.
//!
//! Dispersion is stored the way renderers consume it: the ratio of the
//! violet index to the red index. It is derived from the gemological B–G
//! spread `s` (Fraunhofer B line at 686.7 nm, G line at 430.8 nm) as
//! `1 + s / (ior - s/2)`.
//!
//! # Example
//!
//! ```ignore
//! use facet_core::optics::MaterialTable;
//!
//! let table = MaterialTable::standard()?;
//! let (ior, dispersion) = table.ior("Ruby")?;
//! assert_eq!(table.canonical_name("Ruby")?, "Corundum");
//! ```

mod catalog;
mod measurement;
mod table;

pub use measurement::{
    dispersion_from_spread, ior_data, ior_data_gdb, ior_data_ranged, spread_from_dispersion,
    Measurement,
};
pub use table::{MaterialTable, MaterialTableBuilder, OpticalProperty};

use thiserror::Error;

/// Errors produced while building or querying a material table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpticsError {
    #[error("Material not found: {0}")]
    NotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type OpticsResult<T> = Result<T, OpticsError>;

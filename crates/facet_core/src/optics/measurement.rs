//! Reduction of measured optical data to (ior, dispersion) pairs.
//!
//! All functions here are pure: the same inputs always give the same pair.

use serde::{Deserialize, Serialize};

use super::{OpticsError, OpticsResult};

/// Measured optical data for one material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum Measurement {
    /// Index of refraction and optional B–G spread, as tabulated.
    Direct { ior: f64, spread: Option<f64> },

    /// Index and optional spread given as `(low, high)` ranges; the
    /// midpoints are used.
    Ranged {
        ior: (f64, f64),
        spread: Option<(f64, f64)>,
    },

    /// Refractive indices at the Fraunhofer G, D and B lines.
    Fraunhofer { n_g: f64, n_d: f64, n_b: f64 },
}

impl Measurement {
    /// Reduce the measurement to `(ior, dispersion)`.
    pub fn derive(&self) -> OpticsResult<(f64, Option<f64>)> {
        match *self {
            Measurement::Direct { ior, spread } => ior_data(ior, spread),
            Measurement::Ranged { ior, spread } => ior_data_ranged(ior, spread),
            Measurement::Fraunhofer { n_g, n_d, n_b } => {
                ior_data_gdb(n_g, n_d, n_b).map(|(ior, dispersion)| (ior, Some(dispersion)))
            }
        }
    }
}

/// Renderer dispersion (violet/red index ratio) for a B–G spread.
#[inline]
pub fn dispersion_from_spread(ior: f64, spread: f64) -> f64 {
    1.0 + spread / (ior - spread / 2.0)
}

/// Inverse of [`dispersion_from_spread`].
#[inline]
pub fn spread_from_dispersion(ior: f64, dispersion: f64) -> f64 {
    2.0 * ior * (dispersion - 1.0) / (dispersion + 1.0)
}

/// Direct form: tabulated index and optional spread.
pub fn ior_data(ior: f64, spread: Option<f64>) -> OpticsResult<(f64, Option<f64>)> {
    check_index("index of refraction", ior)?;

    let dispersion = match spread {
        Some(spread) => {
            check_spread(ior, spread)?;
            Some(dispersion_from_spread(ior, spread))
        }
        None => None,
    };

    Ok((ior, dispersion))
}

/// Ranged form: both values are averaged over their measured range.
pub fn ior_data_ranged(
    ior: (f64, f64),
    spread: Option<(f64, f64)>,
) -> OpticsResult<(f64, Option<f64>)> {
    let ior = midpoint("index of refraction", ior)?;
    let spread = spread.map(|range| midpoint("dispersion", range)).transpose()?;
    ior_data(ior, spread)
}

/// Fraunhofer form: `nD` is the index, `nG - nB` the spread, giving
/// `dispersion = 1 + (nG - nB) / (nD - (nG - nB)/2)`.
pub fn ior_data_gdb(n_g: f64, n_d: f64, n_b: f64) -> OpticsResult<(f64, f64)> {
    check_index("G-line index", n_g)?;
    check_index("D-line index", n_d)?;
    check_index("B-line index", n_b)?;

    if n_g < n_b {
        return Err(OpticsError::InvalidParameter(format!(
            "G-line index {} is below B-line index {} (anomalous dispersion)",
            n_g, n_b
        )));
    }

    let spread = n_g - n_b;
    check_spread(n_d, spread)?;
    Ok((n_d, dispersion_from_spread(n_d, spread)))
}

fn check_index(what: &str, value: f64) -> OpticsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OpticsError::InvalidParameter(format!(
            "{} must be a positive finite number, got {}",
            what, value
        )))
    }
}

fn check_spread(ior: f64, spread: f64) -> OpticsResult<()> {
    if !spread.is_finite() || spread < 0.0 {
        return Err(OpticsError::InvalidParameter(format!(
            "dispersion must be a non-negative finite number, got {}",
            spread
        )));
    }
    // Keeps the ratio's denominator positive
    if spread >= 2.0 * ior {
        return Err(OpticsError::InvalidParameter(format!(
            "dispersion {} is too large for index {}",
            spread, ior
        )));
    }
    Ok(())
}

fn midpoint(what: &str, (low, high): (f64, f64)) -> OpticsResult<f64> {
    if !low.is_finite() || !high.is_finite() || low > high {
        return Err(OpticsError::InvalidParameter(format!(
            "{} range [{}, {}] is not an ordered finite range",
            what, low, high
        )));
    }
    Ok((low + high) / 2.0)
}

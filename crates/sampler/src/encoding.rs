//! Per-variable encoding parameters of the hydrological toolchain.

use crate::error::SampleError;

/// Encoding parameters for one named output variable: the storage dtype,
/// the scale factor applied when the toolchain packs values, and the fill
/// sentinel. Process-wide immutable configuration; consulted by keyed
/// lookup only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarEncoding {
    /// Storage dtype name used by the toolchain's gridded output.
    pub dtype: &'static str,
    /// Multiplicative scale factor applied at storage time.
    pub scale_factor: f64,
    /// Fill value marking missing cells.
    pub fill_value: i32,
    /// Whether the toolchain compresses this variable's storage.
    pub compress: bool,
}

const fn int32(scale_factor: f64) -> VarEncoding {
    VarEncoding {
        dtype: "int32",
        scale_factor,
        fill_value: -9999,
        compress: true,
    }
}

/// All variables the toolchain emits, with their encoding parameters.
const VARIABLES: &[(&str, VarEncoding)] = &[
    ("Discharge", int32(0.0001)),
    ("Evapotranspiration", int32(1.0)),
    ("RainPET", int32(1.0)),
    ("RelativeSoilMoisture", int32(1.0)),
    ("RiverDepth", int32(1.0)),
    ("RiverTemperature", int32(0.01)),
    ("RiverWidth", int32(1.0)),
    ("Runoff", int32(1.0)),
    ("SnowPack", int32(1.0)),
    ("SoilMoisture", int32(1.0)),
    ("WetBulbTemp", int32(1.0)),
];

/// Looks up the encoding parameters of `variable`.
///
/// # Errors
///
/// Returns [`SampleError::UnknownVariable`] for names outside the
/// registry; there is no implicit default.
pub fn encoding(variable: &str) -> Result<&'static VarEncoding, SampleError> {
    VARIABLES
        .iter()
        .find(|(name, _)| *name == variable)
        .map(|(_, enc)| enc)
        .ok_or_else(|| SampleError::UnknownVariable {
            name: variable.to_string(),
        })
}

/// Names of every variable in the registry, in registry order.
pub fn known_variables() -> impl Iterator<Item = &'static str> {
    VARIABLES.iter().map(|(name, _)| *name)
}

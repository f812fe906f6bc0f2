//! Mapping from datastream type codes to concrete numeric types.

use crate::error::CodecError;

/// Numeric type of a record payload, selected by the header type code.
///
/// Codes: 5 = 16-bit int, 6 = 32-bit int, 7 = 32-bit float,
/// 8 = 64-bit float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// 16-bit signed integer (code 5).
    Int16,
    /// 32-bit signed integer (code 6).
    Int32,
    /// 32-bit IEEE float (code 7).
    Float32,
    /// 64-bit IEEE float (code 8).
    Float64,
}

impl ValueType {
    /// Maps a header type code to its numeric type.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownFormat`] for any code outside
    /// {5, 6, 7, 8}.
    pub fn from_code(code: i16) -> Result<Self, CodecError> {
        match code {
            5 => Ok(Self::Int16),
            6 => Ok(Self::Int32),
            7 => Ok(Self::Float32),
            8 => Ok(Self::Float64),
            _ => Err(CodecError::UnknownFormat { code }),
        }
    }

    /// Returns the type code this variant corresponds to.
    pub fn code(self) -> i16 {
        match self {
            Self::Int16 => 5,
            Self::Int32 => 6,
            Self::Float32 => 7,
            Self::Float64 => 8,
        }
    }

    /// Width in bytes of one value of this type.
    pub fn byte_width(self) -> usize {
        match self {
            Self::Int16 => 2,
            Self::Int32 => 4,
            Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }

    /// Whether this is an integer type (codes 5 and 6).
    ///
    /// Integer records carry an integer missing value and are upcast to
    /// floating point before the missing-value-to-NaN substitution.
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Int16 | Self::Int32)
    }
}

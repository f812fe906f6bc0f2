//! Typed record payload decoding.

use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::CodecError;
use crate::header::{HEADER_LEN, read_up_to};
use crate::value_type::ValueType;

/// A decoded record payload: a flat numeric array typed per the header's
/// type code, tied to exactly one [`crate::Header`].
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// 16-bit integer payload (code 5).
    Int16(Vec<i16>),
    /// 32-bit integer payload (code 6).
    Int32(Vec<i32>),
    /// 32-bit float payload (code 7).
    Float32(Vec<f32>),
    /// 64-bit float payload (code 8).
    Float64(Vec<f64>),
}

impl Record {
    /// Number of values in the payload.
    pub fn len(&self) -> usize {
        match self {
            Self::Int16(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::Float64(v) => v.len(),
        }
    }

    /// Whether the payload holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Upcasts the payload to `f64`.
    ///
    /// Exact for every variant: `i16`, `i32`, and `f32` all embed into
    /// `f64` without loss.
    pub fn to_f64(&self) -> Vec<f64> {
        match self {
            Self::Int16(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Self::Int32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Self::Float32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Self::Float64(v) => v.clone(),
        }
    }
}

/// Reads one record payload of `item_count` values of `value_type`.
///
/// When `skip_header` is set, a 40-byte header is discarded first (used
/// when the caller has not already consumed the record's header).
///
/// # Errors
///
/// Returns [`CodecError::TruncatedHeader`] if the skipped header is short
/// and [`CodecError::TruncatedRecord`] if fewer payload bytes are
/// available than `item_count * byte_width`.
pub fn read_record(
    reader: &mut impl Read,
    item_count: usize,
    value_type: ValueType,
    skip_header: bool,
) -> Result<Record, CodecError> {
    if skip_header {
        let mut header = [0u8; HEADER_LEN];
        let got = read_up_to(reader, &mut header)?;
        if got < HEADER_LEN {
            return Err(CodecError::TruncatedHeader {
                expected: HEADER_LEN,
                got,
            });
        }
    }

    let expected = item_count * value_type.byte_width();
    let mut buf = vec![0u8; expected];
    let got = read_up_to(reader, &mut buf)?;
    if got < expected {
        return Err(CodecError::TruncatedRecord { expected, got });
    }

    Ok(decode(&buf, item_count, value_type))
}

/// Reinterprets `buf` as `item_count` contiguous little-endian values.
fn decode(buf: &[u8], item_count: usize, value_type: ValueType) -> Record {
    match value_type {
        ValueType::Int16 => {
            let mut out = vec![0i16; item_count];
            LittleEndian::read_i16_into(buf, &mut out);
            Record::Int16(out)
        }
        ValueType::Int32 => {
            let mut out = vec![0i32; item_count];
            LittleEndian::read_i32_into(buf, &mut out);
            Record::Int32(out)
        }
        ValueType::Float32 => {
            let mut out = vec![0f32; item_count];
            LittleEndian::read_f32_into(buf, &mut out);
            Record::Float32(out)
        }
        ValueType::Float64 => {
            let mut out = vec![0f64; item_count];
            LittleEndian::read_f64_into(buf, &mut out);
            Record::Float64(out)
        }
    }
}

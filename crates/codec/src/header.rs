//! The 40-byte datastream record header.

use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};
use chrono::NaiveDate;
use dsample_calendar::Resolution;

use crate::error::CodecError;
use crate::value_type::ValueType;

/// Size in bytes of the header preceding every record.
pub const HEADER_LEN: usize = 40;

/// The header's missing-value field, interpreted as integer or float
/// depending on the type code (> 6 selects the float reading).
///
/// The tag is chosen once during header parsing and never re-inspected;
/// downstream remapping only needs [`Missing::as_f64`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Missing {
    /// Integer missing value (type codes 5 and 6).
    Int(i32),
    /// Floating-point missing value (type codes 7 and 8).
    Float(f64),
}

impl Missing {
    /// The missing value as `f64`, the representation used by remapping.
    ///
    /// Exact for both variants: every `i32` is representable in `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

/// A parsed datastream header.
///
/// One header precedes the data stream and every subsequent record of a
/// multi-record stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header {
    /// Raw byte-order flag as written by the producer. Carried for
    /// diagnostics; all fields are decoded little-endian.
    pub swap: i16,
    /// Numeric type of the record payload.
    pub value_type: ValueType,
    /// Number of values in the record payload.
    pub item_count: usize,
    /// Missing-value sentinel, tagged by the type code.
    pub missing: Missing,
    /// Record date, parsed per the active resolution.
    pub date: NaiveDate,
}

impl Header {
    /// Reads and parses exactly [`HEADER_LEN`] bytes from `reader`.
    ///
    /// Layout: 2-byte swap flag, 2-byte type code, 4-byte item count,
    /// 8-byte missing-value union, 24-byte NUL-padded ASCII date string
    /// in the format implied by `resolution`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TruncatedHeader`] if fewer than 40 bytes are
    /// available, [`CodecError::UnknownFormat`] for an unrecognized type
    /// code, [`CodecError::InvalidItemCount`] for a non-positive item
    /// count, and [`CodecError::MalformedDate`] if the date string does
    /// not parse.
    pub fn read(reader: &mut impl Read, resolution: Resolution) -> Result<Self, CodecError> {
        let mut buf = [0u8; HEADER_LEN];
        let got = read_up_to(reader, &mut buf)?;
        if got < HEADER_LEN {
            return Err(CodecError::TruncatedHeader {
                expected: HEADER_LEN,
                got,
            });
        }

        let swap = LittleEndian::read_i16(&buf[0..2]);
        let code = LittleEndian::read_i16(&buf[2..4]);
        let value_type = ValueType::from_code(code)?;

        let count = LittleEndian::read_i32(&buf[4..8]);
        if count <= 0 {
            return Err(CodecError::InvalidItemCount { count });
        }

        // 8-byte union at offset 8: an i32 occupies the low 4 bytes.
        let missing = if value_type.is_integer() {
            Missing::Int(LittleEndian::read_i32(&buf[8..12]))
        } else {
            Missing::Float(LittleEndian::read_f64(&buf[8..16]))
        };

        let date = parse_date(&buf[16..40], resolution)?;

        Ok(Self {
            swap,
            value_type,
            item_count: count as usize,
            missing,
            date,
        })
    }
}

/// Parses the fixed-width date field: ASCII text, NUL-padded to 24 bytes.
fn parse_date(field: &[u8], resolution: Resolution) -> Result<NaiveDate, CodecError> {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    let text = std::str::from_utf8(&field[..end])
        .map_err(|_| CodecError::MalformedDate {
            text: String::from_utf8_lossy(&field[..end]).into_owned(),
            format: resolution.date_format().to_string(),
        })?
        .trim();

    // Monthly and annual dates lack day (and month) components; complete
    // them to the period start so one chrono parse path handles all three.
    let completed = match resolution {
        Resolution::Daily => text.to_string(),
        Resolution::Monthly => format!("{text}-01"),
        Resolution::Annual => format!("{text}-01-01"),
    };

    NaiveDate::parse_from_str(&completed, "%Y-%m-%d").map_err(|_| CodecError::MalformedDate {
        text: text.to_string(),
        format: resolution.date_format().to_string(),
    })
}

/// Fills `buf` from `reader`, returning how many bytes were read before EOF.
pub(crate) fn read_up_to(reader: &mut impl Read, buf: &mut [u8]) -> Result<usize, CodecError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CodecError::Io(e)),
        }
    }
    Ok(filled)
}

//! The streaming decode iterator.

use std::io::Read;

use chrono::NaiveDate;
use dsample_calendar::Resolution;
use dsample_codec::{Header, read_record};
use dsample_mask::{Grid, IdGrid};
use tracing::trace;

use crate::error::SampleError;

/// Lazy, forward-only sequence of `(decoded grid, date)` record pairs.
///
/// Reads the stream's initial header at construction, then yields exactly
/// `records_per_year(year, resolution)` items. Each item remaps the flat
/// record onto the identifier grid: identifier 0 (nodata) and cells whose
/// decoded value equals the header's missing value become NaN.
///
/// The iterator is not restartable. Dropping it before exhaustion drops
/// the underlying source, which for a pipe-backed source closes the pipe
/// and reaps the converter process.
#[derive(Debug)]
pub struct RecordIter<R: Read> {
    reader: R,
    ids: IdGrid,
    resolution: Resolution,
    header: Header,
    n_records: usize,
    index: usize,
    failed: bool,
}

impl<R: Read> RecordIter<R> {
    /// Creates the iterator, consuming the stream's first header.
    ///
    /// The first header's type, item count, and missing value govern every
    /// record of the stream; later headers contribute only their date.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::Decode`] if the initial header is truncated
    /// or malformed, and [`SampleError::IdOutOfRange`] if the identifier
    /// grid names an entity past the stream's item count (a silent
    /// misalignment between mask and stream otherwise).
    pub fn new(
        mut reader: R,
        ids: IdGrid,
        year: i32,
        resolution: Resolution,
    ) -> Result<Self, SampleError> {
        let header = Header::read(&mut reader, resolution)
            .map_err(|source| SampleError::Decode { record: 0, source })?;

        if ids.max_id() as usize > header.item_count {
            return Err(SampleError::IdOutOfRange {
                max_id: ids.max_id(),
                item_count: header.item_count,
            });
        }

        Ok(Self {
            reader,
            ids,
            resolution,
            header,
            n_records: resolution.records_per_year(year),
            index: 0,
            failed: false,
        })
    }

    /// The stream's initial header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Number of records this iterator will yield in total.
    pub fn n_records(&self) -> usize {
        self.n_records
    }

    /// Decodes the record at `self.index` and remaps it onto the grid.
    fn next_record(&mut self) -> Result<(Grid, NaiveDate), SampleError> {
        let record = self.index;
        let wrap = |source| SampleError::Decode { record, source };

        // The first record's header was consumed at construction; every
        // later record is preceded by its own 40-byte header, read here.
        let date = if record == 0 {
            self.header.date
        } else {
            Header::read(&mut self.reader, self.resolution)
                .map_err(wrap)?
                .date
        };

        let payload = read_record(
            &mut self.reader,
            self.header.item_count,
            self.header.value_type,
            false,
        )
        .map_err(wrap)?;

        // Lookup array with the missing value at index 0, so identifier 0
        // (the nodata sentinel) remaps to missing.
        let missing = self.header.missing.as_f64();
        let mut lookup = Vec::with_capacity(self.header.item_count + 1);
        lookup.push(missing);
        lookup.extend(payload.to_f64());

        let data: Vec<f64> = self
            .ids
            .ids()
            .iter()
            .map(|&id| {
                let v = lookup[id as usize];
                if v == missing { f64::NAN } else { v }
            })
            .collect();

        let (ny, nx) = self.ids.shape();
        let grid = Grid::new(ny, nx, data)?;
        trace!(record, date = %date, "decoded record");
        Ok((grid, date))
    }
}

impl<R: Read> Iterator for RecordIter<R> {
    type Item = Result<(Grid, NaiveDate), SampleError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.index >= self.n_records {
            return None;
        }
        let item = self.next_record();
        if item.is_err() {
            self.failed = true;
        } else {
            self.index += 1;
        }
        Some(item)
    }
}

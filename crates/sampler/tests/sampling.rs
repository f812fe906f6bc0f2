//! Integration tests for the decode-and-scatter loop over in-memory
//! streams and hand-built mask layers.

use std::io::Cursor;
use std::path::PathBuf;

use byteorder::{LittleEndian, WriteBytesExt};
use dsample_calendar::{Resolution, period_dates};
use dsample_mask::{Grid, MaskKind, MaskLayer};
use dsample_sampler::{MaskTable, OutputTable, sample_records};

const MISSING: i32 = -9999;

/// Appends a 40-byte int32 header to `buf`.
fn push_header(buf: &mut Vec<u8>, items: i32, date: &str) {
    buf.write_i16::<LittleEndian>(0).unwrap();
    buf.write_i16::<LittleEndian>(6).unwrap();
    buf.write_i32::<LittleEndian>(items).unwrap();
    buf.write_i32::<LittleEndian>(MISSING).unwrap();
    buf.write_i32::<LittleEndian>(0).unwrap();
    let mut field = [0u8; 24];
    field[..date.len()].copy_from_slice(date.as_bytes());
    buf.extend_from_slice(&field);
}

/// A daily int32 stream for `year` with two items per record:
/// `(day_index + 1, (day_index + 1) * 2)`, with both items missing on
/// day index 9.
fn daily_stream(year: i32) -> Vec<u8> {
    let mut buf = Vec::new();
    for (i, date) in period_dates(year, Resolution::Daily).iter().enumerate() {
        push_header(&mut buf, 2, &date.format("%Y-%m-%d").to_string());
        let (a, b) = if i == 9 {
            (MISSING, MISSING)
        } else {
            ((i + 1) as i32, ((i + 1) * 2) as i32)
        };
        buf.write_i32::<LittleEndian>(a).unwrap();
        buf.write_i32::<LittleEndian>(b).unwrap();
    }
    buf
}

fn point_table(layer_grid: Vec<f64>, year: i32, resolution: Resolution) -> MaskTable {
    let layer = MaskLayer::new(
        "Gauges",
        MaskKind::Point,
        Grid::new(2, 2, layer_grid).unwrap(),
    );
    let columns: Vec<String> = period_dates(year, resolution)
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    let table = OutputTable::new(&layer.values, columns);
    MaskTable {
        layer,
        output_dir: PathBuf::new(),
        table,
    }
}

fn polygon_table(layer_grid: Vec<f64>, year: i32, resolution: Resolution) -> MaskTable {
    let layer = MaskLayer::new(
        "Basins",
        MaskKind::Polygon,
        Grid::new(2, 2, layer_grid).unwrap(),
    );
    let columns: Vec<String> = period_dates(year, resolution)
        .iter()
        .flat_map(|d| {
            let label = d.format("%Y-%m-%d").to_string();
            [format!("mean_{label}"), format!("sum_{label}")]
        })
        .collect();
    let table = OutputTable::new(&layer.values, columns);
    MaskTable {
        layer,
        output_dir: PathBuf::new(),
        table,
    }
}

#[test]
fn daily_point_sampling_fills_a_full_year() {
    // ID grid: cells 1 and 2 are entities, corners are nodata.
    let id = Grid::new(2, 2, vec![f64::NAN, 1.0, 2.0, f64::NAN]).unwrap();
    let mut tables = vec![point_table(vec![f64::NAN, 1.0, 2.0, f64::NAN], 2001, Resolution::Daily)];

    sample_records(
        Cursor::new(daily_stream(2001)),
        &id,
        &mut tables,
        2001,
        Resolution::Daily,
    )
    .unwrap();

    let table = &tables[0].table;
    assert_eq!(table.n_rows(), 2);
    assert_eq!(table.columns().len(), 365);

    // Day 1: identifier 1 -> 1, identifier 2 -> 2.
    assert_eq!(table.get(1, "2001-01-01").unwrap(), 1.0);
    assert_eq!(table.get(2, "2001-01-01").unwrap(), 2.0);
    // Day 365.
    assert_eq!(table.get(1, "2001-12-31").unwrap(), 365.0);
    assert_eq!(table.get(2, "2001-12-31").unwrap(), 730.0);
    // Day 10 was all-missing: NaN in the table.
    assert!(table.get(1, "2001-01-10").unwrap().is_nan());
    assert!(table.get(2, "2001-01-10").unwrap().is_nan());
}

#[test]
fn polygon_sampling_aggregates_mean_and_sum() {
    // ID grid with three entity cells; polygon 7 covers the two cells of
    // identifiers 1 and 2, polygon 8 covers the cell of identifier 3.
    let id = Grid::new(2, 2, vec![f64::NAN, 1.0, 2.0, 3.0]).unwrap();

    let mut stream = Vec::new();
    push_header(&mut stream, 3, "1990");
    for v in [10, 20, 50] {
        stream.write_i32::<LittleEndian>(v).unwrap();
    }

    let mut tables = vec![polygon_table(
        vec![f64::NAN, 7.0, 7.0, 8.0],
        1990,
        Resolution::Annual,
    )];
    sample_records(
        Cursor::new(stream),
        &id,
        &mut tables,
        1990,
        Resolution::Annual,
    )
    .unwrap();

    let table = &tables[0].table;
    assert_eq!(table.get(7, "mean_1990-01-01").unwrap(), 15.0);
    assert_eq!(table.get(7, "sum_1990-01-01").unwrap(), 30.0);
    assert_eq!(table.get(8, "mean_1990-01-01").unwrap(), 50.0);
    assert_eq!(table.get(8, "sum_1990-01-01").unwrap(), 50.0);
}

#[test]
fn polygon_mean_propagates_missing_as_nan() {
    let id = Grid::new(2, 2, vec![1.0, 2.0, f64::NAN, f64::NAN]).unwrap();

    let mut stream = Vec::new();
    push_header(&mut stream, 2, "1990");
    stream.write_i32::<LittleEndian>(MISSING).unwrap();
    stream.write_i32::<LittleEndian>(4).unwrap();

    let mut tables = vec![polygon_table(
        vec![9.0, 9.0, f64::NAN, f64::NAN],
        1990,
        Resolution::Annual,
    )];
    sample_records(
        Cursor::new(stream),
        &id,
        &mut tables,
        1990,
        Resolution::Annual,
    )
    .unwrap();

    // One of the polygon's cells decoded to missing, so both aggregates
    // are NaN.
    let table = &tables[0].table;
    assert!(table.get(9, "mean_1990-01-01").unwrap().is_nan());
    assert!(table.get(9, "sum_1990-01-01").unwrap().is_nan());
}

#[test]
fn truncated_stream_fails_instead_of_yielding_short() {
    let id = Grid::new(2, 2, vec![f64::NAN, 1.0, 2.0, f64::NAN]).unwrap();
    let mut stream = daily_stream(2001);
    stream.truncate(stream.len() / 2);

    let mut tables = vec![point_table(vec![f64::NAN, 1.0, 2.0, f64::NAN], 2001, Resolution::Daily)];
    let err = sample_records(
        Cursor::new(stream),
        &id,
        &mut tables,
        2001,
        Resolution::Daily,
    )
    .unwrap_err();
    assert!(matches!(err, dsample_sampler::SampleError::Decode { .. }));
}

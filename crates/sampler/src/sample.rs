//! Sampling orchestration: source resolution, table construction, the
//! decode loop, and CSV persistence.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use dsample_calendar::{Resolution, period_dates};
use dsample_mask::{Grid, IdGrid, MaskDataset, MaskKind, MaskLayer};
use dsample_source::{ByteSource, spawn_converter};
use tracing::{debug, info};

use crate::encoding;
use crate::error::SampleError;
use crate::iter::RecordIter;
use crate::table::OutputTable;

/// Where the datastream bytes come from.
#[derive(Debug, Clone)]
pub enum DataInput {
    /// A `.gds`/`.ds` file, possibly gzip-compressed.
    Path(PathBuf),
    /// The process's standard input.
    Stdin,
}

impl DataInput {
    fn resolve(&self) -> Result<ByteSource, SampleError> {
        match self {
            Self::Path(p) => Ok(ByteSource::open(p)?),
            Self::Stdin => Ok(ByteSource::stdin()),
        }
    }
}

/// One mask layer paired with its output directory and table.
pub struct MaskTable {
    /// The immutable mask layer driving this table.
    pub layer: MaskLayer,
    /// Directory the table will be persisted into
    /// (`<root>/<layer>/<ResolutionCapitalized>/`).
    pub output_dir: PathBuf,
    /// The accumulating identifier-by-date table.
    pub table: OutputTable,
}

/// Column label of a record date.
fn date_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Builds one empty output table per requested mask layer and ensures the
/// per-layer output directories exist.
///
/// Returns the dataset's `ID` grid alongside the tables. Point layers get
/// one column per period date; Polygon layers get `mean_<date>` and
/// `sum_<date>` columns.
///
/// # Errors
///
/// Returns [`SampleError::ShapeMismatch`] if a layer's grid shape differs
/// from the `ID` grid, plus any mask dataset or directory-creation
/// failure.
pub fn build_tables(
    dataset: &MaskDataset,
    mask_layers: &[String],
    output_root: &Path,
    year: i32,
    resolution: Resolution,
) -> Result<(Grid, Vec<MaskTable>), SampleError> {
    let id = dataset.id_grid()?;
    let dates = period_dates(year, resolution);

    let mut tables = Vec::with_capacity(mask_layers.len());
    for name in mask_layers {
        let layer = dataset.layer(name)?;
        if layer.grid.shape() != id.shape() {
            let (ny, nx) = id.shape();
            let (got_ny, got_nx) = layer.grid.shape();
            return Err(SampleError::ShapeMismatch {
                layer: name.clone(),
                ny,
                nx,
                got_ny,
                got_nx,
            });
        }

        let output_dir = output_root.join(name).join(resolution.capitalized());
        fs::create_dir_all(&output_dir)?;

        let columns: Vec<String> = match layer.kind {
            MaskKind::Point => dates.iter().map(|&d| date_label(d)).collect(),
            MaskKind::Polygon => dates
                .iter()
                .flat_map(|&d| {
                    let label = date_label(d);
                    [format!("mean_{label}"), format!("sum_{label}")]
                })
                .collect(),
        };

        debug!(
            layer = %name,
            kind = ?layer.kind,
            n_ids = layer.values.len(),
            n_columns = columns.len(),
            "built output table"
        );
        let table = OutputTable::new(&layer.values, columns);
        tables.push(MaskTable {
            layer,
            output_dir,
            table,
        });
    }

    Ok((id, tables))
}

/// Drives the decode iterator over `source`, scattering or aggregating
/// every record into each mask's table.
///
/// Point layers receive the raw remapped cell values; Polygon layers
/// receive the per-identifier mean and sum over cells sharing the
/// identifier. Nothing is persisted here; see [`sample_datastream`].
pub fn sample_records<R: Read>(
    source: R,
    id_grid: &Grid,
    tables: &mut [MaskTable],
    year: i32,
    resolution: Resolution,
) -> Result<(), SampleError> {
    let ids = IdGrid::from_grid(id_grid);
    let iter = RecordIter::new(source, ids, year, resolution)?;

    for item in iter {
        let (grid, date) = item?;
        let label = date_label(date);

        for mask_table in tables.iter_mut() {
            let MaskTable { layer, table, .. } = mask_table;
            match layer.kind {
                MaskKind::Point => {
                    for (&value, &mask_cell) in grid.cells().iter().zip(layer.grid.cells()) {
                        if mask_cell.is_finite() {
                            table.set(mask_cell as u32, &label, value);
                        }
                    }
                }
                MaskKind::Polygon => {
                    for &id in &layer.values {
                        let mut sum = 0.0;
                        let mut count = 0usize;
                        for (&value, &mask_cell) in grid.cells().iter().zip(layer.grid.cells())
                        {
                            if mask_cell.is_finite() && mask_cell as u32 == id {
                                sum += value;
                                count += 1;
                            }
                        }
                        // Every id in `values` covers at least one cell.
                        let mean = sum / count as f64;
                        table.set(id, &format!("mean_{label}"), mean);
                        table.set(id, &format!("sum_{label}"), sum);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Samples a datastream with a NetCDF mask, writing one CSV per layer.
///
/// Orchestration: resolve the byte source, open the mask dataset, build
/// per-layer tables, drive the decode iterator, and only after full
/// exhaustion persist `<layer>/<Resolution>/<variable>_<year>.csv` under
/// `output_root`. A failure mid-iteration leaves no partially written
/// CSV files.
///
/// Returns the written file paths.
///
/// # Errors
///
/// Rejects variable names outside the encoding registry before touching
/// the stream, and propagates every decode, mask, and I/O failure.
pub fn sample_datastream(
    mask_path: &Path,
    input: DataInput,
    mask_layers: &[String],
    output_root: &Path,
    year: i32,
    variable: &str,
    resolution: Resolution,
) -> Result<Vec<PathBuf>, SampleError> {
    encoding::encoding(variable)?;

    let source = input.resolve()?;
    let dataset = MaskDataset::open(mask_path)?;
    run(source, &dataset, mask_layers, output_root, year, variable, resolution)
}

/// Samples a gdbc grid file by bridging it through the external converter.
///
/// The network template must be a `gdbn` file; the converter's stdout is
/// consumed as the byte source.
///
/// # Errors
///
/// Returns [`SampleError::NotANetwork`] for a non-gdbn template and
/// [`dsample_source::SourceError::DecoderLaunch`] (wrapped) if the
/// converter cannot be started.
pub fn sample_gdbc(
    mask_path: &Path,
    gdbc: &Path,
    network: &Path,
    mask_layers: &[String],
    output_root: &Path,
    year: i32,
    variable: &str,
    resolution: Resolution,
) -> Result<Vec<PathBuf>, SampleError> {
    let is_network = network
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .and_then(|n| n.split_once('.').map(|(_, ext)| ext.contains("gdbn")))
        .unwrap_or(false);
    if !is_network {
        return Err(SampleError::NotANetwork {
            path: network.to_path_buf(),
        });
    }

    encoding::encoding(variable)?;

    let source = spawn_converter(gdbc, network)?;
    let dataset = MaskDataset::open(mask_path)?;
    run(source, &dataset, mask_layers, output_root, year, variable, resolution)
}

/// Shared tail of both entry points: build tables, iterate, persist.
fn run(
    source: ByteSource,
    dataset: &MaskDataset,
    mask_layers: &[String],
    output_root: &Path,
    year: i32,
    variable: &str,
    resolution: Resolution,
) -> Result<Vec<PathBuf>, SampleError> {
    let (id, mut tables) = build_tables(dataset, mask_layers, output_root, year, resolution)?;

    info!(
        mask = %dataset.path().display(),
        n_layers = tables.len(),
        year,
        variable,
        resolution = %resolution,
        "sampling datastream"
    );
    sample_records(source, &id, &mut tables, year, resolution)?;

    let mut written = Vec::with_capacity(tables.len());
    for mask_table in &tables {
        let path = mask_table
            .output_dir
            .join(format!("{variable}_{year}.csv"));
        mask_table.table.write_csv(&path)?;
        info!(path = %path.display(), rows = mask_table.table.n_rows(), "wrote table");
        written.push(path);
    }
    Ok(written)
}

//! The opened NetCDF mask dataset.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::MaskError;
use crate::grid::{Grid, MaskKind, MaskLayer};

/// An opened mask dataset: an `ID` identifier layer plus zero or more
/// named mask layers, each carrying a `Type` attribute.
#[derive(Debug)]
pub struct MaskDataset {
    file: netcdf::File,
    path: PathBuf,
}

impl MaskDataset {
    /// Opens the mask dataset at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::FileNotFound`] if the path does not exist and
    /// [`MaskError::Netcdf`] if the file cannot be opened as NetCDF.
    pub fn open(path: &Path) -> Result<Self, MaskError> {
        if !path.exists() {
            return Err(MaskError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        debug!(path = %path.display(), "opening mask dataset");
        Ok(Self {
            file: netcdf::open(path)?,
            path: path.to_path_buf(),
        })
    }

    /// Path this dataset was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the `ID` layer as a float grid (NaN = nodata).
    pub fn id_grid(&self) -> Result<Grid, MaskError> {
        self.read_grid("ID")
    }

    /// Reads one named mask layer together with its declared kind.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::MissingLayer`] if the layer does not exist,
    /// [`MaskError::MissingType`] if it lacks a `Type` attribute, and
    /// [`MaskError::UnknownMaskType`] if the attribute is neither
    /// `Point` nor `Polygon`.
    pub fn layer(&self, name: &str) -> Result<MaskLayer, MaskError> {
        let grid = self.read_grid(name)?;
        let kind = MaskKind::parse(name, &self.type_attribute(name)?)?;
        Ok(MaskLayer::new(name, kind, grid))
    }

    /// Reads a 2-D `f64` variable into a [`Grid`].
    fn read_grid(&self, name: &str) -> Result<Grid, MaskError> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| MaskError::MissingLayer {
                name: name.to_string(),
                path: self.path.clone(),
            })?;

        let dims = var.dimensions();
        if dims.len() != 2 {
            return Err(MaskError::DimensionMismatch {
                name: format!("{name} dimensions"),
                expected: 2,
                got: dims.len(),
            });
        }
        let ny = dims[0].len();
        let nx = dims[1].len();

        let data = var.get_values::<f64, _>(..)?;
        Grid::new(ny, nx, data)
    }

    /// Reads a layer's `Type` attribute as a string.
    fn type_attribute(&self, name: &str) -> Result<String, MaskError> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| MaskError::MissingLayer {
                name: name.to_string(),
                path: self.path.clone(),
            })?;

        let value = var
            .attribute_value("Type")
            .ok_or_else(|| MaskError::MissingType {
                layer: name.to_string(),
            })?
            .map_err(MaskError::from)?;

        value.try_into().map_err(|e: netcdf::Error| MaskError::Netcdf {
            reason: format!("'Type' attribute of '{name}' is not a string: {e}"),
        })
    }
}

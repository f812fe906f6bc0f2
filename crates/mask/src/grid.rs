//! Grid containers and mask layer types.

use crate::error::MaskError;

/// A 2-D grid of `f64` values in row-major order.
///
/// NaN cells denote nodata. This is the working representation of both
/// mask layers and decoded records.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    ny: usize,
    nx: usize,
    data: Vec<f64>,
}

impl Grid {
    /// Creates a grid from row-major data of length `ny * nx`.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::DimensionMismatch`] if the data length does
    /// not match the shape.
    pub fn new(ny: usize, nx: usize, data: Vec<f64>) -> Result<Self, MaskError> {
        if data.len() != ny * nx {
            return Err(MaskError::DimensionMismatch {
                name: "grid data".to_string(),
                expected: ny * nx,
                got: data.len(),
            });
        }
        Ok(Self { ny, nx, data })
    }

    /// Grid shape as `(ny, nx)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat row-major view of the cells.
    pub fn cells(&self) -> &[f64] {
        &self.data
    }
}

/// The `ID` layer flattened into an identifier lookup grid.
///
/// NaN nodata cells are coerced to 0, the reserved "no entity" sentinel
/// that remapping maps to the missing value. Identifier 0 must never name
/// a real entity.
#[derive(Debug, Clone)]
pub struct IdGrid {
    ny: usize,
    nx: usize,
    ids: Vec<u32>,
    max_id: u32,
}

impl IdGrid {
    /// Builds an identifier grid from the float-typed `ID` layer.
    pub fn from_grid(grid: &Grid) -> Self {
        let ids: Vec<u32> = grid
            .cells()
            .iter()
            .map(|&v| if v.is_finite() && v > 0.0 { v as u32 } else { 0 })
            .collect();
        let max_id = ids.iter().copied().max().unwrap_or(0);
        let (ny, nx) = grid.shape();
        Self { ny, nx, ids, max_id }
    }

    /// Grid shape as `(ny, nx)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }

    /// Flat row-major identifiers (0 = nodata).
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    /// Largest identifier present (0 for an all-nodata grid).
    pub fn max_id(&self) -> u32 {
        self.max_id
    }
}

/// Declared kind of a mask layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskKind {
    /// One cell per entity; tables hold raw sampled values.
    Point,
    /// Many cells per entity; tables hold per-entity mean and sum.
    Polygon,
}

impl MaskKind {
    /// Parses a layer's `Type` attribute.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::UnknownMaskType`] for anything other than
    /// `Point` or `Polygon`.
    pub fn parse(layer: &str, kind: &str) -> Result<Self, MaskError> {
        match kind {
            "Point" => Ok(Self::Point),
            "Polygon" => Ok(Self::Polygon),
            other => Err(MaskError::UnknownMaskType {
                layer: layer.to_string(),
                kind: other.to_string(),
            }),
        }
    }
}

/// One named mask layer: kind, identifier grid, and the distinct set of
/// finite identifiers present. Immutable once built.
#[derive(Debug, Clone)]
pub struct MaskLayer {
    /// Layer name in the mask dataset.
    pub name: String,
    /// Declared kind (`Type` attribute).
    pub kind: MaskKind,
    /// Identifier grid; NaN marks cells outside every entity.
    pub grid: Grid,
    /// Sorted distinct identifiers, excluding nodata.
    pub values: Vec<u32>,
}

impl MaskLayer {
    /// Builds a layer, computing its distinct identifier set.
    pub fn new(name: impl Into<String>, kind: MaskKind, grid: Grid) -> Self {
        let mut values: Vec<u32> = grid
            .cells()
            .iter()
            .filter(|v| v.is_finite())
            .map(|&v| v as u32)
            .collect();
        values.sort_unstable();
        values.dedup();
        Self {
            name: name.into(),
            kind,
            grid,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_shape_validation() {
        let err = Grid::new(2, 2, vec![1.0; 3]).unwrap_err();
        assert!(matches!(err, MaskError::DimensionMismatch { .. }));
        assert!(Grid::new(2, 3, vec![0.0; 6]).is_ok());
    }

    #[test]
    fn id_grid_coerces_nan_to_zero() {
        let grid = Grid::new(2, 2, vec![f64::NAN, 1.0, 2.0, 1.0]).unwrap();
        let ids = IdGrid::from_grid(&grid);
        assert_eq!(ids.ids(), &[0, 1, 2, 1]);
        assert_eq!(ids.max_id(), 2);
        assert_eq!(ids.shape(), (2, 2));
    }

    #[test]
    fn id_grid_all_nodata() {
        let grid = Grid::new(1, 2, vec![f64::NAN, f64::NAN]).unwrap();
        let ids = IdGrid::from_grid(&grid);
        assert_eq!(ids.max_id(), 0);
    }

    #[test]
    fn mask_kind_parse() {
        assert_eq!(MaskKind::parse("m", "Point").unwrap(), MaskKind::Point);
        assert_eq!(MaskKind::parse("m", "Polygon").unwrap(), MaskKind::Polygon);
        let err = MaskKind::parse("m", "Line").unwrap_err();
        assert!(matches!(err, MaskError::UnknownMaskType { .. }));
    }

    #[test]
    fn layer_distinct_values_sorted() {
        let grid = Grid::new(2, 3, vec![5.0, f64::NAN, 2.0, 2.0, 5.0, 9.0]).unwrap();
        let layer = MaskLayer::new("Basins", MaskKind::Polygon, grid);
        assert_eq!(layer.values, vec![2, 5, 9]);
    }
}

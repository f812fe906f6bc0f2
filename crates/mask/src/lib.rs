//! # dsample-mask
//!
//! Read-only access to the NetCDF mask dataset: the `ID` identifier grid
//! plus named mask layers, each tagged `Point` or `Polygon`. Mask
//! construction (drainage-network geometry) happens upstream; this crate
//! only consumes the finished artifact.

mod dataset;
mod error;
mod grid;

pub use dataset::MaskDataset;
pub use error::MaskError;
pub use grid::{Grid, IdGrid, MaskKind, MaskLayer};

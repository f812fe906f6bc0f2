//! Integration tests reading a programmatically built mask dataset.

use std::path::{Path, PathBuf};

use tempfile::tempdir;

use dsample_mask::{IdGrid, MaskDataset, MaskError, MaskKind};

/// Writes a 2x3 mask dataset: an ID grid with one nodata cell, a Point
/// layer over two cells, and a Polygon layer over all valid cells.
fn write_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("mask.nc");
    let mut file = netcdf::create(&path).expect("create mask file");

    file.add_dimension("lat", 2).expect("add dim lat");
    file.add_dimension("lon", 3).expect("add dim lon");

    let id = vec![f64::NAN, 1.0, 2.0, 3.0, 4.0, 5.0];
    {
        let mut var = file.add_variable::<f64>("ID", &["lat", "lon"]).expect("add ID");
        var.put_values(&id, ..).expect("put ID");
    }

    let gauges = vec![f64::NAN, 1.0, f64::NAN, f64::NAN, 4.0, f64::NAN];
    {
        let mut var = file
            .add_variable::<f64>("Gauges", &["lat", "lon"])
            .expect("add Gauges");
        var.put_attribute("Type", "Point").expect("Gauges Type");
        var.put_values(&gauges, ..).expect("put Gauges");
    }

    let basins = vec![f64::NAN, 7.0, 7.0, 8.0, 8.0, 8.0];
    {
        let mut var = file
            .add_variable::<f64>("Basins", &["lat", "lon"])
            .expect("add Basins");
        var.put_attribute("Type", "Polygon").expect("Basins Type");
        var.put_values(&basins, ..).expect("put Basins");
    }

    let odd = vec![0.0; 6];
    {
        let mut var = file
            .add_variable::<f64>("Odd", &["lat", "lon"])
            .expect("add Odd");
        var.put_attribute("Type", "Line").expect("Odd Type");
        var.put_values(&odd, ..).expect("put Odd");
    }

    path
}

#[test]
fn reads_id_grid_with_nodata() {
    let dir = tempdir().unwrap();
    let ds = MaskDataset::open(&write_fixture(dir.path())).unwrap();

    let id = ds.id_grid().unwrap();
    assert_eq!(id.shape(), (2, 3));
    assert!(id.cells()[0].is_nan());

    let ids = IdGrid::from_grid(&id);
    assert_eq!(ids.ids(), &[0, 1, 2, 3, 4, 5]);
    assert_eq!(ids.max_id(), 5);
}

#[test]
fn reads_typed_layers() {
    let dir = tempdir().unwrap();
    let ds = MaskDataset::open(&write_fixture(dir.path())).unwrap();

    let gauges = ds.layer("Gauges").unwrap();
    assert_eq!(gauges.kind, MaskKind::Point);
    assert_eq!(gauges.values, vec![1, 4]);

    let basins = ds.layer("Basins").unwrap();
    assert_eq!(basins.kind, MaskKind::Polygon);
    assert_eq!(basins.values, vec![7, 8]);
}

#[test]
fn unknown_mask_type_is_rejected() {
    let dir = tempdir().unwrap();
    let ds = MaskDataset::open(&write_fixture(dir.path())).unwrap();

    let err = ds.layer("Odd").unwrap_err();
    assert!(matches!(
        err,
        MaskError::UnknownMaskType { layer, kind } if layer == "Odd" && kind == "Line"
    ));
}

#[test]
fn missing_layer_and_missing_file() {
    let dir = tempdir().unwrap();
    let ds = MaskDataset::open(&write_fixture(dir.path())).unwrap();
    assert!(matches!(
        ds.layer("Nope").unwrap_err(),
        MaskError::MissingLayer { .. }
    ));

    let err = MaskDataset::open(Path::new("/nonexistent/mask.nc")).unwrap_err();
    assert!(matches!(err, MaskError::FileNotFound { .. }));
}

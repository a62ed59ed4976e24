//! Grid provider boundary
//!
//! Raster access and georeferencing live outside this crate. Callers hand in
//! a [`GridProvider`] that opens rasters by path; the project layer only asks
//! opened grids for their size, bounds and pixel/coordinate conversions.

use crate::Result;
use serde::Serialize;
use std::path::Path;

/// Zero-based raster cell index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pixel {
    pub col: usize,
    pub row: usize,
}

impl Pixel {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Bounding box in the grid's projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

/// An opened raster
pub trait Grid {
    /// Number of columns
    fn x_size(&self) -> usize;

    /// Number of rows
    fn y_size(&self) -> usize;

    fn bounds(&self) -> Bounds;

    /// Projected coordinate of a cell centre
    fn pixel_to_coord(&self, pixel: Pixel) -> Result<(f64, f64)>;

    /// Cell containing a projected coordinate
    ///
    /// Coordinates outside the raster are a [`crate::Error::Grid`].
    fn coord_to_pixel(&self, x: f64, y: f64) -> Result<Pixel>;

    /// Longitude and latitude of a cell centre
    fn pixel_to_lonlat(&self, pixel: Pixel) -> Result<(f64, f64)>;
}

/// Opens rasters by path
pub trait GridProvider {
    type Grid: Grid;

    fn open(&self, path: &Path) -> Result<Self::Grid>;
}

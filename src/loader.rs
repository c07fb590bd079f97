//! Reading and writing program images
//!
//! Any format the `image` crate can decode works as input; pixels are
//! converted to RGBA and packed one cell per pixel.

use crate::error::ProgramError;
use crate::grid::Grid;
use image::RgbaImage;
use log::debug;
use std::path::Path;

/// Load a program grid from an image file
pub fn load_grid(path: &Path) -> Result<Grid, ProgramError> {
    debug!("Loading program image: {}", path.display());
    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    debug!("Image is {}x{}", width, height);

    Grid::from_rgba(width as usize, height as usize, rgba.as_raw())
}

/// Render a grid back into an opaque RGBA image
pub fn grid_to_image(grid: &Grid) -> RgbaImage {
    let mut img = RgbaImage::new(grid.width() as u32, grid.height() as u32);
    for (x, y, cell) in grid.iter() {
        let (class_byte, param_a, param_b) = cell.decode();
        img.put_pixel(
            x as u32,
            y as u32,
            image::Rgba([class_byte, param_a, param_b, 0xff]),
        );
    }
    img
}

/// Write a grid to disk as an image. The format follows the file extension.
pub fn save_grid(grid: &Grid, path: &Path) -> Result<(), ProgramError> {
    grid_to_image(grid).save(path)?;
    Ok(())
}

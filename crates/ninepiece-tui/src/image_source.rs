//! Loads the puzzle picture and cuts it into tiles.

use crate::theme::hue_to_rgb;
use derive_more::{Display, Error};
use image::imageops::{self, FilterType};
use image::{GenericImageView, ImageError, Rgb, RgbImage};
use ninepiece_core::{TileStore, GRID_SIZE};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// The picture could not be read or decoded
#[derive(Debug, Display, Error)]
#[display("cannot load picture {}: {}", path.display(), source)]
pub struct ImageUnavailable {
    pub path: PathBuf,
    pub source: ImageError,
}

/// Decode `path`, scale it to a square of three tiles a side and slice it
#[instrument]
pub fn load_tiles(path: &Path, tile_edge: u32) -> Result<TileStore<RgbImage>, ImageUnavailable> {
    let picture = image::open(path).map_err(|source| ImageUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        width = picture.width(),
        height = picture.height(),
        "decoded picture"
    );

    let side = board_side(tile_edge);
    let picture = picture
        .resize_exact(side, side, FilterType::Lanczos3)
        .to_rgb8();
    Ok(slice(&picture, tile_edge))
}

/// A colorful built-in picture for when no file is given
pub fn generated_tiles(tile_edge: u32) -> TileStore<RgbImage> {
    slice(&generated_picture(tile_edge), tile_edge)
}

/// Cut a square picture into tiles in row-major order, skipping the
/// bottom-right region
pub fn slice(picture: &RgbImage, tile_edge: u32) -> TileStore<RgbImage> {
    TileStore::from_fn(|cell| {
        imageops::crop_imm(
            picture,
            cell.col as u32 * tile_edge,
            cell.row as u32 * tile_edge,
            tile_edge,
            tile_edge,
        )
        .to_image()
    })
}

fn board_side(tile_edge: u32) -> u32 {
    tile_edge * GRID_SIZE as u32
}

/// Hue sweeps around the centre, with darker concentric rings so
/// neighbouring tiles are easy to tell apart
fn generated_picture(tile_edge: u32) -> RgbImage {
    let side = board_side(tile_edge);
    let half = side as f32 / 2.0;

    RgbImage::from_fn(side, side, |x, y| {
        let dx = x as f32 + 0.5 - half;
        let dy = y as f32 + 0.5 - half;
        let angle = dy.atan2(dx) / std::f32::consts::TAU + 0.5;
        let radius = (dx * dx + dy * dy).sqrt() / half;

        let ring = (radius * 4.0).fract();
        let shade = if ring < 0.15 { 0.45 } else { 1.0 - radius * 0.25 };

        let [r, g, b] = hue_to_rgb(angle);
        let dim = |c: u8| (c as f32 * shade.clamp(0.0, 1.0)) as u8;
        Rgb([dim(r), dim(g), dim(b)])
    })
}

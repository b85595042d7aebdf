//! Poster export.
//!
//! The capture itself is the window screenshot handed over by iced; this
//! module does the rest: flatten onto the opaque poster background, upscale
//! 4x, encode PNG, and drop the file into the user's Pictures directory
//! named after the album title. CPU-bound work runs on a blocking task.

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::PathBuf;
use thiserror::Error;

/// Output scale factor relative to the captured pixels
pub const EXPORT_SCALE: u32 = 4;

/// Opaque backdrop behind any transparent capture pixels
pub const POSTER_BACKGROUND: Rgba<u8> = Rgba([0x0d, 0x04, 0x04, 0xff]);

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("capture returned invalid pixel data")]
    InvalidCapture,
    #[error("could not find a Pictures or home directory")]
    NoOutputDir,
    #[error("failed to encode poster: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write poster: {0}")]
    Write(#[from] std::io::Error),
    #[error("export task failed: {0}")]
    TaskJoin(String),
}

/// Save a captured RGBA frame as the final poster PNG.
/// Returns the path of the written file.
pub async fn save_poster(
    rgba: Vec<u8>,
    width: u32,
    height: u32,
    title: String,
) -> Result<PathBuf, ExportError> {
    tokio::task::spawn_blocking(move || save_poster_blocking(rgba, width, height, &title))
        .await
        .map_err(|e| ExportError::TaskJoin(e.to_string()))?
}

fn save_poster_blocking(
    rgba: Vec<u8>,
    width: u32,
    height: u32,
    title: &str,
) -> Result<PathBuf, ExportError> {
    let poster = compose_poster(rgba, width, height)?;

    let dir = output_dir()?;
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(poster_filename(title));

    poster.save_with_format(&path, ImageFormat::Png)?;
    Ok(path)
}

/// Flatten the capture onto the poster background and upscale it.
fn compose_poster(rgba: Vec<u8>, width: u32, height: u32) -> Result<RgbaImage, ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::InvalidCapture);
    }
    let capture =
        RgbaImage::from_raw(width, height, rgba).ok_or(ExportError::InvalidCapture)?;

    let mut flat = RgbaImage::from_pixel(width, height, POSTER_BACKGROUND);
    imageops::overlay(&mut flat, &capture, 0, 0);

    Ok(imageops::resize(
        &flat,
        width * EXPORT_SCALE,
        height * EXPORT_SCALE,
        FilterType::Lanczos3,
    ))
}

/// `Album_<title>.png`, runs of whitespace collapsed to single underscores
pub fn poster_filename(title: &str) -> String {
    let joined = title.split_whitespace().collect::<Vec<_>>().join("_");
    format!("Album_{}.png", joined)
}

fn output_dir() -> Result<PathBuf, ExportError> {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .ok_or(ExportError::NoOutputDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_replaces_whitespace_with_underscores() {
        assert_eq!(poster_filename("VINTAGE REVERIE"), "Album_VINTAGE_REVERIE.png");
        assert_eq!(poster_filename("A  MOVEABLE\tFEAST"), "Album_A_MOVEABLE_FEAST.png");
        assert_eq!(poster_filename("ONEWORD"), "Album_ONEWORD.png");
    }

    #[test]
    fn test_compose_scales_by_four() {
        let rgba = vec![255u8; 3 * 2 * 4];
        let poster = compose_poster(rgba, 3, 2).unwrap();
        assert_eq!(poster.width(), 12);
        assert_eq!(poster.height(), 8);
    }

    #[test]
    fn test_transparent_capture_flattens_to_background() {
        // Fully transparent 1x1 capture: only the backdrop should remain
        let poster = compose_poster(vec![0, 0, 0, 0], 1, 1).unwrap();
        for pixel in poster.pixels() {
            assert_eq!(pixel[0], POSTER_BACKGROUND[0]);
            assert_eq!(pixel[1], POSTER_BACKGROUND[1]);
            assert_eq!(pixel[2], POSTER_BACKGROUND[2]);
            assert_eq!(pixel[3], 255);
        }
    }

    #[test]
    fn test_invalid_capture_is_rejected() {
        assert!(matches!(
            compose_poster(vec![0u8; 3], 2, 2),
            Err(ExportError::InvalidCapture)
        ));
        assert!(matches!(
            compose_poster(Vec::new(), 0, 0),
            Err(ExportError::InvalidCapture)
        ));
    }
}

//! Chart image capture
//!
//! The engine only records where an image should go. The shell takes the
//! [`CaptureRequest`], grabs the rendered frame, crops it to the plot and
//! hands the RGBA pixels to [`save_rgba_png`].

use crate::error::{ChartError, Result};
use std::path::{Path, PathBuf};

/// File extension written for captures
pub const IMAGE_EXTENSION: &str = "png";

/// A pending "save chart as image" request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Destination file (always ends in `.png`)
    pub path: PathBuf,
}

impl CaptureRequest {
    /// Validate the destination; a missing extension becomes `.png`
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ChartError::Capture("empty destination path".to_string()));
        }
        let path = if path.extension().is_none() {
            path.with_extension(IMAGE_EXTENSION)
        } else {
            path.to_path_buf()
        };
        Ok(Self { path })
    }
}

/// Pixel rectangle inside a captured frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Copy `region` out of a tightly packed RGBA frame
///
/// The region is clipped to the frame. Returns the clipped size and pixels.
pub fn crop_rgba(
    frame_width: usize,
    frame_height: usize,
    rgba: &[u8],
    region: PixelRect,
) -> Result<(usize, usize, Vec<u8>)> {
    if rgba.len() != frame_width * frame_height * 4 {
        return Err(ChartError::Capture(format!(
            "frame is {} bytes, expected {}x{} RGBA",
            rgba.len(),
            frame_width,
            frame_height
        )));
    }
    let x0 = region.x.min(frame_width);
    let y0 = region.y.min(frame_height);
    let x1 = region.x.saturating_add(region.width).min(frame_width);
    let y1 = region.y.saturating_add(region.height).min(frame_height);
    let (width, height) = (x1 - x0, y1 - y0);
    if width == 0 || height == 0 {
        return Err(ChartError::Capture("capture region is empty".to_string()));
    }

    let mut out = Vec::with_capacity(width * height * 4);
    for row in y0..y1 {
        let start = (row * frame_width + x0) * 4;
        out.extend_from_slice(&rgba[start..start + width * 4]);
    }
    Ok((width, height, out))
}

/// Encode RGBA pixels as a PNG file
pub fn save_rgba_png(path: impl AsRef<Path>, width: usize, height: usize, rgba: Vec<u8>) -> Result<()> {
    let path = path.as_ref();
    let (w, h) = (
        u32::try_from(width).map_err(|_| ChartError::Capture("image too wide".to_string()))?,
        u32::try_from(height).map_err(|_| ChartError::Capture("image too tall".to_string()))?,
    );
    let img = image::RgbaImage::from_raw(w, h, rgba).ok_or_else(|| {
        ChartError::Capture(format!("pixel buffer does not match {}x{}", width, height))
    })?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| ChartError::Capture(format!("{}: {}", path.display(), e)))?;

    tracing::info!("Saved chart image {:?} ({}x{})", path, width, height);
    Ok(())
}

use image::{DynamicImage, GenericImageView};
use std::fs;
use std::path::Path;

use crate::error::{Result, ViewerError};
use crate::fit::Size;

// ---------------------------------------------------------------------------
// Decoded image data
// ---------------------------------------------------------------------------

/// A source image as read from disk, before any fitting. Kept around so a
/// window resize can re-fit without decoding again.
pub struct DecodedImage {
    pub image: DynamicImage,
    pub width: u32,
    pub height: u32,
    pub file_size: u64,
    pub format_name: String,
}

impl DecodedImage {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

pub fn decode_image(path: &Path) -> Result<DecodedImage> {
    let file_size = fs::metadata(path)
        .map_err(|source| ViewerError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    let image = image::open(path).map_err(|source| ViewerError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let format_name = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("unknown")
        .to_uppercase();
    let (width, height) = image.dimensions();

    Ok(DecodedImage {
        image,
        width,
        height,
        file_size,
        format_name,
    })
}

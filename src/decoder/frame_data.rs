use std::path::Path;

use crate::error::{AppError, Result};

/// Decoded RGB8 frame
#[derive(Clone, Debug)]
pub struct FrameData {
    pub buffer: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl FrameData {
    pub fn new(buffer: Vec<u8>, width: u32, height: u32) -> Self {
        Self { buffer, width, height }
    }

    /// Writes the frame as an image; the format follows the path's extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let image = image::RgbImage::from_raw(self.width, self.height, self.buffer.clone())
            .ok_or_else(|| {
                AppError::message(format!(
                    "frame buffer of {} bytes does not fit {}x{} RGB",
                    self.buffer.len(),
                    self.width,
                    self.height
                ))
            })?;
        image.save(path)?;
        Ok(())
    }
}

pub mod frame_data;
pub mod video;

use serde::Serialize;

use crate::error::Result;
pub use frame_data::FrameData;
pub use video::VideoDecoder;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VideoInfo {
    pub fps: f64,
    pub frame_count: u64,
}

impl VideoInfo {
    /// Length in seconds, 0 when the frame rate is unknown.
    pub fn duration_secs(&self) -> f64 {
        if self.fps > 0.0 {
            self.frame_count as f64 / self.fps
        } else {
            0.0
        }
    }
}

/// Anything the sampler can seek and pull frames from. `Ok(None)` means the
/// position produced no frame.
pub trait FrameSource {
    fn info(&self) -> VideoInfo;
    fn frame_at_msec(&mut self, msec: f64) -> Result<Option<FrameData>>;
    fn frame_at_index(&mut self, index: u64) -> Result<Option<FrameData>>;
}

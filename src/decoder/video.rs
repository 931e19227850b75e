use opencv::{
    prelude::*,
    videoio,
    imgproc,
    core,
};
use std::path::Path;
use tracing::debug;

use super::{FrameData, FrameSource, VideoInfo};
use crate::error::{AppError, Result};

pub struct VideoDecoder {
    capture: videoio::VideoCapture,
    info: VideoInfo,
}

impl VideoDecoder {
    pub fn open(path: &Path) -> Result<Self> {
        let path_str = path.to_string_lossy();
        debug!("Opening video with OpenCV: {}", path_str);

        // CAP_ANY lets OpenCV pick the backend
        let capture = videoio::VideoCapture::from_file(&path_str, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(AppError::VideoOpen(path.to_path_buf()));
        }

        let fps = capture.get(videoio::CAP_PROP_FPS)?;
        let frame_count = capture.get(videoio::CAP_PROP_FRAME_COUNT)?.max(0.0) as u64;
        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;
        debug!("Opened {}x{} @ {} fps, {} frames", width, height, fps, frame_count);

        Ok(Self {
            capture,
            info: VideoInfo { fps, frame_count },
        })
    }

    /// Decodes the frame at the current position, converted BGR -> RGB.
    fn read_frame(&mut self) -> Result<Option<FrameData>> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? || frame.empty() {
            return Ok(None);
        }

        let mut rgb = Mat::default();
        imgproc::cvt_color(&frame, &mut rgb, imgproc::COLOR_BGR2RGB, 0,
                          core::AlgorithmHint::ALGO_HINT_DEFAULT)?;

        if !rgb.is_continuous() {
            return Err(AppError::message("frame data is not continuous"));
        }

        Ok(Some(FrameData::new(
            rgb.data_bytes()?.to_vec(),
            rgb.cols() as u32,
            rgb.rows() as u32,
        )))
    }
}

impl FrameSource for VideoDecoder {
    fn info(&self) -> VideoInfo {
        self.info
    }

    fn frame_at_msec(&mut self, msec: f64) -> Result<Option<FrameData>> {
        self.capture.set(videoio::CAP_PROP_POS_MSEC, msec)?;
        self.read_frame()
    }

    fn frame_at_index(&mut self, index: u64) -> Result<Option<FrameData>> {
        self.capture.set(videoio::CAP_PROP_POS_FRAMES, index as f64)?;
        self.read_frame()
    }
}
